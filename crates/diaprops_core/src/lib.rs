//! Typed property descriptors for diagram objects, with reflection,
//! persistence, merging, dialogs and undo built on top.

/// Property kinds, descriptors, values and every operation over them.
pub mod props;
/// Standard diagram object types.
pub mod shapes;
