/// Descriptor table printing.
pub mod describe;
/// Property kind listing.
pub mod kinds;
/// Merged descriptor tables of a selection.
pub mod merge;
/// Document creation.
pub mod new;
/// Single property edits.
pub mod set;
/// Document property dump.
pub mod show;
/// Object type listing.
pub mod types;

#[cfg(test)]
mod test_support;
mod util;
