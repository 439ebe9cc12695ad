pub mod blob;
mod catalog;
mod change;
mod codec;
pub mod compression;
mod descriptor;
mod diag;
mod document;
mod error;
mod flags;
mod geom;
mod handler;
pub mod kind;
mod merge;
mod object;
mod quark;
mod reflect;
pub mod registry;
#[cfg(test)]
mod test_object;
mod tree;
mod value;
mod widget;

/// Object type catalog used to recreate persisted objects.
pub use catalog::{CreateFn, DescribeFn, ObjectCatalog};
/// Reversible property changes and undo history.
pub use change::{ChangeList, ChangeRecord, ObjectStore, UndoOptions, UndoStack, apply_props};
/// Attribute codec entry points and options.
pub use codec::{CodecOptions, DICT_COMPOSITE, TEXT_COMPOSITE, load_props, load_value, save_props, save_value};
/// Document compression detection result.
pub use compression::Compression;
/// Property descriptors, tables and kind-specific extras.
pub use descriptor::{DescriptorTable, DescriptorTableBuilder, EnumItem, NumberRange, PropDescriptor, PropExtra, RecordArrayExtra};
/// Non-fatal warning sink.
pub use diag::{Diagnostics, Warning};
/// Document container and its serialized form.
pub use document::{DOCUMENT_VERSION, Document, DocumentOptions, DocumentTree};
/// Error and result aliases.
pub use error::{PropError, Result};
/// Descriptor and value flag sets.
pub use flags::{Experience, PropFilter, PropFlags};
/// Geometric and style payload types.
pub use geom::{
	Arrow, ArrowType, BezPoint, BezPointKind, Color, DEFAULT_ARROW_SIZE, DEFAULT_DASH_LENGTH, DEFAULT_FONT_HEIGHT, FontRef, ImageData, LineStyle,
	LineStyleKind, Matrix, Point, Rect, TextAlign, TextValue,
};
/// Property event handlers.
pub use handler::{HandlerChain, HandlerId, PropEventHandler, register_handler};
/// Property kinds and dialog containers.
pub use kind::{ContainerKind, PropertyKind};
/// Descriptor table merging.
pub use merge::{MergeOption, can_be_merged, intersection, merge, union};
/// Host object trait and helpers built on it.
pub use object::{
	ObjectId, PropertyObject, copy_props, describe_objects, load_object_props, object_props, prop_by_name, save_object_props, set_string_prop,
	toggle_prop,
};
/// Interned property names.
pub use quark::Quark;
/// Field accessor tables for host structs.
pub use reflect::{OffsetTable, PairField, PropField};
/// Custom kind registration.
pub use registry::{CustomKindOps, KindTable, close_registration, kind_by_name, lookup_kind, register_kind, registered_kinds, registration_closed};
/// Persisted attribute tree.
pub use tree::{AttributeHost, AttributeNode, CompositeNode, DataError, DataNode, FontNode, ObjectNode};
/// Property values and value sets.
pub use value::{CustomPayload, CustomValue, PropValue, Property, PropertyList, Record, RecordId, make_new_prop};
/// Property dialog model.
pub use widget::{DialogOptions, PropDialog, WidgetFactory, WidgetSpec};
