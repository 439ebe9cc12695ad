use thiserror::Error;

use crate::props::ObjectId;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PropError>;

/// Errors produced while configuring, persisting, and editing properties.
///
/// Recoverable per-property problems are not errors; they are reported as
/// [`crate::props::Warning`] values instead.
#[derive(Debug, Error)]
pub enum PropError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Document JSON could not be parsed or written.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// A property kind with this name is already registered.
	#[error("property kind already registered: {name}")]
	DuplicateKind {
		/// Offending kind name.
		name: String,
	},
	/// Custom kind registration attempted after the registry was closed.
	#[error("property kind registration is closed (while registering {name})")]
	RegistrationClosed {
		/// Kind name that arrived too late.
		name: String,
	},
	/// A custom operation table supplies only one half of a paired operation.
	#[error("kind {name}: {first} is provided without {second}")]
	MismatchedOps {
		/// Kind name.
		name: String,
		/// Operation that was supplied.
		first: &'static str,
		/// Operation that is missing.
		second: &'static str,
	},
	/// The custom kind tag space is exhausted.
	#[error("too many property kinds registered (max tag {max})")]
	KindTagsExhausted {
		/// Highest usable tag.
		max: u16,
	},
	/// Two descriptors of one table share a name.
	#[error("duplicate property {name} in {type_name}")]
	DuplicateProperty {
		/// Object type owning the table.
		type_name: String,
		/// Duplicated property name.
		name: String,
	},
	/// Container begin/end markers do not pair up.
	#[error("unbalanced {marker} marker at {name} in {type_name}")]
	UnbalancedContainer {
		/// Object type owning the table.
		type_name: String,
		/// Marker descriptor name.
		name: String,
		/// Marker kind label.
		marker: &'static str,
	},
	/// Extra data does not fit the descriptor's kind.
	#[error("property {name} of kind {kind} cannot carry {extra} extra data")]
	ExtraMismatch {
		/// Property name.
		name: String,
		/// Kind label.
		kind: String,
		/// Extra data label.
		extra: &'static str,
	},
	/// A record array descriptor lacks its record description.
	#[error("property {name} of kind {kind} needs a record description")]
	MissingRecordExtra {
		/// Property name.
		name: String,
		/// Kind label.
		kind: String,
	},
	/// A descriptor references a kind that is not registered.
	#[error("property {name} uses unregistered kind tag {tag}")]
	UnknownKind {
		/// Property name.
		name: String,
		/// Kind tag.
		tag: u16,
	},
	/// Handler insertion named a property that is not in the table.
	#[error("no property {name} in {type_name} to attach a handler to")]
	HandlerTargetMissing {
		/// Object type owning the table.
		type_name: String,
		/// Requested property.
		name: String,
	},
	/// An object type with this name is already in the catalog.
	#[error("object type already registered: {name}")]
	DuplicateObjectType {
		/// Offending type name.
		name: String,
	},
	/// The object catalog does not know this type.
	#[error("unknown object type: {name}")]
	UnknownObjectType {
		/// Requested type name.
		name: String,
	},
	/// No object with this id exists.
	#[error("object not found: {id}")]
	ObjectNotFound {
		/// Requested id.
		id: ObjectId,
	},
	/// A change record was applied to a different object than it captured.
	#[error("change recorded for object {expected} applied to object {got}")]
	ChangeTargetMismatch {
		/// Object the change belongs to.
		expected: ObjectId,
		/// Object it was applied to.
		got: ObjectId,
	},
	/// Properties were copied between objects of different types.
	#[error("cannot copy properties from {src} to {dest}")]
	CopyTypeMismatch {
		/// Source object type.
		src: String,
		/// Destination object type.
		dest: String,
	},
	/// Unknown leading document magic.
	#[error("not a property document (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Unsupported document format version.
	#[error("unsupported document version {version} (expected {expected})")]
	UnsupportedVersion {
		/// Version found in the document.
		version: u32,
		/// Version this build writes.
		expected: u32,
	},
	/// A property name given on the command line is not part of the object.
	#[error("{type_name} has no property {name}")]
	PropertyNotFound {
		/// Object type.
		type_name: String,
		/// Requested property.
		name: String,
	},
	/// A textual value could not be converted for a property.
	#[error("invalid value for {name} ({kind}): {value}")]
	InvalidValue {
		/// Property name.
		name: String,
		/// Kind label.
		kind: String,
		/// User-provided text.
		value: String,
	},
}
