use thiserror::Error;

/// Recoverable problem noticed while moving property values around.
///
/// Warnings never abort an operation: the affected slot keeps its default
/// value and processing continues with the next property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
	/// Property name absent from a host's field table.
	#[error("{type_name} has no field for property {name} ({kind})")]
	LookupMiss {
		/// Host type name.
		type_name: String,
		/// Property name.
		name: String,
		/// Property kind label.
		kind: String,
	},
	/// Value kind disagrees with the kind on the other side of a boundary.
	#[error("kind mismatch for {name}: expected {expected}, got {got}")]
	KindMismatch {
		/// Property name.
		name: String,
		/// Kind the receiving side wants.
		expected: String,
		/// Kind that was offered.
		got: String,
	},
	/// Operation on a kind tag that no registry entry covers.
	#[error("unregistered property kind tag {tag} for {name}")]
	UnregisteredKind {
		/// Property name.
		name: String,
		/// Offending tag.
		tag: u16,
	},
	/// Attribute missing from a persisted node.
	#[error("no attribute {name} ({kind}) or no data in it")]
	MissingAttribute {
		/// Property name.
		name: String,
		/// Property kind label.
		kind: String,
	},
	/// Literal text could not be read as the requested type.
	#[error("bad literal for {name} ({kind}): {detail}")]
	BadLiteral {
		/// Property name.
		name: String,
		/// Property kind label.
		kind: String,
		/// Parse failure description.
		detail: String,
	},
	/// Record array exceeded the configured record ceiling.
	#[error("record array {name} truncated to {max} records")]
	TooManyRecords {
		/// Property name.
		name: String,
		/// Ceiling applied.
		max: usize,
	},
	/// Widget container markers did not pair up while building a dialog.
	#[error("unbalanced container marker {name}")]
	UnbalancedContainer {
		/// Marker descriptor name.
		name: String,
	},
	/// A persisted object names a type the catalog does not know.
	#[error("skipping object {id} of unknown type {type_name}")]
	UnknownObjectType {
		/// Persisted object id.
		id: u32,
		/// Persisted type name.
		type_name: String,
	},
	/// A persisted object reuses the id of an earlier one.
	#[error("skipping object {id} of type {type_name}: id already taken")]
	DuplicateObjectId {
		/// Persisted object id.
		id: u32,
		/// Persisted type name.
		type_name: String,
	},
}

/// Collector for [`Warning`] values emitted by one operation.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
	warnings: Vec<Warning>,
}

impl Diagnostics {
	/// Create an empty collector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record one warning.
	pub fn warn(&mut self, warning: Warning) {
		self.warnings.push(warning);
	}

	/// Warnings collected so far, oldest first.
	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}

	/// True when nothing was reported.
	pub fn is_empty(&self) -> bool {
		self.warnings.is_empty()
	}

	/// Number of collected warnings.
	pub fn len(&self) -> usize {
		self.warnings.len()
	}

	/// Take all collected warnings, leaving the collector empty.
	pub fn drain(&mut self) -> Vec<Warning> {
		std::mem::take(&mut self.warnings)
	}
}
