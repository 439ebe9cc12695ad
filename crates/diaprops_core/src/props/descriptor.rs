use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use crate::props::kind::MarkerRole;
use crate::props::registry::{KindTable, lookup_kind};
use crate::props::{HandlerChain, HandlerId, PropError, PropFlags, PropertyKind, Quark, Result};

/// One item of an enum descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumItem {
	/// Display label.
	pub label: String,
	/// Persisted value.
	pub value: i32,
}

impl EnumItem {
	/// Construct an item.
	pub fn new(label: impl Into<String>, value: i32) -> Self {
		Self { label: label.into(), value }
	}
}

/// Bounds and step for numeric descriptors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
	/// Lower bound.
	pub min: f64,
	/// Upper bound.
	pub max: f64,
	/// Increment used by spin controls.
	pub step: f64,
}

impl NumberRange {
	/// Construct a range.
	pub const fn new(min: f64, max: f64, step: f64) -> Self {
		Self { min, max, step }
	}

	/// Clamp `value` into the range.
	pub fn clamp(&self, value: f64) -> f64 {
		value.clamp(self.min, self.max)
	}
}

impl Default for NumberRange {
	fn default() -> Self {
		Self::new(f64::MIN, f64::MAX, 1.0)
	}
}

/// Description of the records held by an SArray or DArray descriptor.
#[derive(Debug, Clone)]
pub struct RecordArrayExtra {
	/// Descriptor table of one record.
	pub record: Arc<DescriptorTable>,
	/// Composite type name written for each persisted record.
	pub composite_type: String,
	/// Fixed record count for SArray descriptors.
	pub static_len: Option<usize>,
}

/// Kind-specific data attached to a descriptor.
#[derive(Debug, Clone, Default)]
pub enum PropExtra {
	/// Nothing extra.
	#[default]
	None,
	/// Items of an enum or enum array.
	Enum(Arc<[EnumItem]>),
	/// Range of a numeric value.
	Number(NumberRange),
	/// Record layout of a record array.
	Records(RecordArrayExtra),
	/// Action run when a button is pressed.
	Button(HandlerId),
}

impl PropExtra {
	fn label(&self) -> &'static str {
		match self {
			Self::None => "no",
			Self::Enum(_) => "enum",
			Self::Number(_) => "number",
			Self::Records(_) => "record",
			Self::Button(_) => "button",
		}
	}

	/// Record layout, for record array descriptors.
	pub fn records(&self) -> Option<&RecordArrayExtra> {
		match self {
			Self::Records(extra) => Some(extra),
			_ => None,
		}
	}

	/// Enum items, for enum descriptors.
	pub fn enum_items(&self) -> Option<&[EnumItem]> {
		match self {
			Self::Enum(items) => Some(items),
			_ => None,
		}
	}
}

/// Static description of one property of an object type.
#[derive(Debug, Clone)]
pub struct PropDescriptor {
	name: String,
	kind: PropertyKind,
	flags: PropFlags,
	label: String,
	tooltip: Option<String>,
	extra: PropExtra,
	handlers: HandlerChain,
	quark: OnceLock<Quark>,
}

impl PropDescriptor {
	/// Descriptor with no flags, labelled with its own name.
	pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
		let name = name.into();
		Self {
			label: name.clone(),
			name,
			kind,
			flags: PropFlags::empty(),
			tooltip: None,
			extra: PropExtra::None,
			handlers: HandlerChain::default(),
			quark: OnceLock::new(),
		}
	}

	/// Set the flags.
	pub fn with_flags(mut self, flags: PropFlags) -> Self {
		self.flags = flags;
		self
	}

	/// Set the dialog label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Set the dialog tooltip.
	pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
		self.tooltip = Some(tooltip.into());
		self
	}

	/// Attach kind-specific data.
	pub fn with_extra(mut self, extra: PropExtra) -> Self {
		self.extra = extra;
		self
	}

	/// Attach enum items.
	pub fn with_enum(self, items: impl IntoIterator<Item = EnumItem>) -> Self {
		self.with_extra(PropExtra::Enum(items.into_iter().collect()))
	}

	/// Attach a numeric range.
	pub fn with_range(self, range: NumberRange) -> Self {
		self.with_extra(PropExtra::Number(range))
	}

	/// Attach a DArray record layout.
	pub fn with_records(self, record: Arc<DescriptorTable>, composite_type: impl Into<String>) -> Self {
		self.with_extra(PropExtra::Records(RecordArrayExtra {
			record,
			composite_type: composite_type.into(),
			static_len: None,
		}))
	}

	/// Attach an SArray record layout with a fixed record count.
	pub fn with_static_records(self, record: Arc<DescriptorTable>, composite_type: impl Into<String>, len: usize) -> Self {
		self.with_extra(PropExtra::Records(RecordArrayExtra {
			record,
			composite_type: composite_type.into(),
			static_len: Some(len),
		}))
	}

	/// Install the initial event handler.
	pub fn with_handler(mut self, handler: HandlerId) -> Self {
		self.handlers = HandlerChain::new(Some(handler));
		self
	}

	/// Property name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Property kind.
	pub fn kind(&self) -> PropertyKind {
		self.kind
	}

	/// Behaviour flags.
	pub fn flags(&self) -> PropFlags {
		self.flags
	}

	/// Dialog label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Dialog tooltip.
	pub fn tooltip(&self) -> Option<&str> {
		self.tooltip.as_deref()
	}

	/// Kind-specific data.
	pub fn extra(&self) -> &PropExtra {
		&self.extra
	}

	/// Installed event handlers.
	pub fn handlers(&self) -> &HandlerChain {
		&self.handlers
	}

	/// Interned name, computed on first use.
	pub fn quark(&self) -> Quark {
		*self.quark.get_or_init(|| Quark::intern(&self.name))
	}

	/// True when every flag in `flags` is set.
	pub fn has_flags(&self, flags: PropFlags) -> bool {
		self.flags.contains(flags)
	}

	fn check_extra(&self) -> Result<()> {
		let fits = match (&self.extra, self.kind) {
			(PropExtra::None, PropertyKind::SArray | PropertyKind::DArray) => {
				return Err(PropError::MissingRecordExtra {
					name: self.name.clone(),
					kind: self.kind.to_string(),
				});
			}
			(PropExtra::None, _) => true,
			(PropExtra::Enum(_), kind) => matches!(kind, PropertyKind::Enum | PropertyKind::EnumArray),
			(PropExtra::Number(_), kind) => matches!(
				kind,
				PropertyKind::Int | PropertyKind::IntArray | PropertyKind::Real | PropertyKind::Length | PropertyKind::FontSize
			),
			(PropExtra::Records(extra), PropertyKind::SArray) => extra.static_len.is_some(),
			(PropExtra::Records(extra), PropertyKind::DArray) => extra.static_len.is_none(),
			(PropExtra::Records(_), _) => false,
			(PropExtra::Button(_), kind) => kind == PropertyKind::Button,
		};
		if fits {
			Ok(())
		} else {
			Err(PropError::ExtraMismatch {
				name: self.name.clone(),
				kind: self.kind.to_string(),
				extra: self.extra.label(),
			})
		}
	}
}

/// Ordered, immutable descriptor list of one object type.
#[derive(Debug)]
pub struct DescriptorTable {
	type_name: String,
	descs: Vec<Arc<PropDescriptor>>,
	index: OnceLock<HashMap<Quark, usize>>,
}

impl DescriptorTable {
	/// Start building a table for `type_name`.
	pub fn builder(type_name: impl Into<String>) -> DescriptorTableBuilder {
		DescriptorTableBuilder {
			type_name: type_name.into(),
			descs: Vec::new(),
		}
	}

	/// Wrap descriptors that are already part of validated tables.
	pub(crate) fn from_shared(type_name: impl Into<String>, descs: Vec<Arc<PropDescriptor>>) -> Self {
		Self {
			type_name: type_name.into(),
			descs,
			index: OnceLock::new(),
		}
	}

	/// Object type this table describes.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Descriptors in declaration order.
	pub fn descs(&self) -> &[Arc<PropDescriptor>] {
		&self.descs
	}

	/// Iterate descriptors in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<PropDescriptor>> {
		self.descs.iter()
	}

	/// Number of descriptors.
	pub fn len(&self) -> usize {
		self.descs.len()
	}

	/// True when the table has no descriptors.
	pub fn is_empty(&self) -> bool {
		self.descs.is_empty()
	}

	fn index(&self) -> &HashMap<Quark, usize> {
		self.index
			.get_or_init(|| self.descs.iter().enumerate().map(|(at, desc)| (desc.quark(), at)).collect())
	}

	/// Position of the descriptor named by `quark`.
	pub fn position(&self, quark: Quark) -> Option<usize> {
		self.index().get(&quark).copied()
	}

	/// Descriptor named by `quark`.
	pub fn find_quark(&self, quark: Quark) -> Option<&Arc<PropDescriptor>> {
		self.position(quark).and_then(|at| self.descs.get(at))
	}

	/// Descriptor named `name`.
	pub fn find(&self, name: &str) -> Option<&Arc<PropDescriptor>> {
		Quark::lookup(name).and_then(|quark| self.find_quark(quark))
	}

	/// True when a descriptor named by `quark` exists.
	pub fn contains(&self, quark: Quark) -> bool {
		self.position(quark).is_some()
	}

	/// Descriptor names in order.
	pub fn names(&self) -> Vec<&str> {
		self.descs.iter().map(|desc| desc.name()).collect()
	}
}

/// Validating builder for [`DescriptorTable`].
#[derive(Debug, Clone)]
pub struct DescriptorTableBuilder {
	type_name: String,
	descs: Vec<PropDescriptor>,
}

impl DescriptorTableBuilder {
	/// Append one descriptor.
	pub fn push(mut self, desc: PropDescriptor) -> Self {
		self.descs.push(desc);
		self
	}

	/// Append copies of every descriptor in `table`.
	pub fn extend_from(mut self, table: &DescriptorTable) -> Self {
		self.descs.extend(table.iter().map(|desc| PropDescriptor::clone(desc)));
		self
	}

	/// Install `handler` on the descriptor named `name`, keeping the
	/// displaced handler in its chain.
	pub fn insert_handler(&mut self, name: &str, handler: Option<HandlerId>) -> Result<()> {
		let Some(desc) = self.descs.iter_mut().find(|desc| desc.name == name) else {
			return Err(PropError::HandlerTargetMissing {
				type_name: self.type_name.clone(),
				name: name.to_owned(),
			});
		};
		desc.handlers.insert(handler);
		Ok(())
	}

	/// Validate and close the table.
	pub fn build(self) -> Result<DescriptorTable> {
		let mut seen = HashSet::new();
		let mut open: Vec<(MarkerRole, &str)> = Vec::new();

		for desc in &self.descs {
			if !seen.insert(desc.quark()) {
				return Err(PropError::DuplicateProperty {
					type_name: self.type_name.clone(),
					name: desc.name.clone(),
				});
			}

			if let PropertyKind::Custom(tag) = desc.kind
				&& matches!(lookup_kind(desc.kind), KindTable::Empty)
			{
				return Err(PropError::UnknownKind {
					name: desc.name.clone(),
					tag: tag.0,
				});
			}
			desc.check_extra()?;

			let unbalanced = |marker| PropError::UnbalancedContainer {
				type_name: self.type_name.clone(),
				name: desc.name.clone(),
				marker,
			};
			match desc.kind.marker_role() {
				Some(role @ MarkerRole::Begin(_)) => open.push((role, desc.name.as_str())),
				Some(MarkerRole::Split(kind)) => {
					if !matches!(open.last(), Some((MarkerRole::Begin(top), _)) if *top == kind) {
						return Err(unbalanced(kind.as_str()));
					}
				}
				Some(MarkerRole::End(kind)) => match open.pop() {
					Some((MarkerRole::Begin(top), _)) if top == kind => {}
					_ => return Err(unbalanced(kind.as_str())),
				},
				None => {}
			}
		}

		if let Some((MarkerRole::Begin(kind) | MarkerRole::Split(kind) | MarkerRole::End(kind), name)) = open.pop() {
			return Err(PropError::UnbalancedContainer {
				type_name: self.type_name.clone(),
				name: name.to_owned(),
				marker: kind.as_str(),
			});
		}

		Ok(DescriptorTable {
			type_name: self.type_name,
			descs: self.descs.into_iter().map(Arc::new).collect(),
			index: OnceLock::new(),
		})
	}
}
