use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::props::kind::{BUILTIN_KIND_COUNT, BUILTIN_KINDS, KindTag};
use crate::props::{AttributeNode, CustomValue, DataError, PropDescriptor, PropError, PropValue, PropertyKind, Result, WidgetSpec};

/// Creates the default payload of a custom kind.
pub type NewValueFn = fn() -> CustomValue;
/// Reads a custom payload from a persisted attribute.
pub type LoadFn = fn(&AttributeNode) -> std::result::Result<CustomValue, DataError>;
/// Writes a custom payload into a persisted attribute.
pub type SaveFn = fn(&CustomValue, &mut AttributeNode);
/// Describes the dialog control a custom kind wants.
pub type GetWidgetFn = fn(&PropDescriptor) -> WidgetSpec;
/// Converts what a dialog control returned into a custom payload.
pub type SetFromWidgetFn = fn(&PropValue) -> Option<CustomValue>;
/// Decides whether two descriptors of the kind may be merged.
pub type CanMergeFn = fn(&PropDescriptor, &PropDescriptor) -> bool;

/// Operation table of a kind registered at runtime.
///
/// Copying and freeing payloads are `Clone` and `Drop` on [`CustomValue`].
#[derive(Debug, Clone)]
pub struct CustomKindOps {
	/// Unique kind name.
	pub name: String,
	/// Default payload constructor.
	pub new_value: NewValueFn,
	/// Persisted form reader; paired with `save`.
	pub load: Option<LoadFn>,
	/// Persisted form writer; paired with `load`.
	pub save: Option<SaveFn>,
	/// Dialog control description; paired with `set_from_widget`.
	pub get_widget: Option<GetWidgetFn>,
	/// Dialog control reader; paired with `get_widget`.
	pub set_from_widget: Option<SetFromWidgetFn>,
	/// Merge compatibility check; merges freely when absent.
	pub can_merge: Option<CanMergeFn>,
}

impl CustomKindOps {
	/// Operation table with only a payload constructor.
	pub fn new(name: impl Into<String>, new_value: NewValueFn) -> Self {
		Self {
			name: name.into(),
			new_value,
			load: None,
			save: None,
			get_widget: None,
			set_from_widget: None,
			can_merge: None,
		}
	}

	/// Add the persistence pair.
	pub fn with_codec(mut self, load: LoadFn, save: SaveFn) -> Self {
		self.load = Some(load);
		self.save = Some(save);
		self
	}

	/// Add the dialog pair.
	pub fn with_widget(mut self, get_widget: GetWidgetFn, set_from_widget: SetFromWidgetFn) -> Self {
		self.get_widget = Some(get_widget);
		self.set_from_widget = Some(set_from_widget);
		self
	}

	/// Add a merge check.
	pub fn with_can_merge(mut self, can_merge: CanMergeFn) -> Self {
		self.can_merge = Some(can_merge);
		self
	}

	fn check_pairs(&self) -> Result<()> {
		let pair = |first: bool, second: bool, first_name, second_name| {
			if first && !second {
				Err(PropError::MismatchedOps {
					name: self.name.clone(),
					first: first_name,
					second: second_name,
				})
			} else {
				Ok(())
			}
		};
		pair(self.load.is_some(), self.save.is_some(), "load", "save")?;
		pair(self.save.is_some(), self.load.is_some(), "save", "load")?;
		pair(self.get_widget.is_some(), self.set_from_widget.is_some(), "get_widget", "set_from_widget")?;
		pair(self.set_from_widget.is_some(), self.get_widget.is_some(), "set_from_widget", "get_widget")
	}
}

/// Result of a registry lookup.
#[derive(Debug, Clone)]
pub enum KindTable {
	/// Built-in kind handled by the library itself.
	Builtin(PropertyKind),
	/// Custom kind with its operation table.
	Custom(Arc<CustomKindOps>),
	/// Tag not covered by any registration.
	Empty,
}

/// Registry of property kinds, with an explicit registration phase.
///
/// Custom tags are only meaningful to the registry that allocated them, and
/// every operation resolves tags through the process-wide instance, so this
/// type stays private to the crate.
#[derive(Debug, Default)]
pub(crate) struct TypeRegistry {
	custom: Vec<Arc<CustomKindOps>>,
	closed: bool,
}

impl TypeRegistry {
	/// Registry holding only the built-in kinds.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a custom kind and allocate its tag.
	pub fn register(&mut self, ops: CustomKindOps) -> Result<PropertyKind> {
		if self.closed {
			return Err(PropError::RegistrationClosed { name: ops.name });
		}
		if self.kind_by_name(&ops.name).is_some() {
			return Err(PropError::DuplicateKind { name: ops.name });
		}
		ops.check_pairs()?;

		let tag = usize::from(BUILTIN_KIND_COUNT) + self.custom.len();
		let tag = u16::try_from(tag).map_err(|_| PropError::KindTagsExhausted { max: u16::MAX })?;
		self.custom.push(Arc::new(ops));
		Ok(PropertyKind::Custom(KindTag(tag)))
	}

	/// End the registration phase; later registrations fail.
	pub fn close(&mut self) {
		self.closed = true;
	}

	/// True once [`TypeRegistry::close`] was called.
	pub fn is_closed(&self) -> bool {
		self.closed
	}

	/// Operation table for `kind`.
	pub fn lookup(&self, kind: PropertyKind) -> KindTable {
		self.lookup_tag(kind.tag())
	}

	/// Operation table for a raw tag; [`KindTable::Empty`] when unknown.
	pub fn lookup_tag(&self, tag: KindTag) -> KindTable {
		if let Some(kind) = PropertyKind::builtin(tag) {
			return KindTable::Builtin(kind);
		}
		usize::from(tag.0)
			.checked_sub(usize::from(BUILTIN_KIND_COUNT))
			.and_then(|index| self.custom.get(index))
			.map_or(KindTable::Empty, |ops| KindTable::Custom(ops.clone()))
	}

	/// Kind registered under `name`, built-ins included.
	pub fn kind_by_name(&self, name: &str) -> Option<PropertyKind> {
		if let Some(kind) = BUILTIN_KINDS.iter().copied().find(|kind| kind.builtin_name() == Some(name)) {
			return Some(kind);
		}
		self.custom
			.iter()
			.position(|ops| ops.name == name)
			.map(|index| PropertyKind::Custom(KindTag(BUILTIN_KIND_COUNT + index as u16)))
	}

	/// Every kind with its name, in tag order.
	pub fn kinds(&self) -> Vec<(PropertyKind, String)> {
		let builtin = BUILTIN_KINDS.iter().map(|kind| (*kind, kind.builtin_name().unwrap_or_default().to_owned()));
		let custom = self
			.custom
			.iter()
			.enumerate()
			.map(|(index, ops)| (PropertyKind::Custom(KindTag(BUILTIN_KIND_COUNT + index as u16)), ops.name.clone()));
		builtin.chain(custom).collect()
	}
}

fn global() -> &'static RwLock<TypeRegistry> {
	static REGISTRY: OnceLock<RwLock<TypeRegistry>> = OnceLock::new();
	REGISTRY.get_or_init(|| RwLock::new(TypeRegistry::new()))
}

/// Register a custom kind in the process-wide registry.
pub fn register_kind(ops: CustomKindOps) -> Result<PropertyKind> {
	global().write().unwrap_or_else(PoisonError::into_inner).register(ops)
}

/// Close the process-wide registration phase.
pub fn close_registration() {
	global().write().unwrap_or_else(PoisonError::into_inner).close();
}

/// True once the process-wide registration phase was closed.
pub fn registration_closed() -> bool {
	global().read().unwrap_or_else(PoisonError::into_inner).is_closed()
}

/// Look `kind` up in the process-wide registry.
pub fn lookup_kind(kind: PropertyKind) -> KindTable {
	global().read().unwrap_or_else(PoisonError::into_inner).lookup(kind)
}

/// Resolve a kind name in the process-wide registry.
pub fn kind_by_name(name: &str) -> Option<PropertyKind> {
	global().read().unwrap_or_else(PoisonError::into_inner).kind_by_name(name)
}

/// Every kind known to the process-wide registry.
pub fn registered_kinds() -> Vec<(PropertyKind, String)> {
	global().read().unwrap_or_else(PoisonError::into_inner).kinds()
}

#[cfg(test)]
mod tests {
	use super::{CustomKindOps, KindTable, TypeRegistry};
	use crate::props::kind::{BUILTIN_KIND_COUNT, KindTag};
	use crate::props::{AttributeNode, CustomValue, DataError, PropError, PropertyKind};

	fn zero() -> CustomValue {
		CustomValue::new(0_u8)
	}

	fn load(_: &AttributeNode) -> Result<CustomValue, DataError> {
		Ok(zero())
	}

	fn save(_: &CustomValue, _: &mut AttributeNode) {}

	#[test]
	fn custom_tags_follow_the_builtin_range() {
		let mut registry = TypeRegistry::new();
		let first = registry.register(CustomKindOps::new("umlparameter", zero)).expect("first registers");
		let second = registry.register(CustomKindOps::new("umlattribute", zero)).expect("second registers");
		assert_eq!(first, PropertyKind::Custom(KindTag(BUILTIN_KIND_COUNT)));
		assert_eq!(second, PropertyKind::Custom(KindTag(BUILTIN_KIND_COUNT + 1)));
		assert_eq!(registry.kind_by_name("umlattribute"), Some(second));
		assert!(matches!(registry.lookup(first), KindTable::Custom(ops) if ops.name == "umlparameter"));
	}

	#[test]
	fn duplicate_names_are_rejected() {
		let mut registry = TypeRegistry::new();
		registry.register(CustomKindOps::new("tuple", zero)).expect("first registers");
		assert!(matches!(
			registry.register(CustomKindOps::new("tuple", zero)),
			Err(PropError::DuplicateKind { .. })
		));
		assert!(matches!(
			registry.register(CustomKindOps::new("colour", zero)),
			Err(PropError::DuplicateKind { .. })
		));
	}

	#[test]
	fn unpaired_operations_are_rejected() {
		let mut registry = TypeRegistry::new();
		let mut ops = CustomKindOps::new("half", zero);
		ops.load = Some(load);
		assert!(matches!(
			registry.register(ops),
			Err(PropError::MismatchedOps { first: "load", second: "save", .. })
		));

		let mut ops = CustomKindOps::new("half", zero);
		ops.save = Some(save);
		assert!(matches!(registry.register(ops), Err(PropError::MismatchedOps { first: "save", .. })));

		let paired = CustomKindOps::new("half", zero).with_codec(load, save);
		assert!(registry.register(paired).is_ok());
	}

	#[test]
	fn unknown_tags_look_up_as_empty() {
		let registry = TypeRegistry::new();
		assert!(matches!(registry.lookup_tag(KindTag(BUILTIN_KIND_COUNT)), KindTable::Empty));
		assert!(matches!(registry.lookup_tag(KindTag(u16::MAX)), KindTable::Empty));
		assert!(matches!(registry.lookup(PropertyKind::Dict), KindTable::Builtin(PropertyKind::Dict)));
	}

	#[test]
	fn closed_registry_refuses_new_kinds() {
		let mut registry = TypeRegistry::new();
		registry.close();
		assert!(registry.is_closed());
		assert!(matches!(
			registry.register(CustomKindOps::new("late", zero)),
			Err(PropError::RegistrationClosed { .. })
		));
	}
}
