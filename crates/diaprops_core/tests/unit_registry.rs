#![allow(missing_docs)]

use diaprops::props::kind::{BUILTIN_KIND_COUNT, KindTag};
use diaprops::props::{
	CustomKindOps, CustomValue, KindTable, PropError, PropertyKind, close_registration, kind_by_name, lookup_kind, register_kind, registered_kinds,
	registration_closed,
};

#[derive(Debug, Clone, PartialEq)]
struct Tuple(i32, i32);

fn origin() -> CustomValue {
	CustomValue::new(Tuple(0, 0))
}

// One test owns the process-wide registry so the closing step cannot race
// other registrations in this binary.
#[test]
fn process_registry_lifecycle() {
	assert!(!registration_closed());
	let tuple = register_kind(CustomKindOps::new("tuple", origin)).expect("tuple registers");
	assert_eq!(tuple, PropertyKind::Custom(KindTag(BUILTIN_KIND_COUNT)));
	assert_eq!(tuple.name(), "tuple");
	let pair = register_kind(CustomKindOps::new("pair", origin)).expect("pair registers");
	assert_eq!(pair, PropertyKind::Custom(KindTag(BUILTIN_KIND_COUNT + 1)));
	assert!(matches!(lookup_kind(pair), KindTable::Custom(ops) if ops.name == "pair"));
	assert_eq!(kind_by_name("tuple"), Some(tuple));
	assert!(registered_kinds().iter().any(|(kind, name)| *kind == tuple && name == "tuple"));
	assert!(matches!(lookup_kind(tuple), KindTable::Custom(ops) if ops.name == "tuple"));

	assert!(matches!(
		register_kind(CustomKindOps::new("tuple", origin)),
		Err(PropError::DuplicateKind { .. })
	));

	assert!(matches!(lookup_kind(PropertyKind::Custom(KindTag(u16::MAX))), KindTable::Empty));

	close_registration();
	assert!(registration_closed());
	assert!(matches!(
		register_kind(CustomKindOps::new("late", origin)),
		Err(PropError::RegistrationClosed { .. })
	));
	assert_eq!(kind_by_name("late"), None);
}
