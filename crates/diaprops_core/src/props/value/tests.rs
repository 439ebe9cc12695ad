use std::sync::Arc;

use crate::props::{
	CustomValue, DescriptorTable, Experience, PropDescriptor, PropFilter, PropFlags, PropValue, PropertyKind, PropertyList, Record, make_new_prop,
};

fn record_table() -> Arc<DescriptorTable> {
	Arc::new(
		DescriptorTable::builder("value test record")
			.push(PropDescriptor::new("value_test_cell", PropertyKind::Int))
			.build()
			.expect("record table builds"),
	)
}

#[test]
fn defaults_fit_their_kind() {
	for kind in crate::props::kind::BUILTIN_KINDS {
		let descr = match kind {
			PropertyKind::SArray => PropDescriptor::new("v", kind).with_static_records(record_table(), "cell", 2),
			PropertyKind::DArray => PropDescriptor::new("v", kind).with_records(record_table(), "cell"),
			_ => PropDescriptor::new("v", kind),
		};
		let value = PropValue::default_for(&descr);
		assert!(value.fits(kind), "default {} does not fit {kind}", value.shape_name());
	}
}

#[test]
fn static_arrays_start_with_their_fixed_length() {
	let descr = PropDescriptor::new("cells", PropertyKind::SArray).with_static_records(record_table(), "cell", 3);
	let PropValue::Records(records) = PropValue::default_for(&descr) else {
		panic!("expected records");
	};
	assert_eq!(records.len(), 3);
}

#[test]
fn record_copies_keep_their_id() {
	let record = Record::from_table(&record_table());
	let copy = record.clone();
	assert_eq!(record.id(), copy.id());

	let other = Record::from_table(&record_table());
	assert_ne!(record.id(), other.id());
	assert_eq!(record, other, "equality compares values, not ids");
}

#[test]
fn filters_select_descriptors() {
	let table = DescriptorTable::builder("filters")
		.push(PropDescriptor::new("value_test_shown", PropertyKind::Real).with_flags(PropFlags::VISIBLE))
		.push(PropDescriptor::new("value_test_hidden", PropertyKind::Real).with_flags(PropFlags::DONT_SAVE))
		.build()
		.expect("table builds");

	assert_eq!(PropertyList::from_table(&table, PropFilter::All).len(), 2);
	assert_eq!(PropertyList::from_table(&table, PropFilter::Visible).names(), vec!["value_test_shown"]);
	assert_eq!(PropertyList::from_table(&table, PropFilter::DoSave).names(), vec!["value_test_shown"]);
}

#[test]
fn set_value_rejects_foreign_shapes_and_clears_notset() {
	let mut prop = make_new_prop("value_test_width", PropertyKind::Length, PropFlags::empty());
	prop.experience |= Experience::NOTSET;
	assert!(!prop.set_value(PropValue::Bool(true)));
	assert!(!prop.is_set());
	assert!(prop.set_value(PropValue::Real(2.5)));
	assert!(prop.is_set());
	assert_eq!(prop.value, PropValue::Real(2.5));
}

#[test]
fn synthetic_descriptors_are_cached_per_name_and_kind() {
	let a = make_new_prop("value_test_toggle", PropertyKind::Bool, PropFlags::empty());
	let b = make_new_prop("value_test_toggle", PropertyKind::Bool, PropFlags::VISIBLE);
	let c = make_new_prop("value_test_toggle", PropertyKind::Int, PropFlags::empty());
	assert!(Arc::ptr_eq(a.descr(), b.descr()));
	assert!(!Arc::ptr_eq(a.descr(), c.descr()));
	assert_eq!(a.quark(), c.quark());
}

#[test]
fn custom_values_compare_by_payload() {
	#[derive(Debug, Clone, PartialEq)]
	struct Tuple(u8, String);

	let a = CustomValue::new(Tuple(1, "x".into()));
	let b = CustomValue::new(Tuple(1, "x".into()));
	let c = CustomValue::new(7_u32);
	assert_eq!(a, b);
	assert_ne!(a, c);
	assert_eq!(a.clone().downcast_ref::<Tuple>().map(|t| t.0), Some(1));
	assert!(c.downcast_ref::<Tuple>().is_none());
}
