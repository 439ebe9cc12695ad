#![allow(missing_docs)]

use std::sync::{Arc, OnceLock};

use diaprops::props::{
	ChangeList, CodecOptions, DescriptorTable, Diagnostics, Experience, MergeOption, ObjectId, ObjectNode, ObjectStore, OffsetTable, PropDescriptor,
	PropFilter, PropFlags, PropValue, PropertyKind, PropertyList, PropertyObject, UndoOptions, UndoStack, can_be_merged, intersection, load_props,
	merge, prop_by_name, save_props, toggle_prop, union,
};
use diaprops::shapes::{Shape, UmlClass, UmlOperation, UmlParameter};

#[derive(Debug, Clone, PartialEq)]
struct Marker {
	id: ObjectId,
	visible: bool,
	size: f64,
}

fn marker_table() -> Arc<DescriptorTable> {
	static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
	TABLE
		.get_or_init(|| {
			Arc::new(
				DescriptorTable::builder("marker")
					.push(PropDescriptor::new("visible", PropertyKind::Bool).with_flags(PropFlags::VISIBLE))
					.push(PropDescriptor::new("size", PropertyKind::Real).with_flags(PropFlags::VISIBLE))
					.build()
					.expect("marker table builds"),
			)
		})
		.clone()
}

fn marker_offsets() -> &'static OffsetTable<Marker> {
	static OFFSETS: OnceLock<OffsetTable<Marker>> = OnceLock::new();
	OFFSETS.get_or_init(|| {
		OffsetTable::new("marker")
			.field("visible", PropertyKind::Bool, |m: &Marker| &m.visible, |m: &mut Marker| &mut m.visible)
			.field("size", PropertyKind::Real, |m: &Marker| &m.size, |m: &mut Marker| &mut m.size)
	})
}

impl PropertyObject for Marker {
	fn id(&self) -> ObjectId {
		self.id
	}

	fn type_name(&self) -> &str {
		"marker"
	}

	fn describe(&self) -> Arc<DescriptorTable> {
		marker_table()
	}

	fn get_props(&self, props: &mut PropertyList, diag: &mut Diagnostics) -> bool {
		marker_offsets().get_props_with(self, props, diag)
	}

	fn set_props(&mut self, props: &PropertyList, diag: &mut Diagnostics) -> bool {
		marker_offsets().set_props_with(self, props, diag)
	}
}

struct Markers(Vec<Marker>);

impl ObjectStore for Markers {
	fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn PropertyObject> {
		self.0.iter_mut().find(|marker| marker.id == id).map(|marker| marker as &mut dyn PropertyObject)
	}
}

#[test]
fn unsaved_values_come_back_as_defaults() {
	let table = DescriptorTable::builder("scenario a")
		.push(PropDescriptor::new("line_width", PropertyKind::Real).with_flags(PropFlags::VISIBLE))
		.push(PropDescriptor::new("name", PropertyKind::String).with_flags(PropFlags::VISIBLE | PropFlags::DONT_SAVE))
		.build()
		.expect("table builds");

	let mut props = PropertyList::from_table(&table, PropFilter::All);
	assert!(props.find_mut("line_width").expect("present").set_value(PropValue::Real(0.1)));
	assert!(props.find_mut("name").expect("present").set_value(PropValue::String("x".into())));

	let mut node = ObjectNode::new("scenario a", 1);
	save_props(&props, &mut node, &CodecOptions::default());

	let mut loaded = PropertyList::from_table(&table, PropFilter::All);
	let mut diag = Diagnostics::new();
	load_props(&mut loaded, &node, &CodecOptions::default(), &mut diag);
	assert!(diag.is_empty(), "{:?}", diag.warnings());
	assert_eq!(loaded.find("line_width").expect("present").value, PropValue::Real(0.1));
	assert_eq!(loaded.find("name").expect("present").value, PropValue::String(String::new()));
}

#[test]
fn intersection_keeps_only_the_shared_fill() {
	let a = DescriptorTable::builder("a")
		.push(PropDescriptor::new("fill_colour", PropertyKind::Colour).with_flags(PropFlags::VISIBLE))
		.push(PropDescriptor::new("text", PropertyKind::String))
		.build()
		.expect("a builds");
	let b = DescriptorTable::builder("b")
		.push(PropDescriptor::new("fill_colour", PropertyKind::Colour).with_flags(PropFlags::VISIBLE))
		.push(PropDescriptor::new("corner_radius", PropertyKind::Real))
		.build()
		.expect("b builds");

	let common = intersection([&a, &b]);
	assert_eq!(common.names(), ["fill_colour"]);

	let all = union([&a, &b]);
	assert_eq!(all.names(), ["fill_colour", "text", "corner_radius"]);
	assert!(common.iter().all(|desc| all.find(desc.name()).is_some()));
	assert!(can_be_merged(&a.descs()[0], &b.descs()[0]));

	let same = merge([&a, &a], MergeOption::Union);
	assert_eq!(same.names(), a.names());
}

#[test]
fn three_parameters_keep_their_order() {
	let mut class = UmlClass::new(ObjectId(1));
	class.operations.push(UmlOperation {
		name: "draw".into(),
		parameters: ["canvas", "style", "clip"]
			.into_iter()
			.enumerate()
			.map(|(at, name)| UmlParameter {
				name: name.into(),
				type_name: format!("T{at}"),
				kind: at as i32,
				..UmlParameter::default()
			})
			.collect(),
		..UmlOperation::default()
	});

	let mut diag = Diagnostics::new();
	let mut node = ObjectNode::new(UmlClass::TYPE_NAME, 1);
	diaprops::props::save_object_props(&class, &mut node, &CodecOptions::default(), &mut diag);
	let mut loaded = UmlClass::new(ObjectId(1));
	assert!(diaprops::props::load_object_props(&mut loaded, &node, &CodecOptions::default(), &mut diag));

	let names: Vec<&str> = loaded.operations[0].parameters.iter().map(|param| param.name.as_str()).collect();
	assert_eq!(names, ["canvas", "style", "clip"]);
	assert_eq!(loaded.operations, class.operations);
}

#[test]
fn revert_twice_redoes_the_toggle() {
	let mut marker = Marker {
		id: ObjectId(1),
		visible: true,
		size: 1.5,
	};
	let mut diag = Diagnostics::new();
	let mut change = toggle_prop(&mut marker, "visible", false, &mut diag);
	assert!(!marker.visible);

	change.revert(&mut marker, &mut diag).expect("reverts");
	assert!(marker.visible);
	change.revert(&mut marker, &mut diag).expect("redoes");
	assert!(!marker.visible);
	assert_eq!(marker.size, 1.5);
}

#[test]
fn reflection_round_trip_changes_nothing() {
	let mut marker = Marker {
		id: ObjectId(4),
		visible: false,
		size: 2.25,
	};
	let before = marker.clone();
	let mut diag = Diagnostics::new();
	let mut props = PropertyList::from_table(&marker_table(), PropFilter::All);
	assert!(marker.get_props(&mut props, &mut diag));
	assert!(props.iter().all(|prop| prop.experience.contains(Experience::GET_FROM_HOST)));
	assert!(marker.set_props(&props, &mut diag));
	assert_eq!(marker, before);
}

#[test]
fn undo_history_walks_a_selection() {
	let mut store = Markers(vec![
		Marker {
			id: ObjectId(1),
			visible: true,
			size: 1.0,
		},
		Marker {
			id: ObjectId(2),
			visible: true,
			size: 2.0,
		},
	]);
	let mut diag = Diagnostics::new();
	let mut undo = UndoStack::new(UndoOptions::default());

	let changes: ChangeList = store.0.iter_mut().map(|marker| toggle_prop(marker, "visible", false, &mut diag)).collect();
	undo.push(changes);
	assert!(store.0.iter().all(|marker| !marker.visible));

	assert!(undo.undo(&mut store, &mut diag).expect("undoes"));
	assert!(store.0.iter().all(|marker| marker.visible));
	assert!(undo.can_redo());
	assert!(undo.redo(&mut store, &mut diag).expect("redoes"));
	assert!(store.0.iter().all(|marker| !marker.visible));

	let visible = prop_by_name(&store.0[1], "visible", Some(PropertyKind::Bool)).expect("has visible");
	assert_eq!(visible.value, PropValue::Bool(false));
}
