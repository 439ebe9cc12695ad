#![allow(missing_docs)]

use std::sync::Arc;

use diaprops::props::{
	Color, Diagnostics, Document, DocumentOptions, LineStyle, LineStyleKind, ObjectId, PropValue, Warning, describe_objects, prop_by_name,
};
use diaprops::shapes::standard_catalog;
use diaprops_testkit::{fixture_path, read_json_fixture};

fn open_board(diag: &mut Diagnostics) -> Document {
	let catalog = Arc::new(standard_catalog().expect("catalog builds"));
	let (document, _) = Document::open(catalog, fixture_path("board.json"), &DocumentOptions::default(), diag).expect("board opens");
	document
}

#[test]
fn board_loads_known_objects_and_skips_the_rest() {
	let mut diag = Diagnostics::new();
	let document = open_board(&mut diag);

	assert_eq!(document.len(), 2);
	assert_eq!(
		diag.warnings(),
		[Warning::UnknownObjectType {
			id: 2,
			type_name: "Flowchart - Diamond".into(),
		}]
	);

	let rect = document.get(ObjectId(1)).expect("box present");
	assert_eq!(
		prop_by_name(rect, "fill_colour", None).expect("fill").value,
		PropValue::Colour(Color::rgb(0xff, 0xe0, 0xa0))
	);
	assert_eq!(
		prop_by_name(rect, "line_style", None).expect("style").value,
		PropValue::LineStyle(LineStyle {
			style: LineStyleKind::Dashed,
			dash: 0.5,
		})
	);
	assert_eq!(prop_by_name(rect, "corner_radius", None).expect("radius").value, PropValue::Real(0.5));
}

#[test]
fn board_keeps_nested_operation_records() {
	let mut diag = Diagnostics::new();
	let document = open_board(&mut diag);
	let class = document.get(ObjectId(3)).expect("class present");

	let PropValue::Records(operations) = prop_by_name(class, "operations", None).expect("operations").value else {
		panic!("operations are records");
	};
	assert_eq!(operations.len(), 1);
	let parameters = operations[0].props().find("parameters").expect("parameters");
	let PropValue::Records(parameters) = &parameters.value else {
		panic!("parameters are records");
	};
	assert_eq!(parameters.len(), 1);
	assert_eq!(
		parameters[0].props().find("name").expect("name").value,
		PropValue::String("source".into())
	);
}

#[test]
fn resaved_board_drops_only_the_unknown_object() {
	let mut diag = Diagnostics::new();
	let document = open_board(&mut diag);
	let tree = serde_json::to_value(document.to_tree(&DocumentOptions::default().codec, &mut diag)).expect("tree serializes");
	let fixture = read_json_fixture("board.json");

	let ids: Vec<u64> = tree["objects"].as_array().expect("objects").iter().filter_map(|object| object["id"].as_u64()).collect();
	assert_eq!(ids, [1, 3]);
	assert_eq!(tree["objects"][0], fixture["objects"][0]);
}

#[test]
fn box_and_class_share_the_outline_style() {
	let mut diag = Diagnostics::new();
	let document = open_board(&mut diag);
	let selection: Vec<_> = document.iter().collect();
	let common = describe_objects(&selection, diaprops::props::MergeOption::Intersection);
	for name in ["line_width", "line_colour", "fill_colour"] {
		assert!(common.find(name).is_some(), "{name} shared");
	}
	assert!(common.find("operations").is_none());
}
