use std::collections::BTreeMap;
use std::sync::Arc;

use crate::props::{
	Arrow, ArrowType, AttributeHost, BezPoint, BezPointKind, CodecOptions, Color, CompositeNode, DataNode, DescriptorTable, Diagnostics, EnumItem, Experience,
	FontRef, ImageData, LineStyle, LineStyleKind, Matrix, ObjectNode, Point, PropDescriptor, PropFilter, PropFlags, PropValue, PropertyKind, PropertyList,
	Record, Rect, TextAlign, TextValue, Warning, load_props, save_props,
};

fn param_table() -> Arc<DescriptorTable> {
	Arc::new(
		DescriptorTable::builder("codec test parameter")
			.push(PropDescriptor::new("name", PropertyKind::String).with_flags(PropFlags::VISIBLE | PropFlags::OPTIONAL))
			.push(PropDescriptor::new("value", PropertyKind::String).with_flags(PropFlags::VISIBLE | PropFlags::OPTIONAL))
			.build()
			.expect("record table builds"),
	)
}

fn all_kinds_table() -> DescriptorTable {
	DescriptorTable::builder("codec test object")
		.push(PropDescriptor::new("c_char", PropertyKind::Char))
		.push(PropDescriptor::new("c_bool", PropertyKind::Bool))
		.push(PropDescriptor::new("c_int", PropertyKind::Int))
		.push(PropDescriptor::new("c_intarray", PropertyKind::IntArray))
		.push(PropDescriptor::new("c_enum", PropertyKind::Enum).with_enum([EnumItem::new("a", 0), EnumItem::new("b", 4)]))
		.push(PropDescriptor::new("c_enumarray", PropertyKind::EnumArray))
		.push(PropDescriptor::new("c_real", PropertyKind::Real))
		.push(PropDescriptor::new("c_length", PropertyKind::Length))
		.push(PropDescriptor::new("c_fontsize", PropertyKind::FontSize))
		.push(PropDescriptor::new("c_point", PropertyKind::Point))
		.push(PropDescriptor::new("c_pointarray", PropertyKind::PointArray))
		.push(PropDescriptor::new("c_bezpoint", PropertyKind::BezPoint))
		.push(PropDescriptor::new("c_bezpointarray", PropertyKind::BezPointArray))
		.push(PropDescriptor::new("c_rect", PropertyKind::Rect))
		.push(PropDescriptor::new("c_endpoints", PropertyKind::Endpoints))
		.push(PropDescriptor::new("c_numcp", PropertyKind::ConnPointLine))
		.push(PropDescriptor::new("c_string", PropertyKind::String))
		.push(PropDescriptor::new("c_file", PropertyKind::File))
		.push(PropDescriptor::new("c_multistring", PropertyKind::MultiString))
		.push(PropDescriptor::new("c_text", PropertyKind::Text))
		.push(PropDescriptor::new("c_linestyle", PropertyKind::LineStyle))
		.push(PropDescriptor::new("c_arrow", PropertyKind::Arrow))
		.push(PropDescriptor::new("c_colour", PropertyKind::Colour))
		.push(PropDescriptor::new("c_font", PropertyKind::Font))
		.push(PropDescriptor::new("c_static", PropertyKind::Static))
		.push(PropDescriptor::new("c_sarray", PropertyKind::SArray).with_static_records(param_table(), "cell", 2))
		.push(PropDescriptor::new("c_darray", PropertyKind::DArray).with_records(param_table(), "umlparameter"))
		.push(PropDescriptor::new("c_dict", PropertyKind::Dict))
		.push(PropDescriptor::new("c_matrix", PropertyKind::Matrix))
		.push(PropDescriptor::new("c_pixbuf", PropertyKind::Pixbuf))
		.build()
		.expect("table builds")
}

fn record(name: &str, value: &str) -> Record {
	let mut record = Record::from_table(&param_table());
	record.props_mut().find_mut("name").expect("name").value = PropValue::String(name.into());
	record.props_mut().find_mut("value").expect("value").value = PropValue::String(value.into());
	record
}

fn sample_values(table: &DescriptorTable) -> PropertyList {
	let mut props = PropertyList::from_table(table, PropFilter::All);
	let mut set = |name: &str, value: PropValue| {
		let prop = props.find_mut(name).expect("property exists");
		assert!(prop.set_value(value), "value fits {name}");
	};
	set("c_char", PropValue::Char('x'));
	set("c_bool", PropValue::Bool(true));
	set("c_int", PropValue::Int(-12));
	set("c_intarray", PropValue::IntArray(vec![1, 2, 3]));
	set("c_enum", PropValue::Int(4));
	set("c_enumarray", PropValue::IntArray(vec![0, 4]));
	set("c_real", PropValue::Real(0.1));
	set("c_length", PropValue::Real(1.0 / 3.0));
	set("c_fontsize", PropValue::Real(0.8));
	set("c_point", PropValue::Point(Point::new(1.25, -3.5)));
	set("c_pointarray", PropValue::PointArray(vec![Point::new(0.0, 0.0), Point::new(2.0, 1.0)]));
	set(
		"c_bezpoint",
		PropValue::BezPoint(BezPoint {
			kind: BezPointKind::LineTo,
			p1: Point::new(4.0, 5.0),
			..BezPoint::default()
		}),
	);
	set(
		"c_bezpointarray",
		PropValue::BezPointArray(vec![
			BezPoint {
				kind: BezPointKind::MoveTo,
				p1: Point::new(0.0, 0.0),
				..BezPoint::default()
			},
			BezPoint {
				kind: BezPointKind::CurveTo,
				p1: Point::new(1.0, 0.0),
				p2: Point::new(1.0, 1.0),
				p3: Point::new(0.0, 1.0),
			},
		]),
	);
	set("c_rect", PropValue::Rect(Rect::new(0.0, 0.5, 10.0, 20.25)));
	set("c_endpoints", PropValue::Endpoints([Point::new(0.0, 0.0), Point::new(3.0, 4.0)]));
	set("c_numcp", PropValue::Int(2));
	set("c_string", PropValue::String("hello".into()));
	set("c_file", PropValue::String("/tmp/image.png".into()));
	set("c_multistring", PropValue::String("line one\nline two".into()));
	set(
		"c_text",
		PropValue::Text(TextValue {
			string: "Label".into(),
			alignment: TextAlign::Center,
			colour: Color::rgb(10, 20, 30),
			..TextValue::default()
		}),
	);
	set(
		"c_linestyle",
		PropValue::LineStyle(LineStyle {
			style: LineStyleKind::DashDot,
			dash: 0.5,
		}),
	);
	set(
		"c_arrow",
		PropValue::Arrow(Arrow {
			kind: ArrowType::FilledTriangle,
			length: 0.8,
			width: 0.4,
		}),
	);
	set("c_colour", PropValue::Colour(Color::rgba(255, 128, 0, 200)));
	set(
		"c_font",
		PropValue::Font(FontRef {
			family: "monospace".into(),
			style: 3,
			name: "Courier".into(),
		}),
	);
	set("c_sarray", PropValue::Records(vec![record("a", "1"), record("b", "2")]));
	set("c_darray", PropValue::Records(vec![record("x", "10"), record("y", "20"), record("z", "30")]));
	set("c_dict", PropValue::Dict(BTreeMap::from([("author".into(), "me".into()), ("rev".into(), "7".into())])));
	set(
		"c_matrix",
		PropValue::Matrix(Some(Matrix {
			xx: 0.0,
			xy: -1.0,
			yx: 1.0,
			yy: 0.0,
			x0: 2.0,
			y0: 3.0,
		})),
	);
	set("c_pixbuf", PropValue::Image(Some(ImageData { bytes: (0..200).collect() })));
	props
}

fn save(props: &PropertyList) -> ObjectNode {
	let mut node = ObjectNode::new("codec test object", 1);
	save_props(props, &mut node, &CodecOptions::default());
	node
}

#[test]
fn every_kind_survives_save_load_save() {
	let table = all_kinds_table();
	let values = sample_values(&table);
	let saved = save(&values);

	let mut loaded = PropertyList::from_table(&table, PropFilter::All);
	let mut diag = Diagnostics::new();
	assert!(load_props(&mut loaded, &saved, &CodecOptions::default(), &mut diag));
	assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());

	assert_eq!(loaded, values);
	assert_eq!(save(&loaded), saved);
}

#[test]
fn records_keep_count_and_order() {
	let table = all_kinds_table();
	let saved = save(&sample_values(&table));
	let attr = saved.find_attribute("c_darray").expect("darray saved");
	assert_eq!(attr.len(), 3);
	let first = attr.data[0].as_composite().expect("composite record");
	assert_eq!(first.kind, "umlparameter");

	let mut loaded = PropertyList::from_table(&table, PropFilter::All);
	load_props(&mut loaded, &saved, &CodecOptions::default(), &mut Diagnostics::new());
	let PropValue::Records(records) = &loaded.find("c_darray").expect("darray").value else {
		panic!("expected records");
	};
	let names: Vec<_> = records
		.iter()
		.map(|record| record.props().find("name").map(|prop| prop.value.clone()))
		.collect();
	assert_eq!(
		names,
		vec![
			Some(PropValue::String("x".into())),
			Some(PropValue::String("y".into())),
			Some(PropValue::String("z".into()))
		]
	);
}

#[test]
fn dont_save_values_never_reach_the_tree() {
	let table = DescriptorTable::builder("scenario a")
		.push(PropDescriptor::new("line_width", PropertyKind::Real).with_flags(PropFlags::VISIBLE))
		.push(PropDescriptor::new("name", PropertyKind::String).with_flags(PropFlags::VISIBLE | PropFlags::DONT_SAVE))
		.build()
		.expect("table builds");

	let mut values = PropertyList::from_table(&table, PropFilter::All);
	values.find_mut("line_width").expect("line_width").value = PropValue::Real(0.1);
	values.find_mut("name").expect("name").value = PropValue::String("x".into());

	let saved = save(&values);
	assert!(saved.find_attribute("name").is_none());

	let mut loaded = PropertyList::from_table(&table, PropFilter::All);
	let mut diag = Diagnostics::new();
	assert!(load_props(&mut loaded, &saved, &CodecOptions::default(), &mut diag));
	assert_eq!(loaded.find("line_width").expect("line_width").value, PropValue::Real(0.1));
	let name = loaded.find("name").expect("name");
	assert_eq!(name.value, PropValue::String(String::new()));
	assert!(!name.is_set());
}

#[test]
fn identity_matrix_is_saved_as_absent() {
	let table = all_kinds_table();
	let mut values = PropertyList::from_table(&table, PropFilter::All);
	values.find_mut("c_matrix").expect("matrix").value = PropValue::Matrix(Some(Matrix::IDENTITY));
	let saved = save(&values);
	assert!(saved.find_attribute("c_matrix").is_none());

	let mut loaded = PropertyList::from_table(&table, PropFilter::All);
	load_props(&mut loaded, &saved, &CodecOptions::default(), &mut Diagnostics::new());
	let matrix = loaded.find("c_matrix").expect("matrix");
	assert_eq!(matrix.value, PropValue::Matrix(None));
	assert!(matrix.experience.contains(Experience::LOADED));
}

#[test]
fn missing_attributes_warn_unless_optional() {
	let table = DescriptorTable::builder("missing")
		.push(PropDescriptor::new("codec_required", PropertyKind::Int))
		.push(PropDescriptor::new("codec_optional", PropertyKind::Int).with_flags(PropFlags::OPTIONAL))
		.build()
		.expect("table builds");
	let empty = ObjectNode::new("missing", 1);

	let mut props = PropertyList::from_table(&table, PropFilter::All);
	let mut diag = Diagnostics::new();
	assert!(!load_props(&mut props, &empty, &CodecOptions::default(), &mut diag));
	assert_eq!(
		diag.warnings(),
		&[Warning::MissingAttribute {
			name: "codec_required".into(),
			kind: "int".into()
		}]
	);
	assert!(props.iter().all(|prop| !prop.is_set()));

	let mut quiet = Diagnostics::new();
	assert!(!load_props(&mut props, &empty, &CodecOptions::quiet(), &mut quiet));
	assert!(quiet.is_empty());
}

#[test]
fn empty_collections_load_as_empty() {
	let table = all_kinds_table();
	let mut node = ObjectNode::new("codec test object", 1);
	for name in ["c_intarray", "c_pointarray", "c_darray", "c_pixbuf"] {
		node.add_attribute(name);
	}

	let mut props = PropertyList::from_table(&table, PropFilter::All);
	props.retain(|prop| ["c_intarray", "c_pointarray", "c_darray", "c_pixbuf"].contains(&prop.name()));
	let mut diag = Diagnostics::new();
	assert!(load_props(&mut props, &node, &CodecOptions::default(), &mut diag));
	assert_eq!(props.find("c_intarray").expect("ints").value, PropValue::IntArray(Vec::new()));
	assert_eq!(props.find("c_darray").expect("records").value, PropValue::Records(Vec::new()));
	assert_eq!(props.find("c_pixbuf").expect("image").value, PropValue::Image(None));
}

#[test]
fn malformed_literals_leave_defaults() {
	let table = all_kinds_table();
	let mut node = ObjectNode::new("codec test object", 1);
	node.add_attribute("c_real").push(DataNode::Real("wide".into()));
	node.add_attribute("c_bool").push(DataNode::int(1));
	node.add_attribute("c_string");

	let mut props = PropertyList::from_table(&table, PropFilter::All);
	props.retain(|prop| ["c_real", "c_bool", "c_string"].contains(&prop.name()));
	let mut diag = Diagnostics::new();
	assert!(!load_props(&mut props, &node, &CodecOptions::default(), &mut diag));
	assert_eq!(diag.len(), 3);
	assert!(matches!(&diag.warnings()[0], Warning::BadLiteral { name, .. } if name == "c_bool"));
	assert!(matches!(&diag.warnings()[1], Warning::BadLiteral { name, .. } if name == "c_real"));
	assert!(matches!(&diag.warnings()[2], Warning::MissingAttribute { name, .. } if name == "c_string"));
	assert_eq!(props.find("c_real").expect("real").value, PropValue::Real(0.0));
}

#[test]
fn record_arrays_are_capped() {
	let table = all_kinds_table();
	let mut node = ObjectNode::new("codec test object", 1);
	let attr = node.add_attribute("c_darray");
	for _ in 0..5 {
		attr.push(DataNode::Composite(CompositeNode::new("umlparameter")));
	}

	let mut props = PropertyList::from_table(&table, PropFilter::All);
	props.retain(|prop| prop.name() == "c_darray");
	let opts = CodecOptions {
		max_records: 2,
		..CodecOptions::default()
	};
	let mut diag = Diagnostics::new();
	load_props(&mut props, &node, &opts, &mut diag);
	assert!(matches!(diag.warnings(), [Warning::TooManyRecords { max: 2, .. }]));
	let PropValue::Records(records) = &props.find("c_darray").expect("darray").value else {
		panic!("expected records");
	};
	assert_eq!(records.len(), 2);
}

#[test]
fn arrow_without_head_saves_only_its_type() {
	let table = all_kinds_table();
	let mut props = PropertyList::from_table(&table, PropFilter::All);
	props.retain(|prop| prop.name() == "c_arrow");
	let saved = save(&props);
	assert_eq!(saved.find_attribute("c_arrow").expect("arrow").data, vec![DataNode::enumeration(0)]);
}
