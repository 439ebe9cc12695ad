//! UML class with operations, each operation carrying its parameters as a
//! nested record array.

use std::sync::{Arc, OnceLock};

use crate::props::{
	Color, DescriptorTable, EnumItem, FontRef, ObjectId, OffsetTable, PropDescriptor, PropFlags, PropertyKind,
};
use crate::shapes::Shape;
use crate::shapes::common::{DEFAULT_LINE_WIDTH, ElementGeom, element_common, fill_colour, line_colour, line_width, seal};

const RECORD: PropFlags = PropFlags::VISIBLE.union(PropFlags::OPTIONAL);

/// Parameter of a UML operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UmlParameter {
	/// Parameter name.
	pub name: String,
	/// Declared type.
	pub type_name: String,
	/// Default value.
	pub value: String,
	/// Free-form comment.
	pub comment: String,
	/// Direction: undefined, in, out or inout.
	pub kind: i32,
}

/// Operation of a UML class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UmlOperation {
	/// Operation name.
	pub name: String,
	/// Return type.
	pub type_name: String,
	/// Free-form comment.
	pub comment: String,
	/// Visibility: public, private, protected or implementation.
	pub visibility: i32,
	/// Static operation.
	pub class_scope: bool,
	/// Parameters in declaration order.
	pub parameters: Vec<UmlParameter>,
}

/// UML class box.
#[derive(Debug, Clone, PartialEq)]
pub struct UmlClass {
	/// Document-wide identity.
	pub id: ObjectId,
	/// Position and size.
	pub elem: ElementGeom,
	/// Class name.
	pub name: String,
	/// Stereotype shown above the name.
	pub stereotype: String,
	/// Free-form comment.
	pub comment: String,
	/// Abstract class.
	pub is_abstract: bool,
	/// Show the operations compartment.
	pub visible_operations: bool,
	/// Operations in declaration order.
	pub operations: Vec<UmlOperation>,
	/// Font of regular entries.
	pub normal_font: FontRef,
	/// Outline width.
	pub line_width: f64,
	/// Outline colour.
	pub line_colour: Color,
	/// Interior colour.
	pub fill_colour: Color,
}

fn parameter_table() -> Arc<DescriptorTable> {
	static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
	TABLE
		.get_or_init(|| {
			seal(
				DescriptorTable::builder("umlparameter")
					.push(PropDescriptor::new("name", PropertyKind::String).with_flags(RECORD).with_label("Name"))
					.push(PropDescriptor::new("type", PropertyKind::String).with_flags(RECORD).with_label("Type"))
					.push(PropDescriptor::new("value", PropertyKind::String).with_flags(RECORD).with_label("Value"))
					.push(PropDescriptor::new("comment", PropertyKind::MultiString).with_flags(RECORD).with_label("Comment"))
					.push(
						PropDescriptor::new("kind", PropertyKind::Enum)
							.with_flags(RECORD)
							.with_label("Kind")
							.with_enum([
								EnumItem::new("Undefined", 0),
								EnumItem::new("In", 1),
								EnumItem::new("Out", 2),
								EnumItem::new("In & Out", 3),
							]),
					),
			)
		})
		.clone()
}

fn parameter_offsets() -> Arc<OffsetTable<UmlParameter>> {
	static OFFSETS: OnceLock<Arc<OffsetTable<UmlParameter>>> = OnceLock::new();
	OFFSETS
		.get_or_init(|| {
			Arc::new(
				OffsetTable::new("umlparameter")
					.field("name", PropertyKind::String, |p: &UmlParameter| &p.name, |p: &mut UmlParameter| &mut p.name)
					.field("type", PropertyKind::String, |p: &UmlParameter| &p.type_name, |p: &mut UmlParameter| &mut p.type_name)
					.field("value", PropertyKind::String, |p: &UmlParameter| &p.value, |p: &mut UmlParameter| &mut p.value)
					.field("comment", PropertyKind::MultiString, |p: &UmlParameter| &p.comment, |p: &mut UmlParameter| &mut p.comment)
					.field("kind", PropertyKind::Enum, |p: &UmlParameter| &p.kind, |p: &mut UmlParameter| &mut p.kind),
			)
		})
		.clone()
}

fn operation_table() -> Arc<DescriptorTable> {
	static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
	TABLE
		.get_or_init(|| {
			seal(
				DescriptorTable::builder("umloperation")
					.push(PropDescriptor::new("name", PropertyKind::String).with_flags(RECORD).with_label("Name"))
					.push(PropDescriptor::new("type", PropertyKind::String).with_flags(RECORD).with_label("Type"))
					.push(PropDescriptor::new("comment", PropertyKind::MultiString).with_flags(RECORD).with_label("Comment"))
					.push(
						PropDescriptor::new("visibility", PropertyKind::Enum)
							.with_flags(RECORD)
							.with_label("Visibility")
							.with_enum([
								EnumItem::new("Public", 0),
								EnumItem::new("Private", 1),
								EnumItem::new("Protected", 2),
								EnumItem::new("Implementation", 3),
							]),
					)
					.push(PropDescriptor::new("class_scope", PropertyKind::Bool).with_flags(RECORD).with_label("Class scope"))
					.push(
						PropDescriptor::new("parameters", PropertyKind::DArray)
							.with_flags(RECORD)
							.with_label("Parameters")
							.with_records(parameter_table(), "umlparameter"),
					),
			)
		})
		.clone()
}

fn operation_offsets() -> Arc<OffsetTable<UmlOperation>> {
	static OFFSETS: OnceLock<Arc<OffsetTable<UmlOperation>>> = OnceLock::new();
	OFFSETS
		.get_or_init(|| {
			Arc::new(
				OffsetTable::new("umloperation")
					.field("name", PropertyKind::String, |o: &UmlOperation| &o.name, |o: &mut UmlOperation| &mut o.name)
					.field("type", PropertyKind::String, |o: &UmlOperation| &o.type_name, |o: &mut UmlOperation| &mut o.type_name)
					.field("comment", PropertyKind::MultiString, |o: &UmlOperation| &o.comment, |o: &mut UmlOperation| &mut o.comment)
					.field("visibility", PropertyKind::Enum, |o: &UmlOperation| &o.visibility, |o: &mut UmlOperation| &mut o.visibility)
					.field("class_scope", PropertyKind::Bool, |o: &UmlOperation| &o.class_scope, |o: &mut UmlOperation| &mut o.class_scope)
					.records(
						"parameters",
						|o: &UmlOperation| &o.parameters,
						|o: &mut UmlOperation| &mut o.parameters,
						parameter_offsets(),
						UmlParameter::default,
					),
			)
		})
		.clone()
}

impl Shape for UmlClass {
	const TYPE_NAME: &'static str = "UML - Class";

	fn new(id: ObjectId) -> Self {
		Self {
			id,
			elem: ElementGeom::default(),
			name: "Class".to_owned(),
			stereotype: String::new(),
			comment: String::new(),
			is_abstract: false,
			visible_operations: true,
			operations: Vec::new(),
			normal_font: FontRef {
				family: "monospace".to_owned(),
				style: 0,
				name: "Courier".to_owned(),
			},
			line_width: DEFAULT_LINE_WIDTH,
			line_colour: Color::BLACK,
			fill_colour: Color::WHITE,
		}
	}

	fn object_id(&self) -> ObjectId {
		self.id
	}

	fn table() -> Arc<DescriptorTable> {
		static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
		TABLE
			.get_or_init(|| {
				let page = |name: &str, label: &str| PropDescriptor::new(name, PropertyKind::NotebookPage).with_flags(PropFlags::VISIBLE).with_label(label);
				seal(
					element_common(DescriptorTable::builder(Self::TYPE_NAME))
						.push(PropDescriptor::new("notebook_begin", PropertyKind::NotebookBegin).with_flags(PropFlags::VISIBLE))
						.push(page("class", "Class"))
						.push(
							PropDescriptor::new("name", PropertyKind::String)
								.with_flags(RECORD | PropFlags::NO_DEFAULTS)
								.with_label("Class name"),
						)
						.push(PropDescriptor::new("stereotype", PropertyKind::String).with_flags(RECORD).with_label("Stereotype"))
						.push(PropDescriptor::new("comment", PropertyKind::MultiString).with_flags(RECORD).with_label("Comment"))
						.push(PropDescriptor::new("abstract", PropertyKind::Bool).with_flags(RECORD).with_label("Abstract"))
						.push(
							PropDescriptor::new("visible_operations", PropertyKind::Bool)
								.with_flags(RECORD | PropFlags::DONT_MERGE)
								.with_label("Visible operations"),
						)
						.push(page("operations_page", "Operations"))
						.push(
							PropDescriptor::new("operations", PropertyKind::DArray)
								.with_flags(RECORD | PropFlags::DONT_MERGE | PropFlags::NO_DEFAULTS)
								.with_label("Operations")
								.with_records(operation_table(), "umloperation"),
						)
						.push(page("style", "Style"))
						.push(PropDescriptor::new("normal_font", PropertyKind::Font).with_flags(RECORD).with_label("Normal font"))
						.push(line_width())
						.push(line_colour())
						.push(fill_colour())
						.push(PropDescriptor::new("notebook_end", PropertyKind::NotebookEnd).with_flags(PropFlags::VISIBLE)),
				)
			})
			.clone()
	}

	fn offsets() -> &'static OffsetTable<Self> {
		static OFFSETS: OnceLock<OffsetTable<UmlClass>> = OnceLock::new();
		OFFSETS.get_or_init(|| {
			OffsetTable::new(Self::TYPE_NAME)
				.field("obj_pos", PropertyKind::Point, |c: &Self| &c.elem.corner, |c: &mut Self| &mut c.elem.corner)
				.field("elem_corner", PropertyKind::Point, |c: &Self| &c.elem.corner, |c: &mut Self| &mut c.elem.corner)
				.field("elem_width", PropertyKind::Real, |c: &Self| &c.elem.width, |c: &mut Self| &mut c.elem.width)
				.field("elem_height", PropertyKind::Real, |c: &Self| &c.elem.height, |c: &mut Self| &mut c.elem.height)
				.field("name", PropertyKind::String, |c: &Self| &c.name, |c: &mut Self| &mut c.name)
				.field("stereotype", PropertyKind::String, |c: &Self| &c.stereotype, |c: &mut Self| &mut c.stereotype)
				.field("comment", PropertyKind::MultiString, |c: &Self| &c.comment, |c: &mut Self| &mut c.comment)
				.field("abstract", PropertyKind::Bool, |c: &Self| &c.is_abstract, |c: &mut Self| &mut c.is_abstract)
				.field("visible_operations", PropertyKind::Bool, |c: &Self| &c.visible_operations, |c: &mut Self| &mut c.visible_operations)
				.records("operations", |c: &Self| &c.operations, |c: &mut Self| &mut c.operations, operation_offsets(), UmlOperation::default)
				.field("normal_font", PropertyKind::Font, |c: &Self| &c.normal_font, |c: &mut Self| &mut c.normal_font)
				.field("line_width", PropertyKind::Length, |c: &Self| &c.line_width, |c: &mut Self| &mut c.line_width)
				.field("line_colour", PropertyKind::Colour, |c: &Self| &c.line_colour, |c: &mut Self| &mut c.line_colour)
				.field("fill_colour", PropertyKind::Colour, |c: &Self| &c.fill_colour, |c: &mut Self| &mut c.fill_colour)
		})
	}
}
