//! Descriptors shared by the standard shapes.

use std::sync::Arc;

use crate::props::{
	DescriptorTable, DescriptorTableBuilder, EnumItem, NumberRange, Point, PropDescriptor, PropFlags, PropertyKind,
};

/// Position and size of a box-like element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeom {
	/// Top-left corner.
	pub corner: Point,
	/// Width in diagram units.
	pub width: f64,
	/// Height in diagram units.
	pub height: f64,
}

impl Default for ElementGeom {
	fn default() -> Self {
		Self {
			corner: Point::default(),
			width: 2.0,
			height: 1.0,
		}
	}
}

const STANDARD: PropFlags = PropFlags::VISIBLE.union(PropFlags::STANDARD);

pub(crate) const DEFAULT_LINE_WIDTH: f64 = 0.1;

/// Seal a shape table. Shape tables are built from constants, so a failure
/// here is a programming error caught by the catalog tests.
pub(crate) fn seal(builder: DescriptorTableBuilder) -> Arc<DescriptorTable> {
	Arc::new(builder.build().expect("shape descriptor table is well formed"))
}

pub(crate) fn obj_pos() -> PropDescriptor {
	PropDescriptor::new("obj_pos", PropertyKind::Point).with_label("Object position")
}

/// Position plus element geometry, in the order every element lists them.
pub(crate) fn element_common(builder: DescriptorTableBuilder) -> DescriptorTableBuilder {
	builder
		.push(obj_pos())
		.push(PropDescriptor::new("elem_corner", PropertyKind::Point).with_label("Element corner"))
		.push(PropDescriptor::new("elem_width", PropertyKind::Real).with_label("Element width"))
		.push(PropDescriptor::new("elem_height", PropertyKind::Real).with_label("Element height"))
}

pub(crate) fn line_width() -> PropDescriptor {
	PropDescriptor::new("line_width", PropertyKind::Length)
		.with_flags(STANDARD)
		.with_label("Line width")
		.with_range(NumberRange::new(0.0, 10.0, 0.01))
}

pub(crate) fn line_colour() -> PropDescriptor {
	PropDescriptor::new("line_colour", PropertyKind::Colour).with_flags(STANDARD).with_label("Line colour")
}

pub(crate) fn fill_colour() -> PropDescriptor {
	PropDescriptor::new("fill_colour", PropertyKind::Colour).with_flags(STANDARD).with_label("Fill colour")
}

pub(crate) fn show_background() -> PropDescriptor {
	PropDescriptor::new("show_background", PropertyKind::Bool)
		.with_flags(STANDARD)
		.with_label("Draw background")
}

pub(crate) fn line_style() -> PropDescriptor {
	PropDescriptor::new("line_style", PropertyKind::LineStyle).with_flags(STANDARD).with_label("Line style")
}

pub(crate) fn start_arrow() -> PropDescriptor {
	PropDescriptor::new("start_arrow", PropertyKind::Arrow).with_flags(STANDARD).with_label("Start arrow")
}

pub(crate) fn end_arrow() -> PropDescriptor {
	PropDescriptor::new("end_arrow", PropertyKind::Arrow).with_flags(STANDARD).with_label("End arrow")
}

pub(crate) fn corner_radius() -> PropDescriptor {
	PropDescriptor::new("corner_radius", PropertyKind::Length)
		.with_flags(PropFlags::VISIBLE)
		.with_label("Corner radius")
		.with_range(NumberRange::new(0.0, 10.0, 0.1))
}

/// Text style attributes. They mirror fields of the `text` property and are
/// never written on their own.
pub(crate) fn text_attributes(builder: DescriptorTableBuilder) -> DescriptorTableBuilder {
	let flags = STANDARD | PropFlags::DONT_SAVE;
	builder
		.push(
			PropDescriptor::new("text_alignment", PropertyKind::Enum)
				.with_flags(flags)
				.with_label("Text alignment")
				.with_enum([EnumItem::new("Left", 0), EnumItem::new("Center", 1), EnumItem::new("Right", 2)]),
		)
		.push(PropDescriptor::new("text_font", PropertyKind::Font).with_flags(flags).with_label("Font"))
		.push(PropDescriptor::new("text_height", PropertyKind::FontSize).with_flags(flags).with_label("Font size"))
		.push(PropDescriptor::new("text_colour", PropertyKind::Colour).with_flags(flags).with_label("Text colour"))
}
