use std::sync::{Arc, OnceLock};

use crate::props::{Color, DEFAULT_DASH_LENGTH, DescriptorTable, EnumItem, LineStyle, LineStyleKind, ObjectId, OffsetTable, PropDescriptor, PropFlags, PropertyKind};
use crate::shapes::Shape;
use crate::shapes::common::{
	DEFAULT_LINE_WIDTH, ElementGeom, corner_radius, element_common, fill_colour, line_colour, line_style, line_width, seal, show_background,
};

/// Rectangle element.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
	/// Document-wide identity.
	pub id: ObjectId,
	/// Position and size.
	pub elem: ElementGeom,
	/// Border width.
	pub border_width: f64,
	/// Border colour.
	pub border_colour: Color,
	/// Interior colour.
	pub inner_colour: Color,
	/// Fill the interior.
	pub show_background: bool,
	/// Border dash pattern.
	pub line_style: LineStyleKind,
	/// Dash length of the border pattern.
	pub dash: f64,
	/// Radius of rounded corners; zero for square corners.
	pub corner_radius: f64,
	/// Aspect ratio constraint: free, fixed or square.
	pub aspect: i32,
}

impl Shape for BoxShape {
	const TYPE_NAME: &'static str = "Standard - Box";

	fn new(id: ObjectId) -> Self {
		Self {
			id,
			elem: ElementGeom::default(),
			border_width: DEFAULT_LINE_WIDTH,
			border_colour: Color::BLACK,
			inner_colour: Color::WHITE,
			show_background: true,
			line_style: LineStyleKind::Solid,
			dash: DEFAULT_DASH_LENGTH,
			corner_radius: 0.0,
			aspect: 0,
		}
	}

	fn object_id(&self) -> ObjectId {
		self.id
	}

	fn table() -> Arc<DescriptorTable> {
		static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
		TABLE
			.get_or_init(|| {
				seal(
					element_common(DescriptorTable::builder(Self::TYPE_NAME))
						.push(line_width())
						.push(line_colour())
						.push(fill_colour())
						.push(show_background())
						.push(line_style())
						.push(corner_radius())
						.push(
							PropDescriptor::new("aspect", PropertyKind::Enum)
								.with_flags(PropFlags::VISIBLE)
								.with_label("Aspect ratio")
								.with_enum([EnumItem::new("Free", 0), EnumItem::new("Fixed", 1), EnumItem::new("Square", 2)]),
						),
				)
			})
			.clone()
	}

	fn offsets() -> &'static OffsetTable<Self> {
		static OFFSETS: OnceLock<OffsetTable<BoxShape>> = OnceLock::new();
		OFFSETS.get_or_init(|| {
			OffsetTable::new(Self::TYPE_NAME)
				.field("obj_pos", PropertyKind::Point, |b: &Self| &b.elem.corner, |b: &mut Self| &mut b.elem.corner)
				.field("elem_corner", PropertyKind::Point, |b: &Self| &b.elem.corner, |b: &mut Self| &mut b.elem.corner)
				.field("elem_width", PropertyKind::Real, |b: &Self| &b.elem.width, |b: &mut Self| &mut b.elem.width)
				.field("elem_height", PropertyKind::Real, |b: &Self| &b.elem.height, |b: &mut Self| &mut b.elem.height)
				.field("line_width", PropertyKind::Length, |b: &Self| &b.border_width, |b: &mut Self| &mut b.border_width)
				.field("line_colour", PropertyKind::Colour, |b: &Self| &b.border_colour, |b: &mut Self| &mut b.border_colour)
				.field("fill_colour", PropertyKind::Colour, |b: &Self| &b.inner_colour, |b: &mut Self| &mut b.inner_colour)
				.field("show_background", PropertyKind::Bool, |b: &Self| &b.show_background, |b: &mut Self| &mut b.show_background)
				.pair::<LineStyle>(
					"line_style",
					PropertyKind::LineStyle,
					|b: &Self| &b.line_style,
					|b: &mut Self| &mut b.line_style,
					|b: &Self| &b.dash,
					|b: &mut Self| &mut b.dash,
				)
				.field("corner_radius", PropertyKind::Length, |b: &Self| &b.corner_radius, |b: &mut Self| &mut b.corner_radius)
				.field("aspect", PropertyKind::Enum, |b: &Self| &b.aspect, |b: &mut Self| &mut b.aspect)
		})
	}
}
