use std::sync::{Arc, OnceLock};

use crate::props::{
	BezPoint, BezPointKind, Color, DEFAULT_DASH_LENGTH, DescriptorTable, LineStyle, LineStyleKind, ObjectId, OffsetTable, Point, PropDescriptor,
	PropertyKind,
};
use crate::shapes::Shape;
use crate::shapes::common::{DEFAULT_LINE_WIDTH, fill_colour, line_colour, line_style, line_width, seal, show_background};

/// Closed shape of bezier segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Beziergon {
	/// Document-wide identity.
	pub id: ObjectId,
	/// Path; the first point is a move-to.
	pub points: Vec<BezPoint>,
	/// Stroke width.
	pub line_width: f64,
	/// Stroke colour.
	pub line_colour: Color,
	/// Dash pattern.
	pub line_style: LineStyleKind,
	/// Dash length.
	pub dash: f64,
	/// Interior colour.
	pub inner_colour: Color,
	/// Fill the interior.
	pub show_background: bool,
}

fn curve(p1: Point, p2: Point, p3: Point) -> BezPoint {
	BezPoint {
		kind: BezPointKind::CurveTo,
		p1,
		p2,
		p3,
	}
}

impl Shape for Beziergon {
	const TYPE_NAME: &'static str = "Standard - Beziergon";

	fn new(id: ObjectId) -> Self {
		let start = Point::new(0.0, 0.0);
		Self {
			id,
			points: vec![
				BezPoint {
					kind: BezPointKind::MoveTo,
					p1: start,
					p2: start,
					p3: start,
				},
				curve(Point::new(0.5, -0.5), Point::new(1.5, -0.5), Point::new(2.0, 0.0)),
				curve(Point::new(1.5, 0.5), Point::new(0.5, 0.5), start),
			],
			line_width: DEFAULT_LINE_WIDTH,
			line_colour: Color::BLACK,
			line_style: LineStyleKind::Solid,
			dash: DEFAULT_DASH_LENGTH,
			inner_colour: Color::WHITE,
			show_background: true,
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
					DescriptorTable::builder(Self::TYPE_NAME)
						.push(PropDescriptor::new("bez_points", PropertyKind::BezPointArray).with_label("Bezier points"))
						.push(line_width())
						.push(line_colour())
						.push(line_style())
						.push(fill_colour())
						.push(show_background()),
				)
			})
			.clone()
	}

	fn offsets() -> &'static OffsetTable<Self> {
		static OFFSETS: OnceLock<OffsetTable<Beziergon>> = OnceLock::new();
		OFFSETS.get_or_init(|| {
			OffsetTable::new(Self::TYPE_NAME)
				.field("bez_points", PropertyKind::BezPointArray, |b: &Self| &b.points, |b: &mut Self| &mut b.points)
				.field("line_width", PropertyKind::Length, |b: &Self| &b.line_width, |b: &mut Self| &mut b.line_width)
				.field("line_colour", PropertyKind::Colour, |b: &Self| &b.line_colour, |b: &mut Self| &mut b.line_colour)
				.pair::<LineStyle>(
					"line_style",
					PropertyKind::LineStyle,
					|b: &Self| &b.line_style,
					|b: &mut Self| &mut b.line_style,
					|b: &Self| &b.dash,
					|b: &mut Self| &mut b.dash,
				)
				.field("fill_colour", PropertyKind::Colour, |b: &Self| &b.inner_colour, |b: &mut Self| &mut b.inner_colour)
				.field("show_background", PropertyKind::Bool, |b: &Self| &b.show_background, |b: &mut Self| &mut b.show_background)
		})
	}
}
