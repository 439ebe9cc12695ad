use std::sync::{Arc, OnceLock};

use crate::props::{
	Arrow, Color, DEFAULT_DASH_LENGTH, DescriptorTable, LineStyle, LineStyleKind, ObjectId, OffsetTable, Point, PropDescriptor, PropValue, PropertyKind,
};
use crate::shapes::Shape;
use crate::shapes::common::{DEFAULT_LINE_WIDTH, corner_radius, end_arrow, line_colour, line_style, line_width, obj_pos, seal, start_arrow};

/// Open line through a list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
	/// Document-wide identity.
	pub id: ObjectId,
	/// Vertices in drawing order.
	pub points: Vec<Point>,
	/// Stroke width.
	pub line_width: f64,
	/// Stroke colour.
	pub line_colour: Color,
	/// Dash pattern.
	pub line_style: LineStyleKind,
	/// Dash length.
	pub dash: f64,
	/// Head at the first point.
	pub start_arrow: Arrow,
	/// Head at the last point.
	pub end_arrow: Arrow,
	/// Rounding applied at inner vertices.
	pub corner_radius: f64,
}

// The position of a polyline is its first vertex; an empty polyline sits at
// the origin and ignores moves.
fn position(polyline: &Polyline) -> PropValue {
	PropValue::Point(polyline.points.first().copied().unwrap_or_default())
}

fn set_position(polyline: &mut Polyline, value: &PropValue) -> bool {
	let PropValue::Point(to) = value else {
		return false;
	};
	let Some(from) = polyline.points.first().copied() else {
		return true;
	};
	for point in &mut polyline.points {
		point.x += to.x - from.x;
		point.y += to.y - from.y;
	}
	true
}

impl Shape for Polyline {
	const TYPE_NAME: &'static str = "Standard - PolyLine";

	fn new(id: ObjectId) -> Self {
		Self {
			id,
			points: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
			line_width: DEFAULT_LINE_WIDTH,
			line_colour: Color::BLACK,
			line_style: LineStyleKind::Solid,
			dash: DEFAULT_DASH_LENGTH,
			start_arrow: Arrow::default(),
			end_arrow: Arrow::default(),
			corner_radius: 0.0,
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
						.push(obj_pos())
						.push(PropDescriptor::new("poly_points", PropertyKind::PointArray).with_label("Points"))
						.push(line_width())
						.push(line_colour())
						.push(line_style())
						.push(start_arrow())
						.push(end_arrow())
						.push(corner_radius()),
				)
			})
			.clone()
	}

	fn offsets() -> &'static OffsetTable<Self> {
		static OFFSETS: OnceLock<OffsetTable<Polyline>> = OnceLock::new();
		OFFSETS.get_or_init(|| {
			OffsetTable::new(Self::TYPE_NAME)
				.derived("obj_pos", PropertyKind::Point, position, set_position)
				.field("poly_points", PropertyKind::PointArray, |p: &Self| &p.points, |p: &mut Self| &mut p.points)
				.field("line_width", PropertyKind::Length, |p: &Self| &p.line_width, |p: &mut Self| &mut p.line_width)
				.field("line_colour", PropertyKind::Colour, |p: &Self| &p.line_colour, |p: &mut Self| &mut p.line_colour)
				.pair::<LineStyle>(
					"line_style",
					PropertyKind::LineStyle,
					|p: &Self| &p.line_style,
					|p: &mut Self| &mut p.line_style,
					|p: &Self| &p.dash,
					|p: &mut Self| &mut p.dash,
				)
				.field("start_arrow", PropertyKind::Arrow, |p: &Self| &p.start_arrow, |p: &mut Self| &mut p.start_arrow)
				.field("end_arrow", PropertyKind::Arrow, |p: &Self| &p.end_arrow, |p: &mut Self| &mut p.end_arrow)
				.field("corner_radius", PropertyKind::Length, |p: &Self| &p.corner_radius, |p: &mut Self| &mut p.corner_radius)
		})
	}
}
