use std::sync::{Arc, OnceLock};

use crate::props::{
	Arrow, Color, DEFAULT_DASH_LENGTH, DescriptorTable, LineStyle, LineStyleKind, ObjectId, OffsetTable, Point, PropDescriptor, PropFlags, PropertyKind,
};
use crate::shapes::Shape;
use crate::shapes::common::{DEFAULT_LINE_WIDTH, end_arrow, line_colour, line_style, line_width, obj_pos, seal, start_arrow};

/// Straight connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
	/// Document-wide identity.
	pub id: ObjectId,
	/// Start and end point.
	pub endpoints: [Point; 2],
	/// Stroke width.
	pub line_width: f64,
	/// Stroke colour.
	pub line_colour: Color,
	/// Dash pattern.
	pub line_style: LineStyleKind,
	/// Dash length.
	pub dash: f64,
	/// Head at the start point.
	pub start_arrow: Arrow,
	/// Head at the end point.
	pub end_arrow: Arrow,
}

impl Shape for Line {
	const TYPE_NAME: &'static str = "Standard - Line";

	fn new(id: ObjectId) -> Self {
		Self {
			id,
			endpoints: [Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
			line_width: DEFAULT_LINE_WIDTH,
			line_colour: Color::BLACK,
			line_style: LineStyleKind::Solid,
			dash: DEFAULT_DASH_LENGTH,
			start_arrow: Arrow::default(),
			end_arrow: Arrow::default(),
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
						.push(PropDescriptor::new("conn_endpoints", PropertyKind::Endpoints).with_label("Connection endpoints"))
						.push(line_width())
						.push(line_colour())
						.push(line_style())
						.push(start_arrow())
						.push(end_arrow())
						.push(PropDescriptor::new("start_point", PropertyKind::Point).with_flags(PropFlags::DONT_SAVE).with_label("Start point"))
						.push(PropDescriptor::new("end_point", PropertyKind::Point).with_flags(PropFlags::DONT_SAVE).with_label("End point")),
				)
			})
			.clone()
	}

	fn offsets() -> &'static OffsetTable<Self> {
		static OFFSETS: OnceLock<OffsetTable<Line>> = OnceLock::new();
		OFFSETS.get_or_init(|| {
			OffsetTable::new(Self::TYPE_NAME)
				.field("obj_pos", PropertyKind::Point, |l: &Self| &l.endpoints[0], |l: &mut Self| &mut l.endpoints[0])
				.field("conn_endpoints", PropertyKind::Endpoints, |l: &Self| &l.endpoints, |l: &mut Self| &mut l.endpoints)
				.field("line_width", PropertyKind::Length, |l: &Self| &l.line_width, |l: &mut Self| &mut l.line_width)
				.field("line_colour", PropertyKind::Colour, |l: &Self| &l.line_colour, |l: &mut Self| &mut l.line_colour)
				.pair::<LineStyle>(
					"line_style",
					PropertyKind::LineStyle,
					|l: &Self| &l.line_style,
					|l: &mut Self| &mut l.line_style,
					|l: &Self| &l.dash,
					|l: &mut Self| &mut l.dash,
				)
				.field("start_arrow", PropertyKind::Arrow, |l: &Self| &l.start_arrow, |l: &mut Self| &mut l.start_arrow)
				.field("end_arrow", PropertyKind::Arrow, |l: &Self| &l.end_arrow, |l: &mut Self| &mut l.end_arrow)
				.field("start_point", PropertyKind::Point, |l: &Self| &l.endpoints[0], |l: &mut Self| &mut l.endpoints[0])
				.field("end_point", PropertyKind::Point, |l: &Self| &l.endpoints[1], |l: &mut Self| &mut l.endpoints[1])
		})
	}
}
