use std::sync::{Arc, OnceLock};

use crate::props::{
	Color, DEFAULT_DASH_LENGTH, DescriptorTable, ImageData, LineStyle, LineStyleKind, ObjectId, OffsetTable, PropDescriptor, PropFlags, PropertyKind,
};
use crate::shapes::Shape;
use crate::shapes::common::{DEFAULT_LINE_WIDTH, ElementGeom, element_common, line_colour, line_style, line_width, seal};

/// Element showing an image file, optionally with the image data inlined.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
	/// Document-wide identity.
	pub id: ObjectId,
	/// Position and size.
	pub elem: ElementGeom,
	/// Path of the image file.
	pub file: String,
	/// Store the encoded image in the document.
	pub inline_data: bool,
	/// Inlined image, when present.
	pub pixbuf: Option<ImageData>,
	/// Draw a border around the image.
	pub draw_border: bool,
	/// Keep the image aspect ratio when resizing.
	pub keep_aspect: bool,
	/// Rotation in degrees.
	pub angle: f64,
	/// Border width.
	pub border_width: f64,
	/// Border colour.
	pub border_colour: Color,
	/// Border dash pattern.
	pub line_style: LineStyleKind,
	/// Border dash length.
	pub dash: f64,
}

impl Shape for Image {
	const TYPE_NAME: &'static str = "Standard - Image";

	fn new(id: ObjectId) -> Self {
		Self {
			id,
			elem: ElementGeom::default(),
			file: String::new(),
			inline_data: false,
			pixbuf: None,
			draw_border: true,
			keep_aspect: true,
			angle: 0.0,
			border_width: DEFAULT_LINE_WIDTH,
			border_colour: Color::BLACK,
			line_style: LineStyleKind::Solid,
			dash: DEFAULT_DASH_LENGTH,
		}
	}

	fn object_id(&self) -> ObjectId {
		self.id
	}

	fn table() -> Arc<DescriptorTable> {
		static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
		TABLE
			.get_or_init(|| {
				let optional = PropFlags::VISIBLE | PropFlags::OPTIONAL;
				seal(
					element_common(DescriptorTable::builder(Self::TYPE_NAME))
						.push(PropDescriptor::new("image_file", PropertyKind::File).with_flags(PropFlags::VISIBLE).with_label("Image file"))
						.push(PropDescriptor::new("inline_data", PropertyKind::Bool).with_flags(optional).with_label("Inline data"))
						.push(
							PropDescriptor::new("pixbuf", PropertyKind::Pixbuf)
								.with_flags(PropFlags::DONT_MERGE | PropFlags::OPTIONAL)
								.with_label("Pixbuf"),
						)
						.push(PropDescriptor::new("show_border", PropertyKind::Bool).with_flags(PropFlags::VISIBLE).with_label("Draw border"))
						.push(PropDescriptor::new("keep_aspect", PropertyKind::Bool).with_flags(PropFlags::VISIBLE).with_label("Keep aspect ratio"))
						.push(PropDescriptor::new("angle", PropertyKind::Real).with_flags(optional).with_label("Angle"))
						.push(line_width())
						.push(line_colour())
						.push(line_style()),
				)
			})
			.clone()
	}

	fn offsets() -> &'static OffsetTable<Self> {
		static OFFSETS: OnceLock<OffsetTable<Image>> = OnceLock::new();
		OFFSETS.get_or_init(|| {
			OffsetTable::new(Self::TYPE_NAME)
				.field("obj_pos", PropertyKind::Point, |i: &Self| &i.elem.corner, |i: &mut Self| &mut i.elem.corner)
				.field("elem_corner", PropertyKind::Point, |i: &Self| &i.elem.corner, |i: &mut Self| &mut i.elem.corner)
				.field("elem_width", PropertyKind::Real, |i: &Self| &i.elem.width, |i: &mut Self| &mut i.elem.width)
				.field("elem_height", PropertyKind::Real, |i: &Self| &i.elem.height, |i: &mut Self| &mut i.elem.height)
				.field("image_file", PropertyKind::File, |i: &Self| &i.file, |i: &mut Self| &mut i.file)
				.field("inline_data", PropertyKind::Bool, |i: &Self| &i.inline_data, |i: &mut Self| &mut i.inline_data)
				.field("pixbuf", PropertyKind::Pixbuf, |i: &Self| &i.pixbuf, |i: &mut Self| &mut i.pixbuf)
				.field("show_border", PropertyKind::Bool, |i: &Self| &i.draw_border, |i: &mut Self| &mut i.draw_border)
				.field("keep_aspect", PropertyKind::Bool, |i: &Self| &i.keep_aspect, |i: &mut Self| &mut i.keep_aspect)
				.field("angle", PropertyKind::Real, |i: &Self| &i.angle, |i: &mut Self| &mut i.angle)
				.field("line_width", PropertyKind::Length, |i: &Self| &i.border_width, |i: &mut Self| &mut i.border_width)
				.field("line_colour", PropertyKind::Colour, |i: &Self| &i.border_colour, |i: &mut Self| &mut i.border_colour)
				.pair::<LineStyle>(
					"line_style",
					PropertyKind::LineStyle,
					|i: &Self| &i.line_style,
					|i: &mut Self| &mut i.line_style,
					|i: &Self| &i.dash,
					|i: &mut Self| &mut i.dash,
				)
		})
	}
}
