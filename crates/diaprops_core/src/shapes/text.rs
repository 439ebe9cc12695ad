use std::sync::{Arc, OnceLock};

use crate::props::{DescriptorTable, ObjectId, OffsetTable, Point, PropDescriptor, PropFlags, PropValue, PropertyKind, TextAlign, TextValue};
use crate::shapes::Shape;
use crate::shapes::common::{obj_pos, seal, text_attributes};

/// Free-standing text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
	/// Document-wide identity.
	pub id: ObjectId,
	/// Anchor of the first line.
	pub pos: Point,
	/// Content and style.
	pub text: TextValue,
}

fn alignment(object: &TextObject) -> PropValue {
	PropValue::Int(object.text.alignment.as_i32())
}

fn set_alignment(object: &mut TextObject, value: &PropValue) -> bool {
	let PropValue::Int(raw) = value else {
		return false;
	};
	match TextAlign::from_i32(*raw) {
		Some(alignment) => {
			object.text.alignment = alignment;
			true
		}
		None => false,
	}
}

impl Shape for TextObject {
	const TYPE_NAME: &'static str = "Standard - Text";

	fn new(id: ObjectId) -> Self {
		Self {
			id,
			pos: Point::default(),
			text: TextValue::default(),
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
					text_attributes(DescriptorTable::builder(Self::TYPE_NAME).push(obj_pos())).push(
						PropDescriptor::new("text", PropertyKind::Text)
							.with_flags(PropFlags::OPTIONAL | PropFlags::DONT_MERGE)
							.with_label("Text"),
					),
				)
			})
			.clone()
	}

	fn offsets() -> &'static OffsetTable<Self> {
		static OFFSETS: OnceLock<OffsetTable<TextObject>> = OnceLock::new();
		OFFSETS.get_or_init(|| {
			OffsetTable::new(Self::TYPE_NAME)
				.field("obj_pos", PropertyKind::Point, |t: &Self| &t.pos, |t: &mut Self| &mut t.pos)
				.derived("text_alignment", PropertyKind::Enum, alignment, set_alignment)
				.field("text_font", PropertyKind::Font, |t: &Self| &t.text.font, |t: &mut Self| &mut t.text.font)
				.field("text_height", PropertyKind::FontSize, |t: &Self| &t.text.height, |t: &mut Self| &mut t.text.height)
				.field("text_colour", PropertyKind::Colour, |t: &Self| &t.text.colour, |t: &mut Self| &mut t.text.colour)
				.field("text", PropertyKind::Text, |t: &Self| &t.text, |t: &mut Self| &mut t.text)
		})
	}
}
