//! Small host object shared by unit tests.

use std::sync::{Arc, OnceLock};

use crate::props::{
	Color, DescriptorTable, Diagnostics, ObjectId, OffsetTable, PropDescriptor, PropFlags, PropertyKind, PropertyList, PropertyObject, TextValue,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sticky {
	pub(crate) id: ObjectId,
	pub(crate) type_name: &'static str,
	pub(crate) visible: bool,
	pub(crate) label: String,
	pub(crate) fill: Color,
	pub(crate) width: f64,
	pub(crate) note: TextValue,
	pub(crate) cache: i32,
}

impl Sticky {
	pub(crate) fn new(id: u32) -> Self {
		Self {
			id: ObjectId(id),
			type_name: "sticky",
			visible: true,
			label: format!("sticky {id}"),
			fill: Color::WHITE,
			width: 0.1,
			note: TextValue::default(),
			cache: 0,
		}
	}
}

pub(crate) fn sticky_table() -> Arc<DescriptorTable> {
	static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
	TABLE
		.get_or_init(|| {
			let table = DescriptorTable::builder("sticky")
				.push(PropDescriptor::new("visible", PropertyKind::Bool).with_flags(PropFlags::VISIBLE))
				.push(PropDescriptor::new("label", PropertyKind::String).with_flags(PropFlags::VISIBLE))
				.push(PropDescriptor::new("fill_colour", PropertyKind::Colour).with_flags(PropFlags::VISIBLE))
				.push(PropDescriptor::new("line_width", PropertyKind::Length).with_flags(PropFlags::VISIBLE | PropFlags::STANDARD))
				.push(PropDescriptor::new("note", PropertyKind::Text).with_flags(PropFlags::VISIBLE | PropFlags::OPTIONAL))
				.push(PropDescriptor::new("cache", PropertyKind::Int).with_flags(PropFlags::DONT_SAVE))
				.build()
				.expect("sticky table builds");
			Arc::new(table)
		})
		.clone()
}

fn sticky_offsets() -> &'static OffsetTable<Sticky> {
	static OFFSETS: OnceLock<OffsetTable<Sticky>> = OnceLock::new();
	OFFSETS.get_or_init(|| {
		OffsetTable::new("sticky")
			.field("visible", PropertyKind::Bool, |s: &Sticky| &s.visible, |s: &mut Sticky| &mut s.visible)
			.field("label", PropertyKind::String, |s: &Sticky| &s.label, |s: &mut Sticky| &mut s.label)
			.field("fill_colour", PropertyKind::Colour, |s: &Sticky| &s.fill, |s: &mut Sticky| &mut s.fill)
			.field("line_width", PropertyKind::Length, |s: &Sticky| &s.width, |s: &mut Sticky| &mut s.width)
			.field("note", PropertyKind::Text, |s: &Sticky| &s.note, |s: &mut Sticky| &mut s.note)
			.field("cache", PropertyKind::Int, |s: &Sticky| &s.cache, |s: &mut Sticky| &mut s.cache)
	})
}

impl PropertyObject for Sticky {
	fn id(&self) -> ObjectId {
		self.id
	}

	fn type_name(&self) -> &str {
		self.type_name
	}

	fn describe(&self) -> Arc<DescriptorTable> {
		sticky_table()
	}

	fn get_props(&self, props: &mut PropertyList, diag: &mut Diagnostics) -> bool {
		sticky_offsets().get_props_with(self, props, diag)
	}

	fn set_props(&mut self, props: &PropertyList, diag: &mut Diagnostics) -> bool {
		sticky_offsets().set_props_with(self, props, diag)
	}
}

/// In-memory store of stickies.
#[derive(Debug, Default)]
pub(crate) struct StickyBoard {
	pub(crate) items: Vec<Sticky>,
}

impl crate::props::ObjectStore for StickyBoard {
	fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn PropertyObject> {
		self.items.iter_mut().find(|item| item.id == id).map(|item| item as &mut dyn PropertyObject)
	}
}
