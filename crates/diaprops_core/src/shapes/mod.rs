mod beziergon;
mod boxes;
mod common;
mod image;
mod line;
mod polyline;
mod text;
mod uml;

use std::sync::Arc;

use crate::props::{DescriptorTable, Diagnostics, ObjectCatalog, ObjectId, OffsetTable, PropertyList, PropertyObject, Result};

/// Closed filled polygon of bezier segments.
pub use beziergon::Beziergon;
/// Rectangle element with optional rounded corners.
pub use boxes::BoxShape;
/// Element geometry shared by box-like shapes.
pub use common::ElementGeom;
/// Element showing an external or inlined image.
pub use image::Image;
/// Straight connection between two points.
pub use line::Line;
/// Open line through a list of points.
pub use polyline::Polyline;
/// Free-standing text block.
pub use text::TextObject;
/// UML class with its operation records.
pub use uml::{UmlClass, UmlOperation, UmlParameter};

/// Host type driven entirely by a descriptor table and a field accessor
/// table.
pub trait Shape: Sized + 'static {
	/// Persisted type name.
	const TYPE_NAME: &'static str;

	/// Default-valued instance.
	fn new(id: ObjectId) -> Self;

	/// Document-wide identity.
	fn object_id(&self) -> ObjectId;

	/// Descriptor table of the type.
	fn table() -> Arc<DescriptorTable>;

	/// Field accessors of the type.
	fn offsets() -> &'static OffsetTable<Self>;
}

impl<S: Shape> PropertyObject for S {
	fn id(&self) -> ObjectId {
		self.object_id()
	}

	fn type_name(&self) -> &str {
		S::TYPE_NAME
	}

	fn describe(&self) -> Arc<DescriptorTable> {
		S::table()
	}

	fn get_props(&self, props: &mut PropertyList, diag: &mut Diagnostics) -> bool {
		S::offsets().get_props_with(self, props, diag)
	}

	fn set_props(&mut self, props: &PropertyList, diag: &mut Diagnostics) -> bool {
		S::offsets().set_props_with(self, props, diag)
	}
}

fn create<S: Shape>(id: ObjectId) -> Box<dyn PropertyObject> {
	Box::new(S::new(id))
}

fn register<S: Shape>(catalog: &mut ObjectCatalog) -> Result<()> {
	catalog.register(S::TYPE_NAME, S::table, create::<S>)
}

/// Catalog holding every shape of this module.
pub fn standard_catalog() -> Result<ObjectCatalog> {
	let mut catalog = ObjectCatalog::new();
	register::<BoxShape>(&mut catalog)?;
	register::<Line>(&mut catalog)?;
	register::<Polyline>(&mut catalog)?;
	register::<Beziergon>(&mut catalog)?;
	register::<Image>(&mut catalog)?;
	register::<TextObject>(&mut catalog)?;
	register::<UmlClass>(&mut catalog)?;
	Ok(catalog)
}
