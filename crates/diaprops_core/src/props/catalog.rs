use std::sync::Arc;

use crate::props::{DescriptorTable, ObjectId, PropError, PropertyObject, Result};

/// Descriptor table of an object type.
pub type DescribeFn = fn() -> Arc<DescriptorTable>;
/// Default-valued object of a type.
pub type CreateFn = fn(ObjectId) -> Box<dyn PropertyObject>;

#[derive(Debug, Clone)]
struct ObjectType {
	name: String,
	describe: DescribeFn,
	create: CreateFn,
}

/// Object types that documents can recreate by name.
#[derive(Debug, Clone, Default)]
pub struct ObjectCatalog {
	types: Vec<ObjectType>,
}

impl ObjectCatalog {
	/// Empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an object type.
	pub fn register(&mut self, name: impl Into<String>, describe: DescribeFn, create: CreateFn) -> Result<()> {
		let name = name.into();
		if self.contains(&name) {
			return Err(PropError::DuplicateObjectType { name });
		}
		self.types.push(ObjectType { name, describe, create });
		Ok(())
	}

	fn find(&self, name: &str) -> Result<&ObjectType> {
		self.types
			.iter()
			.find(|ty| ty.name == name)
			.ok_or_else(|| PropError::UnknownObjectType { name: name.to_owned() })
	}

	/// True when `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.types.iter().any(|ty| ty.name == name)
	}

	/// New default-valued object of type `name`.
	pub fn create(&self, name: &str, id: ObjectId) -> Result<Box<dyn PropertyObject>> {
		Ok((self.find(name)?.create)(id))
	}

	/// Descriptor table of type `name`.
	pub fn describe(&self, name: &str) -> Result<Arc<DescriptorTable>> {
		Ok((self.find(name)?.describe)())
	}

	/// Registered type names in registration order.
	pub fn type_names(&self) -> Vec<&str> {
		self.types.iter().map(|ty| ty.name.as_str()).collect()
	}
}
