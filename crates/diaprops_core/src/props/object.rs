//! Host objects and the property helpers built on them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::props::{
	AttributeHost, ChangeRecord, CodecOptions, DescriptorTable, Diagnostics, Experience, MergeOption, PropError, PropFilter, PropFlags, PropValue, Property,
	PropertyKind, PropertyList, Result, apply_props, load_props, make_new_prop, merge, save_props,
};

/// Identity of a host object inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Object whose attributes are exposed as properties.
pub trait PropertyObject {
	/// Document-wide identity.
	fn id(&self) -> ObjectId;

	/// Object type name, as persisted.
	fn type_name(&self) -> &str;

	/// Descriptor table of this object's type.
	fn describe(&self) -> Arc<DescriptorTable>;

	/// Fill `props` with the object's current values.
	///
	/// Returns false when some property could not be read.
	fn get_props(&self, props: &mut PropertyList, diag: &mut Diagnostics) -> bool;

	/// Write the set values of `props` into the object.
	///
	/// Returns false when some property could not be written.
	fn set_props(&mut self, props: &PropertyList, diag: &mut Diagnostics) -> bool;
}

/// Combined descriptor table of a selection.
///
/// A single object always uses its whole table; union only applies to real
/// multi-selections.
pub fn describe_objects(objects: &[&dyn PropertyObject], option: MergeOption) -> DescriptorTable {
	let tables: Vec<Arc<DescriptorTable>> = objects.iter().map(|object| object.describe()).collect();
	let option = if tables.len() == 1 { MergeOption::Intersection } else { option };
	merge(tables.iter().map(Arc::as_ref), option)
}

/// Current values of the properties of `object` passing `filter`.
pub fn object_props(object: &dyn PropertyObject, filter: PropFilter, diag: &mut Diagnostics) -> PropertyList {
	let mut props = PropertyList::from_table(&object.describe(), filter);
	object.get_props(&mut props, diag);
	props
}

/// Current value of the property `name`, optionally restricted to one kind.
pub fn prop_by_name(object: &dyn PropertyObject, name: &str, kind: Option<PropertyKind>) -> Option<Property> {
	let table = object.describe();
	let descr = table.find(name)?;
	if kind.is_some_and(|kind| kind != descr.kind()) {
		return None;
	}
	let mut props = PropertyList::single(Property::new(descr.clone()));
	object.get_props(&mut props, &mut Diagnostics::new());
	props.into_iter().next()
}

/// Copy the persisted values of `src` into `dest`.
///
/// With `defaults` only non-standard values that may serve as defaults are
/// copied. Both objects must be of the same type.
pub fn copy_props(dest: &mut dyn PropertyObject, src: &dyn PropertyObject, defaults: bool, diag: &mut Diagnostics) -> Result<bool> {
	if src.type_name() != dest.type_name() {
		return Err(PropError::CopyTypeMismatch {
			src: src.type_name().to_owned(),
			dest: dest.type_name().to_owned(),
		});
	}
	let filter = if defaults { PropFilter::DoSaveNonStandardDefaults } else { PropFilter::DoSave };
	let mut props = object_props(src, filter, diag);
	for prop in props.iter_mut() {
		prop.experience |= Experience::COPIED;
	}
	Ok(dest.set_props(&props, diag))
}

/// Read the loadable properties of `object` from `node` and write them in.
pub fn load_object_props(object: &mut dyn PropertyObject, node: &impl AttributeHost, opts: &CodecOptions, diag: &mut Diagnostics) -> bool {
	let mut props = PropertyList::from_table(&object.describe(), PropFilter::DoLoad);
	let loaded = load_props(&mut props, node, opts, diag);
	object.set_props(&props, diag) && loaded
}

/// Write the persisted properties of `object` into `node`.
pub fn save_object_props(object: &dyn PropertyObject, node: &mut impl AttributeHost, opts: &CodecOptions, diag: &mut Diagnostics) {
	let props = object_props(object, PropFilter::DoSave, diag);
	save_props(&props, node, opts);
}

/// Set the boolean property `name` with change tracking.
pub fn toggle_prop(object: &mut dyn PropertyObject, name: &str, value: bool, diag: &mut Diagnostics) -> ChangeRecord {
	let mut prop = make_new_prop(name, PropertyKind::Bool, PropFlags::empty());
	prop.value = PropValue::Bool(value);
	apply_props(object, &PropertyList::single(prop), diag)
}

/// Set the string, file or text property `name` with change tracking.
///
/// Returns `None` when the object has no such property.
pub fn set_string_prop(object: &mut dyn PropertyObject, name: &str, value: &str, diag: &mut Diagnostics) -> Option<ChangeRecord> {
	let mut prop = [PropertyKind::String, PropertyKind::File, PropertyKind::MultiString, PropertyKind::Text]
		.into_iter()
		.find_map(|kind| prop_by_name(&*object, name, Some(kind)))?;
	match &mut prop.value {
		PropValue::String(text) => *text = value.to_owned(),
		PropValue::Text(text) => text.string = value.to_owned(),
		_ => return None,
	}
	prop.experience.remove(Experience::NOTSET);
	Some(apply_props(object, &PropertyList::single(prop), diag))
}
