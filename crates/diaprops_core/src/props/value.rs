use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::props::registry::{KindTable, lookup_kind};
use crate::props::{
	Arrow, BezPoint, Color, DescriptorTable, Experience, FontRef, ImageData, LineStyle, Matrix, Point, PropDescriptor, PropFilter, PropFlags, PropertyKind,
	Quark, Rect, TextValue,
};

/// Payload of a custom kind: any cloneable, comparable value.
pub trait CustomPayload: Any + fmt::Debug + Send + Sync {
	/// Clone into a new box.
	fn clone_box(&self) -> Box<dyn CustomPayload>;
	/// Compare with another payload of possibly different type.
	fn eq_dyn(&self, other: &dyn CustomPayload) -> bool;
	/// Upcast for downcasting.
	fn as_any(&self) -> &dyn Any;
}

impl<T> CustomPayload for T
where
	T: Any + Clone + PartialEq + fmt::Debug + Send + Sync,
{
	fn clone_box(&self) -> Box<dyn CustomPayload> {
		Box::new(self.clone())
	}

	fn eq_dyn(&self, other: &dyn CustomPayload) -> bool {
		other.as_any().downcast_ref::<T>().is_some_and(|other| other == self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Boxed payload of a custom kind.
pub struct CustomValue(Box<dyn CustomPayload>);

impl CustomValue {
	/// Box `value`.
	pub fn new<T>(value: T) -> Self
	where
		T: Any + Clone + PartialEq + fmt::Debug + Send + Sync,
	{
		Self(Box::new(value))
	}

	/// Borrow the payload as `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.0.as_any().downcast_ref::<T>()
	}
}

impl Clone for CustomValue {
	fn clone(&self) -> Self {
		Self(self.0.clone_box())
	}
}

impl PartialEq for CustomValue {
	fn eq(&self, other: &Self) -> bool {
		self.0.eq_dyn(other.0.as_ref())
	}
}

impl fmt::Debug for CustomValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("CustomValue").field(&self.0).finish()
	}
}

/// Identity of one record, shared by every copy of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}

	/// Raw id value.
	pub fn get(self) -> u64 {
		self.0
	}
}

/// One element of a record array.
///
/// Equality compares the record's values only; two records loaded from the
/// same data are equal even though their ids differ.
#[derive(Debug, Clone)]
pub struct Record {
	id: RecordId,
	props: PropertyList,
}

impl Record {
	/// Wrap `props` in a record with a fresh id.
	pub fn new(props: PropertyList) -> Self {
		Self { id: RecordId::next(), props }
	}

	/// Default-valued record for `table`.
	pub fn from_table(table: &DescriptorTable) -> Self {
		Self::new(PropertyList::from_table(table, PropFilter::All))
	}

	/// Stable identity.
	pub fn id(&self) -> RecordId {
		self.id
	}

	/// Record values.
	pub fn props(&self) -> &PropertyList {
		&self.props
	}

	/// Mutable record values.
	pub fn props_mut(&mut self) -> &mut PropertyList {
		&mut self.props
	}
}

impl PartialEq for Record {
	fn eq(&self, other: &Self) -> bool {
		self.props == other.props
	}
}

/// Tagged property payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
	/// No payload (structural kinds).
	None,
	/// `char`.
	Char(char),
	/// `bool`.
	Bool(bool),
	/// `int`, `enum`, `connpoint_line`.
	Int(i32),
	/// `intarray`, `enumarray`.
	IntArray(Vec<i32>),
	/// `real`, `length`, `fontsize`.
	Real(f64),
	/// `point`.
	Point(Point),
	/// `pointarray`.
	PointArray(Vec<Point>),
	/// `bezpoint`.
	BezPoint(BezPoint),
	/// `bezpointarray`.
	BezPointArray(Vec<BezPoint>),
	/// `rect`.
	Rect(Rect),
	/// `endpoints`.
	Endpoints([Point; 2]),
	/// `string`, `file`, `multistring`.
	String(String),
	/// `text`.
	Text(TextValue),
	/// `linestyle`.
	LineStyle(LineStyle),
	/// `arrow`.
	Arrow(Arrow),
	/// `colour`.
	Colour(Color),
	/// `font`.
	Font(FontRef),
	/// `sarray`, `darray`.
	Records(Vec<Record>),
	/// `dict`.
	Dict(BTreeMap<String, String>),
	/// `matrix`; `None` stands for identity.
	Matrix(Option<Matrix>),
	/// `pixbuf`.
	Image(Option<ImageData>),
	/// Registered custom kind.
	Custom(CustomValue),
}

impl PropValue {
	/// Default payload for `descr`.
	pub fn default_for(descr: &PropDescriptor) -> Self {
		match descr.kind() {
			PropertyKind::Noop
			| PropertyKind::Static
			| PropertyKind::Button
			| PropertyKind::NotebookBegin
			| PropertyKind::NotebookPage
			| PropertyKind::NotebookEnd
			| PropertyKind::MultiColBegin
			| PropertyKind::MultiColColumn
			| PropertyKind::MultiColEnd
			| PropertyKind::FrameBegin
			| PropertyKind::FrameEnd => Self::None,
			PropertyKind::Char => Self::Char('\0'),
			PropertyKind::Bool => Self::Bool(false),
			PropertyKind::Int | PropertyKind::Enum | PropertyKind::ConnPointLine => Self::Int(0),
			PropertyKind::IntArray | PropertyKind::EnumArray => Self::IntArray(Vec::new()),
			PropertyKind::Real | PropertyKind::Length | PropertyKind::FontSize => Self::Real(0.0),
			PropertyKind::Point => Self::Point(Point::default()),
			PropertyKind::PointArray => Self::PointArray(Vec::new()),
			PropertyKind::BezPoint => Self::BezPoint(BezPoint::default()),
			PropertyKind::BezPointArray => Self::BezPointArray(Vec::new()),
			PropertyKind::Rect => Self::Rect(Rect::default()),
			PropertyKind::Endpoints => Self::Endpoints([Point::default(); 2]),
			PropertyKind::String | PropertyKind::File | PropertyKind::MultiString => Self::String(String::new()),
			PropertyKind::Text => Self::Text(TextValue::default()),
			PropertyKind::LineStyle => Self::LineStyle(LineStyle::default()),
			PropertyKind::Arrow => Self::Arrow(Arrow::default()),
			PropertyKind::Colour => Self::Colour(Color::default()),
			PropertyKind::Font => Self::Font(FontRef::default()),
			PropertyKind::SArray | PropertyKind::DArray => {
				let records = match descr.extra().records() {
					Some(extra) => (0..extra.static_len.unwrap_or(0)).map(|_| Record::from_table(&extra.record)).collect(),
					None => Vec::new(),
				};
				Self::Records(records)
			}
			PropertyKind::Dict => Self::Dict(BTreeMap::new()),
			PropertyKind::Matrix => Self::Matrix(None),
			PropertyKind::Pixbuf => Self::Image(None),
			kind @ PropertyKind::Custom(_) => match lookup_kind(kind) {
				KindTable::Custom(ops) => Self::Custom((ops.new_value)()),
				_ => Self::None,
			},
		}
	}

	/// True when this payload is the representation `kind` uses.
	pub fn fits(&self, kind: PropertyKind) -> bool {
		match self {
			Self::None => !kind.has_payload(),
			Self::Char(_) => kind == PropertyKind::Char,
			Self::Bool(_) => kind == PropertyKind::Bool,
			Self::Int(_) => matches!(kind, PropertyKind::Int | PropertyKind::Enum | PropertyKind::ConnPointLine),
			Self::IntArray(_) => matches!(kind, PropertyKind::IntArray | PropertyKind::EnumArray),
			Self::Real(_) => matches!(kind, PropertyKind::Real | PropertyKind::Length | PropertyKind::FontSize),
			Self::Point(_) => kind == PropertyKind::Point,
			Self::PointArray(_) => kind == PropertyKind::PointArray,
			Self::BezPoint(_) => kind == PropertyKind::BezPoint,
			Self::BezPointArray(_) => kind == PropertyKind::BezPointArray,
			Self::Rect(_) => kind == PropertyKind::Rect,
			Self::Endpoints(_) => kind == PropertyKind::Endpoints,
			Self::String(_) => matches!(kind, PropertyKind::String | PropertyKind::File | PropertyKind::MultiString),
			Self::Text(_) => kind == PropertyKind::Text,
			Self::LineStyle(_) => kind == PropertyKind::LineStyle,
			Self::Arrow(_) => kind == PropertyKind::Arrow,
			Self::Colour(_) => kind == PropertyKind::Colour,
			Self::Font(_) => kind == PropertyKind::Font,
			Self::Records(_) => kind.is_record_array(),
			Self::Dict(_) => kind == PropertyKind::Dict,
			Self::Matrix(_) => kind == PropertyKind::Matrix,
			Self::Image(_) => kind == PropertyKind::Pixbuf,
			Self::Custom(_) => matches!(kind, PropertyKind::Custom(_)),
		}
	}

	/// Label of the payload representation.
	pub fn shape_name(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Char(_) => "char",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::IntArray(_) => "intarray",
			Self::Real(_) => "real",
			Self::Point(_) => "point",
			Self::PointArray(_) => "pointarray",
			Self::BezPoint(_) => "bezpoint",
			Self::BezPointArray(_) => "bezpointarray",
			Self::Rect(_) => "rect",
			Self::Endpoints(_) => "endpoints",
			Self::String(_) => "string",
			Self::Text(_) => "text",
			Self::LineStyle(_) => "linestyle",
			Self::Arrow(_) => "arrow",
			Self::Colour(_) => "colour",
			Self::Font(_) => "font",
			Self::Records(_) => "records",
			Self::Dict(_) => "dict",
			Self::Matrix(_) => "matrix",
			Self::Image(_) => "pixbuf",
			Self::Custom(_) => "custom",
		}
	}
}

/// One named, typed value bound to its descriptor.
#[derive(Debug, Clone)]
pub struct Property {
	descr: Arc<PropDescriptor>,
	/// Current payload.
	pub value: PropValue,
	/// What happened to this value so far.
	pub experience: Experience,
}

impl Property {
	/// Default-valued property for `descr`.
	pub fn new(descr: Arc<PropDescriptor>) -> Self {
		let value = PropValue::default_for(&descr);
		Self {
			descr,
			value,
			experience: Experience::empty(),
		}
	}

	/// Property holding `value`.
	pub fn with_value(descr: Arc<PropDescriptor>, value: PropValue) -> Self {
		Self {
			descr,
			value,
			experience: Experience::empty(),
		}
	}

	/// Descriptor back-reference.
	pub fn descr(&self) -> &Arc<PropDescriptor> {
		&self.descr
	}

	/// Property name.
	pub fn name(&self) -> &str {
		self.descr.name()
	}

	/// Property kind.
	pub fn kind(&self) -> PropertyKind {
		self.descr.kind()
	}

	/// Interned name.
	pub fn quark(&self) -> Quark {
		self.descr.quark()
	}

	/// True unless the value was marked [`Experience::NOTSET`].
	pub fn is_set(&self) -> bool {
		!self.experience.contains(Experience::NOTSET)
	}

	/// Same descriptor with a default value.
	pub fn copy_empty(&self) -> Self {
		Self::new(self.descr.clone())
	}

	/// Replace the payload when it fits this property's kind.
	pub fn set_value(&mut self, value: PropValue) -> bool {
		if !value.fits(self.kind()) {
			return false;
		}
		self.value = value;
		self.experience.remove(Experience::NOTSET);
		true
	}
}

impl PartialEq for Property {
	fn eq(&self, other: &Self) -> bool {
		self.quark() == other.quark() && self.kind() == other.kind() && self.value == other.value
	}
}

/// Ordered set of property values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyList {
	props: Vec<Property>,
}

impl PropertyList {
	/// Empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Default-valued properties for the descriptors of `table` passing `filter`.
	pub fn from_table(table: &DescriptorTable, filter: PropFilter) -> Self {
		Self::from_descs(table.iter(), filter)
	}

	/// Default-valued properties for `descs` passing `filter`.
	pub fn from_descs<'a>(descs: impl IntoIterator<Item = &'a Arc<PropDescriptor>>, filter: PropFilter) -> Self {
		let props = descs
			.into_iter()
			.filter(|descr| filter.matches(descr.flags()))
			.map(|descr| Property::new(descr.clone()))
			.collect();
		Self { props }
	}

	/// List holding one property.
	pub fn single(prop: Property) -> Self {
		Self { props: vec![prop] }
	}

	/// Append a property.
	pub fn push(&mut self, prop: Property) {
		self.props.push(prop);
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.props.len()
	}

	/// True when the list is empty.
	pub fn is_empty(&self) -> bool {
		self.props.is_empty()
	}

	/// Iterate properties in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Property> {
		self.props.iter()
	}

	/// Iterate properties mutably in order.
	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Property> {
		self.props.iter_mut()
	}

	/// Property at `index`.
	pub fn get(&self, index: usize) -> Option<&Property> {
		self.props.get(index)
	}

	/// Mutable property at `index`.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut Property> {
		self.props.get_mut(index)
	}

	/// Property named by `quark`.
	pub fn find_quark(&self, quark: Quark) -> Option<&Property> {
		self.props.iter().find(|prop| prop.quark() == quark)
	}

	/// Property named `name`.
	pub fn find(&self, name: &str) -> Option<&Property> {
		Quark::lookup(name).and_then(|quark| self.find_quark(quark))
	}

	/// Mutable property named `name`.
	pub fn find_mut(&mut self, name: &str) -> Option<&mut Property> {
		let quark = Quark::lookup(name)?;
		self.props.iter_mut().find(|prop| prop.quark() == quark)
	}

	/// Same descriptors with default values.
	pub fn copy_empty(&self) -> Self {
		Self {
			props: self.props.iter().map(Property::copy_empty).collect(),
		}
	}

	/// Keep only properties for which `keep` returns true.
	pub fn retain(&mut self, keep: impl FnMut(&Property) -> bool) {
		self.props.retain(keep);
	}

	/// Property names in order.
	pub fn names(&self) -> Vec<&str> {
		self.props.iter().map(Property::name).collect()
	}
}

impl<'a> IntoIterator for &'a PropertyList {
	type Item = &'a Property;
	type IntoIter = std::slice::Iter<'a, Property>;

	fn into_iter(self) -> Self::IntoIter {
		self.props.iter()
	}
}

impl<'a> IntoIterator for &'a mut PropertyList {
	type Item = &'a mut Property;
	type IntoIter = std::slice::IterMut<'a, Property>;

	fn into_iter(self) -> Self::IntoIter {
		self.props.iter_mut()
	}
}

impl IntoIterator for PropertyList {
	type Item = Property;
	type IntoIter = std::vec::IntoIter<Property>;

	fn into_iter(self) -> Self::IntoIter {
		self.props.into_iter()
	}
}

impl FromIterator<Property> for PropertyList {
	fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
		Self {
			props: iter.into_iter().collect(),
		}
	}
}

fn synthetic_descriptors() -> &'static Mutex<HashMap<(String, PropertyKind), Arc<PropDescriptor>>> {
	static SYNTHETIC: OnceLock<Mutex<HashMap<(String, PropertyKind), Arc<PropDescriptor>>>> = OnceLock::new();
	SYNTHETIC.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Default-valued property with an ad-hoc descriptor.
///
/// Descriptors are cached per (name, kind); `flags` only applies to the call
/// that creates the cache entry.
pub fn make_new_prop(name: &str, kind: PropertyKind, flags: PropFlags) -> Property {
	let mut cache = synthetic_descriptors().lock().unwrap_or_else(PoisonError::into_inner);
	let descr = cache
		.entry((name.to_owned(), kind))
		.or_insert_with(|| Arc::new(PropDescriptor::new(name, kind).with_flags(flags)))
		.clone();
	drop(cache);
	Property::new(descr)
}

#[cfg(test)]
mod tests;
