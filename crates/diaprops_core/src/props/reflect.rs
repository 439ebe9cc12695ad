//! Generic get/set of property values on host structs through typed field
//! accessor tables.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::props::{
	Arrow, BezPoint, Color, Diagnostics, Experience, FontRef, ImageData, LineStyle, LineStyleKind, Matrix, Point, PropDescriptor, PropFilter, PropValue,
	Property, PropertyKind, PropertyList, Quark, Record, Rect, TextValue, Warning,
};

/// Host field type that maps one-to-one onto a [`PropValue`] representation.
pub trait PropField: Clone + Send + Sync + 'static {
	/// Wrap a copy of the field.
	fn to_value(&self) -> PropValue;
	/// Unwrap a value of the matching representation.
	fn from_value(value: &PropValue) -> Option<Self>;
}

macro_rules! prop_field {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl PropField for $ty {
				fn to_value(&self) -> PropValue {
					PropValue::$variant(self.clone())
				}

				fn from_value(value: &PropValue) -> Option<Self> {
					match value {
						PropValue::$variant(inner) => Some(inner.clone()),
						_ => None,
					}
				}
			}
		)*
	};
}

prop_field! {
	bool => Bool,
	char => Char,
	i32 => Int,
	f64 => Real,
	String => String,
	Vec<i32> => IntArray,
	Point => Point,
	Vec<Point> => PointArray,
	BezPoint => BezPoint,
	Vec<BezPoint> => BezPointArray,
	Rect => Rect,
	[Point; 2] => Endpoints,
	TextValue => Text,
	LineStyle => LineStyle,
	Arrow => Arrow,
	Color => Colour,
	FontRef => Font,
	BTreeMap<String, String> => Dict,
	Option<Matrix> => Matrix,
	Option<ImageData> => Image,
}

/// Value assembled from two separate host fields.
pub trait PairField: Sized {
	/// Field holding the first half.
	type First: Clone + Send + Sync + 'static;
	/// Field holding the second half.
	type Second: Clone + Send + Sync + 'static;

	/// Join both halves into one value.
	fn join(first: &Self::First, second: &Self::Second) -> PropValue;
	/// Split a value back into its halves.
	fn split(value: &PropValue) -> Option<(Self::First, Self::Second)>;
}

impl PairField for LineStyle {
	type First = LineStyleKind;
	type Second = f64;

	fn join(style: &LineStyleKind, dash: &f64) -> PropValue {
		PropValue::LineStyle(LineStyle { style: *style, dash: *dash })
	}

	fn split(value: &PropValue) -> Option<(LineStyleKind, f64)> {
		match value {
			PropValue::LineStyle(style) => Some((style.style, style.dash)),
			_ => None,
		}
	}
}

type ReadFn<T> = Box<dyn Fn(&T, &PropDescriptor, &mut Diagnostics) -> PropValue + Send + Sync>;
/// `None` when the value does not have the field's representation,
/// otherwise whether nested records were fully handled.
type WriteFn<T> = Box<dyn Fn(&mut T, &Property, &mut Diagnostics) -> Option<bool> + Send + Sync>;

struct OffsetEntry<T> {
	name: String,
	quark: Quark,
	kind: PropertyKind,
	read: ReadFn<T>,
	write: WriteFn<T>,
}

/// Ordered accessor table of one host type.
pub struct OffsetTable<T> {
	type_name: String,
	entries: Vec<OffsetEntry<T>>,
	index: HashMap<Quark, usize>,
}

impl<T> std::fmt::Debug for OffsetTable<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OffsetTable")
			.field("type_name", &self.type_name)
			.field("entries", &self.entries.iter().map(|entry| (&entry.name, entry.kind)).collect::<Vec<_>>())
			.finish()
	}
}

impl<T: 'static> OffsetTable<T> {
	/// Empty table for host type `type_name`.
	pub fn new(type_name: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	fn entry(mut self, name: &str, kind: PropertyKind, read: ReadFn<T>, write: WriteFn<T>) -> Self {
		let quark = Quark::intern(name);
		self.index.entry(quark).or_insert(self.entries.len());
		self.entries.push(OffsetEntry {
			name: name.to_owned(),
			quark,
			kind,
			read,
			write,
		});
		self
	}

	/// Map `name` onto one host field copied in and out as is.
	pub fn field<F: PropField>(self, name: &str, kind: PropertyKind, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
		self.entry(
			name,
			kind,
			Box::new(move |host, _, _| get(host).to_value()),
			Box::new(move |host, prop, _| {
				let value = F::from_value(&prop.value)?;
				*get_mut(host) = value;
				Some(true)
			}),
		)
	}

	/// Map `name` onto two host fields forming one value.
	pub fn pair<P: PairField>(
		self,
		name: &str,
		kind: PropertyKind,
		first: fn(&T) -> &P::First,
		first_mut: fn(&mut T) -> &mut P::First,
		second: fn(&T) -> &P::Second,
		second_mut: fn(&mut T) -> &mut P::Second,
	) -> Self {
		self.entry(
			name,
			kind,
			Box::new(move |host, _, _| P::join(first(host), second(host))),
			Box::new(move |host, prop, _| {
				let (a, b) = P::split(&prop.value)?;
				*first_mut(host) = a;
				*second_mut(host) = b;
				Some(true)
			}),
		)
	}

	/// Map `name` onto a computed getter and setter.
	///
	/// `set` returns false when it cannot accept the value.
	pub fn derived(self, name: &str, kind: PropertyKind, get: fn(&T) -> PropValue, set: fn(&mut T, &PropValue) -> bool) -> Self {
		self.entry(
			name,
			kind,
			Box::new(move |host, _, _| get(host)),
			Box::new(move |host, prop, _| set(host, &prop.value).then_some(true)),
		)
	}

	/// Map `name` onto a growable list of sub-records (DArray).
	///
	/// Writing builds the new list first, reusing existing records by
	/// position and creating the rest with `new_record`, then replaces the
	/// host's list.
	pub fn records<R: Clone + 'static>(
		self,
		name: &str,
		get: fn(&T) -> &Vec<R>,
		get_mut: fn(&mut T) -> &mut Vec<R>,
		table: Arc<OffsetTable<R>>,
		new_record: fn() -> R,
	) -> Self {
		let reader = table.clone();
		self.entry(
			name,
			PropertyKind::DArray,
			Box::new(move |host, descr, diag| PropValue::Records(read_records(&reader, get(host), descr, diag))),
			Box::new(move |host, prop, diag| {
				let PropValue::Records(records) = &prop.value else {
					return None;
				};
				let existing = get(host);
				let mut complete = true;
				let staged: Vec<R> = records
					.iter()
					.enumerate()
					.map(|(at, record)| {
						let mut item = existing.get(at).cloned().unwrap_or_else(new_record);
						complete &= table.set_props_with(&mut item, record.props(), diag);
						item
					})
					.collect();
				*get_mut(host) = staged;
				Some(complete)
			}),
		)
	}

	/// Map `name` onto a fixed-length run of sub-records (SArray).
	///
	/// Records beyond the host's length are ignored.
	pub fn static_records<R: Clone + 'static>(self, name: &str, get: fn(&T) -> &[R], get_mut: fn(&mut T) -> &mut [R], table: Arc<OffsetTable<R>>) -> Self {
		let reader = table.clone();
		self.entry(
			name,
			PropertyKind::SArray,
			Box::new(move |host, descr, diag| PropValue::Records(read_records(&reader, get(host), descr, diag))),
			Box::new(move |host, prop, diag| {
				let PropValue::Records(records) = &prop.value else {
					return None;
				};
				let mut staged = get(host).to_vec();
				let mut complete = true;
				for (item, record) in staged.iter_mut().zip(records) {
					complete &= table.set_props_with(item, record.props(), diag);
				}
				get_mut(host).clone_from_slice(&staged);
				Some(complete)
			}),
		)
	}

	/// Host type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entry names in order.
	pub fn names(&self) -> Vec<&str> {
		self.entries.iter().map(|entry| entry.name.as_str()).collect()
	}

	/// Kind of the entry named by `quark`.
	pub fn kind_of(&self, quark: Quark) -> Option<PropertyKind> {
		self.lookup(quark).map(|entry| entry.kind)
	}

	fn lookup(&self, quark: Quark) -> Option<&OffsetEntry<T>> {
		self.index.get(&quark).and_then(|at| self.entries.get(*at))
	}

	fn resolve(&self, prop: &Property, diag: &mut Diagnostics) -> Option<&OffsetEntry<T>> {
		let Some(entry) = self.lookup(prop.quark()) else {
			diag.warn(Warning::LookupMiss {
				type_name: self.type_name.clone(),
				name: prop.name().to_owned(),
				kind: prop.kind().to_string(),
			});
			return None;
		};
		if entry.kind != prop.kind() {
			diag.warn(Warning::KindMismatch {
				name: prop.name().to_owned(),
				expected: entry.kind.to_string(),
				got: prop.kind().to_string(),
			});
			return None;
		}
		Some(entry)
	}

	/// Read every property of `props` from `host`, dropping warnings.
	pub fn get_props(&self, host: &T, props: &mut PropertyList) -> bool {
		self.get_props_with(host, props, &mut Diagnostics::new())
	}

	/// Read every property of `props` from `host`.
	///
	/// Properties without a matching entry keep their value, are marked
	/// [`Experience::NOTSET`], and make the result false.
	pub fn get_props_with(&self, host: &T, props: &mut PropertyList, diag: &mut Diagnostics) -> bool {
		let mut complete = true;
		for prop in props.iter_mut() {
			if !prop.kind().has_payload() {
				continue;
			}
			let Some(entry) = self.resolve(prop, diag) else {
				prop.experience |= Experience::NOTSET;
				complete = false;
				continue;
			};
			prop.value = (entry.read)(host, prop.descr(), diag);
			prop.experience.remove(Experience::NOTSET);
			prop.experience |= Experience::GET_FROM_HOST;
		}
		complete
	}

	/// Write every set property of `props` into `host`, dropping warnings.
	pub fn set_props(&self, host: &mut T, props: &PropertyList) -> bool {
		self.set_props_with(host, props, &mut Diagnostics::new())
	}

	/// Write every set property of `props` into `host`.
	///
	/// Properties marked [`Experience::NOTSET`] are skipped. Unknown names,
	/// kind mismatches and values of the wrong representation leave the host
	/// field untouched and make the result false.
	pub fn set_props_with(&self, host: &mut T, props: &PropertyList, diag: &mut Diagnostics) -> bool {
		let mut complete = true;
		for prop in props {
			if !prop.kind().has_payload() || !prop.is_set() {
				continue;
			}
			let Some(entry) = self.resolve(prop, diag) else {
				complete = false;
				continue;
			};
			match (entry.write)(host, prop, diag) {
				Some(done) => complete &= done,
				None => {
					diag.warn(Warning::KindMismatch {
						name: prop.name().to_owned(),
						expected: entry.kind.to_string(),
						got: prop.value.shape_name().to_owned(),
					});
					complete = false;
				}
			}
		}
		complete
	}
}

fn read_records<R: 'static>(table: &OffsetTable<R>, items: &[R], descr: &PropDescriptor, diag: &mut Diagnostics) -> Vec<Record> {
	let Some(extra) = descr.extra().records() else {
		return Vec::new();
	};
	items
		.iter()
		.map(|item| {
			let mut props = PropertyList::from_table(&extra.record, PropFilter::All);
			table.get_props_with(item, &mut props, diag);
			Record::new(props)
		})
		.collect()
}
