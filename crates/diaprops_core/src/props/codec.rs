use std::collections::BTreeMap;

use crate::props::blob::{decode_chunked, encode_chunked};
use crate::props::registry::{KindTable, lookup_kind};
use crate::props::{
	Arrow, ArrowType, AttributeHost, AttributeNode, CompositeNode, DataError, DataNode, Diagnostics, Experience, ImageData, LineStyle, LineStyleKind,
	PropDescriptor, PropFilter, PropFlags, PropValue, Property, PropertyKind, PropertyList, Record, TextAlign, TextValue, Warning,
};

/// Composite type written for dictionary values.
pub const DICT_COMPOSITE: &str = "dict";
/// Composite type written for text values.
pub const TEXT_COMPOSITE: &str = "text";

/// Runtime limits and behavior switches for the attribute codec.
#[derive(Debug, Clone)]
pub struct CodecOptions {
	/// Bytes fed to the base64 encoder per step when saving images.
	pub blob_chunk_size: usize,
	/// Maximum number of records loaded into one record array.
	pub max_records: usize,
	/// Report non-optional attributes missing from a persisted object.
	pub warn_on_missing: bool,
}

impl Default for CodecOptions {
	fn default() -> Self {
		Self {
			blob_chunk_size: 4096,
			max_records: 65536,
			warn_on_missing: true,
		}
	}
}

impl CodecOptions {
	/// Preset for reading partial documents such as defaults files.
	pub fn quiet() -> Self {
		Self {
			warn_on_missing: false,
			..Self::default()
		}
	}
}

enum Failure {
	NoData,
	Bad(DataError),
}

impl From<DataError> for Failure {
	fn from(err: DataError) -> Self {
		Self::Bad(err)
	}
}

fn first(attr: &AttributeNode) -> Result<&DataNode, Failure> {
	attr.first().ok_or(Failure::NoData)
}

fn skipped_by_save_path(prop: &Property) -> bool {
	if !prop.kind().has_payload() || !PropFilter::DoSave.matches(prop.descr().flags()) {
		return true;
	}
	match &prop.value {
		PropValue::Matrix(None) => true,
		PropValue::Matrix(Some(matrix)) => matrix.is_identity(),
		PropValue::Custom(_) => !matches!(lookup_kind(prop.kind()), KindTable::Custom(ops) if ops.save.is_some()),
		_ => false,
	}
}

/// Write every persisted property of `props` into `host`.
///
/// Structural kinds, `DONT_SAVE`, `SELF_ONLY` and `LOAD_ONLY` properties are
/// skipped, as are identity matrices.
pub fn save_props(props: &PropertyList, host: &mut impl AttributeHost, opts: &CodecOptions) {
	for prop in props {
		if skipped_by_save_path(prop) {
			continue;
		}
		let attr = host.add_attribute(prop.name());
		save_value(prop, attr, opts);
	}
}

/// Append the data nodes for `prop` to `attr`.
pub fn save_value(prop: &Property, attr: &mut AttributeNode, opts: &CodecOptions) {
	let kind = prop.kind();
	match &prop.value {
		PropValue::None => {}
		PropValue::Char(ch) => attr.push(DataNode::string(ch.to_string())),
		PropValue::Bool(value) => attr.push(DataNode::boolean(*value)),
		PropValue::Int(value) if kind == PropertyKind::Enum => attr.push(DataNode::enumeration(*value)),
		PropValue::Int(value) => attr.push(DataNode::int(*value)),
		PropValue::IntArray(values) => {
			let enums = kind == PropertyKind::EnumArray;
			for value in values {
				attr.push(if enums { DataNode::enumeration(*value) } else { DataNode::int(*value) });
			}
		}
		PropValue::Real(value) => attr.push(DataNode::real(*value)),
		PropValue::Point(point) => attr.push(DataNode::point(*point)),
		PropValue::PointArray(points) => attr.data.extend(points.iter().copied().map(DataNode::point)),
		PropValue::BezPoint(point) => attr.push(DataNode::bezpoint(*point)),
		PropValue::BezPointArray(points) => attr.data.extend(points.iter().copied().map(DataNode::bezpoint)),
		PropValue::Rect(rect) => attr.push(DataNode::rect(*rect)),
		PropValue::Endpoints(points) => attr.data.extend(points.iter().copied().map(DataNode::point)),
		PropValue::String(text) => attr.push(DataNode::string(text.clone())),
		PropValue::Text(text) => attr.push(DataNode::Composite(save_text(text))),
		PropValue::LineStyle(style) => {
			attr.push(DataNode::enumeration(style.style.as_i32()));
			attr.push(DataNode::real(style.dash));
		}
		PropValue::Arrow(arrow) => {
			attr.push(DataNode::enumeration(arrow.kind.as_i32()));
			if arrow.kind != ArrowType::None {
				attr.push(DataNode::real(arrow.length));
				attr.push(DataNode::real(arrow.width));
			}
		}
		PropValue::Colour(colour) => attr.push(DataNode::colour(*colour)),
		PropValue::Font(font) => attr.push(DataNode::font(font)),
		PropValue::Records(records) => {
			let composite_type = prop.descr().extra().records().map_or("record", |extra| extra.composite_type.as_str());
			for record in records {
				let mut node = CompositeNode::new(composite_type);
				save_props(record.props(), &mut node, opts);
				attr.push(DataNode::Composite(node));
			}
		}
		PropValue::Dict(entries) => {
			let mut node = CompositeNode::new(DICT_COMPOSITE);
			for (key, value) in entries {
				node.add_attribute(key).push(DataNode::string(value.clone()));
			}
			attr.push(DataNode::Composite(node));
		}
		PropValue::Matrix(Some(matrix)) if !matrix.is_identity() => attr.push(DataNode::matrix(*matrix)),
		PropValue::Matrix(_) => {}
		PropValue::Image(Some(image)) => attr.push(DataNode::Pixbuf(encode_chunked(&image.bytes, opts.blob_chunk_size))),
		PropValue::Image(None) => {}
		PropValue::Custom(value) => {
			if let KindTable::Custom(ops) = lookup_kind(kind)
				&& let Some(save) = ops.save
			{
				save(value, attr);
			}
		}
	}
}

fn save_text(text: &TextValue) -> CompositeNode {
	let mut node = CompositeNode::new(TEXT_COMPOSITE);
	node.add_attribute("string").push(DataNode::string(text.string.clone()));
	node.add_attribute("font").push(DataNode::font(&text.font));
	node.add_attribute("height").push(DataNode::real(text.height));
	node.add_attribute("color").push(DataNode::colour(text.colour));
	node.add_attribute("alignment").push(DataNode::enumeration(text.alignment.as_i32()));
	node
}

/// Read every loadable property of `props` from `host`.
///
/// Returns false when a non-optional attribute was missing or malformed;
/// the affected properties keep their defaults and are marked
/// [`Experience::NOTSET`].
pub fn load_props(props: &mut PropertyList, host: &impl AttributeHost, opts: &CodecOptions, diag: &mut Diagnostics) -> bool {
	let mut complete = true;
	for prop in props.iter_mut() {
		let kind = prop.kind();
		if !kind.has_payload() {
			continue;
		}
		if !PropFilter::DoLoad.matches(prop.descr().flags()) {
			prop.experience |= Experience::NOTSET;
			continue;
		}
		match lookup_kind(kind) {
			KindTable::Custom(ops) if ops.load.is_none() => {
				prop.experience |= Experience::NOTSET;
				continue;
			}
			KindTable::Empty => {
				diag.warn(Warning::UnregisteredKind {
					name: prop.name().to_owned(),
					tag: kind.tag().0,
				});
				prop.experience |= Experience::NOTSET;
				complete = false;
				continue;
			}
			_ => {}
		}

		match host.find_attribute(prop.name()) {
			Some(attr) => complete &= load_value(prop, attr, opts, diag),
			None if kind == PropertyKind::Matrix => {
				prop.value = PropValue::Matrix(None);
				prop.experience.remove(Experience::NOTSET);
				prop.experience |= Experience::LOADED;
			}
			None => {
				prop.experience |= Experience::NOTSET;
				if prop.descr().has_flags(PropFlags::OPTIONAL) {
					continue;
				}
				if opts.warn_on_missing {
					diag.warn(Warning::MissingAttribute {
						name: prop.name().to_owned(),
						kind: kind.to_string(),
					});
				}
				complete = false;
			}
		}
	}
	complete
}

/// Read `prop` from `attr`.
///
/// On failure the property keeps its previous value, gets
/// [`Experience::NOTSET`], and a warning is reported.
pub fn load_value(prop: &mut Property, attr: &AttributeNode, opts: &CodecOptions, diag: &mut Diagnostics) -> bool {
	let mut complete = true;
	let result = read_value(prop.descr(), attr, opts, diag, &mut complete);
	match result {
		Ok(value) => {
			prop.value = value;
			prop.experience.remove(Experience::NOTSET);
			prop.experience |= Experience::LOADED;
			complete
		}
		Err(failure) => {
			let name = prop.name().to_owned();
			let kind = prop.kind().to_string();
			diag.warn(match failure {
				Failure::NoData => Warning::MissingAttribute { name, kind },
				Failure::Bad(err) => Warning::BadLiteral {
					name,
					kind,
					detail: err.to_string(),
				},
			});
			prop.experience |= Experience::NOTSET;
			false
		}
	}
}

fn read_value(descr: &PropDescriptor, attr: &AttributeNode, opts: &CodecOptions, diag: &mut Diagnostics, complete: &mut bool) -> Result<PropValue, Failure> {
	let value = match descr.kind() {
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
		| PropertyKind::FrameEnd => PropValue::None,
		PropertyKind::Char => {
			let node = first(attr)?;
			let text = node.as_string()?;
			let ch = text.chars().next().ok_or_else(|| DataError::Malformed {
				expected: "char",
				text: text.to_owned(),
			})?;
			PropValue::Char(ch)
		}
		PropertyKind::Bool => PropValue::Bool(first(attr)?.as_bool()?),
		PropertyKind::Int | PropertyKind::ConnPointLine => PropValue::Int(first(attr)?.as_int()?),
		PropertyKind::Enum => PropValue::Int(first(attr)?.as_enum()?),
		PropertyKind::IntArray => PropValue::IntArray(attr.data.iter().map(DataNode::as_int).collect::<Result<Vec<_>, _>>()?),
		PropertyKind::EnumArray => PropValue::IntArray(attr.data.iter().map(DataNode::as_enum).collect::<Result<Vec<_>, _>>()?),
		PropertyKind::Real | PropertyKind::Length | PropertyKind::FontSize => PropValue::Real(first(attr)?.as_real()?),
		PropertyKind::Point => PropValue::Point(first(attr)?.as_point()?),
		PropertyKind::PointArray => PropValue::PointArray(attr.data.iter().map(DataNode::as_point).collect::<Result<Vec<_>, _>>()?),
		PropertyKind::BezPoint => PropValue::BezPoint(first(attr)?.as_bezpoint()?),
		PropertyKind::BezPointArray => PropValue::BezPointArray(attr.data.iter().map(DataNode::as_bezpoint).collect::<Result<Vec<_>, _>>()?),
		PropertyKind::Rect => PropValue::Rect(first(attr)?.as_rect()?),
		PropertyKind::Endpoints => match attr.data.as_slice() {
			[] => return Err(Failure::NoData),
			[start, end] => PropValue::Endpoints([start.as_point()?, end.as_point()?]),
			other => {
				return Err(Failure::Bad(DataError::Malformed {
					expected: "endpoints",
					text: format!("{} points", other.len()),
				}));
			}
		},
		PropertyKind::String | PropertyKind::File | PropertyKind::MultiString => PropValue::String(first(attr)?.as_string()?.to_owned()),
		PropertyKind::Text => PropValue::Text(read_text(first(attr)?.as_composite()?)?),
		PropertyKind::LineStyle => {
			let code = first(attr)?.as_enum()?;
			let style = LineStyleKind::from_i32(code).ok_or_else(|| DataError::Malformed {
				expected: "linestyle",
				text: code.to_string(),
			})?;
			let dash = match attr.data.get(1) {
				Some(node) => node.as_real()?,
				None => LineStyle::default().dash,
			};
			PropValue::LineStyle(LineStyle { style, dash })
		}
		PropertyKind::Arrow => {
			let code = first(attr)?.as_enum()?;
			let kind = ArrowType::from_i32(code).ok_or_else(|| DataError::Malformed {
				expected: "arrow",
				text: code.to_string(),
			})?;
			let mut arrow = Arrow { kind, ..Arrow::default() };
			if let Some(node) = attr.data.get(1) {
				arrow.length = node.as_real()?;
			}
			if let Some(node) = attr.data.get(2) {
				arrow.width = node.as_real()?;
			}
			PropValue::Arrow(arrow)
		}
		PropertyKind::Colour => PropValue::Colour(first(attr)?.as_colour()?),
		PropertyKind::Font => PropValue::Font(first(attr)?.as_font()?),
		PropertyKind::SArray | PropertyKind::DArray => PropValue::Records(read_records(descr, attr, opts, diag, complete)?),
		PropertyKind::Dict => {
			let mut entries = BTreeMap::new();
			if let Some(node) = attr.first() {
				for entry in &node.as_composite()?.attributes {
					let value = entry.first().map(DataNode::as_string).transpose()?.unwrap_or_default();
					entries.insert(entry.name.clone(), value.to_owned());
				}
			}
			PropValue::Dict(entries)
		}
		PropertyKind::Matrix => match attr.first() {
			Some(node) => {
				let matrix = node.as_matrix()?;
				PropValue::Matrix((!matrix.is_identity()).then_some(matrix))
			}
			None => PropValue::Matrix(None),
		},
		PropertyKind::Pixbuf => match attr.first() {
			Some(node) => {
				let bytes = decode_chunked(node.as_pixbuf()?, opts.blob_chunk_size).map_err(|err| DataError::Malformed {
					expected: "pixbuf",
					text: err.to_string(),
				})?;
				PropValue::Image(Some(ImageData { bytes }))
			}
			None => PropValue::Image(None),
		},
		kind @ PropertyKind::Custom(_) => match lookup_kind(kind) {
			KindTable::Custom(ops) => match ops.load {
				Some(load) => PropValue::Custom(load(attr)?),
				None => return Err(Failure::NoData),
			},
			_ => return Err(Failure::NoData),
		},
	};
	Ok(value)
}

fn read_text(node: &CompositeNode) -> Result<TextValue, DataError> {
	let mut text = TextValue::default();
	let part = |name: &str| node.find_attribute(name).and_then(AttributeNode::first);
	if let Some(data) = part("string") {
		text.string = data.as_string()?.to_owned();
	}
	if let Some(data) = part("font") {
		text.font = data.as_font()?;
	}
	if let Some(data) = part("height") {
		text.height = data.as_real()?;
	}
	if let Some(data) = part("color") {
		text.colour = data.as_colour()?;
	}
	if let Some(data) = part("alignment") {
		let code = data.as_enum()?;
		text.alignment = TextAlign::from_i32(code).ok_or_else(|| DataError::Malformed {
			expected: "alignment",
			text: code.to_string(),
		})?;
	}
	Ok(text)
}

fn read_records(descr: &PropDescriptor, attr: &AttributeNode, opts: &CodecOptions, diag: &mut Diagnostics, complete: &mut bool) -> Result<Vec<Record>, Failure> {
	let Some(extra) = descr.extra().records() else {
		return Ok(Vec::new());
	};
	let limit = extra.static_len.unwrap_or(opts.max_records);
	if attr.len() > limit {
		diag.warn(Warning::TooManyRecords {
			name: descr.name().to_owned(),
			max: limit,
		});
	}

	let mut records: Vec<Record> = match extra.static_len {
		Some(len) => (0..len).map(|_| Record::from_table(&extra.record)).collect(),
		None => Vec::new(),
	};
	for (at, node) in attr.data.iter().take(limit).enumerate() {
		let composite = node.as_composite()?;
		if at == records.len() {
			records.push(Record::from_table(&extra.record));
		}
		let record = &mut records[at];
		*complete &= load_props(record.props_mut(), composite, opts, diag);
	}
	Ok(records)
}

#[cfg(test)]
mod tests;
