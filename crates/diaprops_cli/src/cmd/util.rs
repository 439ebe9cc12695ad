use std::path::Path;
use std::sync::Arc;

use diaprops::props::{
	AttributeNode, CodecOptions, Compression, DataNode, DescriptorTable, Diagnostics, Document, DocumentOptions, MergeOption, ObjectCatalog, PropError,
	PropFilter, PropFlags, Property, PropertyKind, Result, load_value, save_value,
};
use diaprops::shapes::standard_catalog;

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: {err}"),
	}
}

/// Print collected warnings on stderr.
pub(crate) fn report(diag: &mut Diagnostics) {
	for warning in diag.drain() {
		eprintln!("warning: {warning}");
	}
}

pub(crate) fn catalog() -> Result<Arc<ObjectCatalog>> {
	Ok(Arc::new(standard_catalog()?))
}

/// Open a document with the standard catalog.
pub(crate) fn open_document(path: &Path, diag: &mut Diagnostics) -> Result<(Document, Compression)> {
	Document::open(catalog()?, path, &DocumentOptions::default(), diag)
}

pub(crate) fn parse_merge(value: &str) -> std::result::Result<MergeOption, String> {
	match value {
		"union" => Ok(MergeOption::Union),
		"intersection" => Ok(MergeOption::Intersection),
		other => Err(format!("unknown merge mode `{other}` (expected union or intersection)")),
	}
}

pub(crate) fn parse_filter(value: &str) -> std::result::Result<PropFilter, String> {
	const FILTERS: [PropFilter; 10] = [
		PropFilter::All,
		PropFilter::Visible,
		PropFilter::VisibleNonStandard,
		PropFilter::DoSave,
		PropFilter::DoSaveNonStandard,
		PropFilter::DoSaveNonStandardDefaults,
		PropFilter::DoLoad,
		PropFilter::Defaults,
		PropFilter::NotVisible,
		PropFilter::DoNotSave,
	];
	FILTERS
		.into_iter()
		.find(|filter| filter.as_str() == value)
		.ok_or_else(|| format!("unknown filter `{value}`"))
}

/// Render descriptor flags as `visible|standard`, or `-` when empty.
pub(crate) fn render_flags(flags: PropFlags) -> String {
	let names: Vec<String> = flags.iter_names().map(|(name, _)| name.to_ascii_lowercase()).collect();
	if names.is_empty() { "-".to_owned() } else { names.join("|") }
}

#[derive(serde::Serialize)]
pub(crate) struct DescriptorJson {
	pub name: String,
	pub kind: String,
	pub flags: String,
	pub label: String,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub items: Vec<String>,
}

pub(crate) fn descriptor_rows(table: &DescriptorTable, filter: PropFilter) -> Vec<DescriptorJson> {
	table
		.iter()
		.filter(|desc| filter.matches(desc.flags()))
		.map(|desc| DescriptorJson {
			name: desc.name().to_owned(),
			kind: desc.kind().to_string(),
			flags: render_flags(desc.flags()),
			label: desc.label().to_owned(),
			items: desc
				.extra()
				.enum_items()
				.map(|items| items.iter().map(|item| format!("{}={}", item.label, item.value)).collect())
				.unwrap_or_default(),
		})
		.collect()
}

pub(crate) fn print_descriptor_rows(type_name: &str, rows: &[DescriptorJson]) {
	println!("type: {type_name}");
	println!("props: {}", rows.len());
	println!("name\tkind\tflags\tlabel");
	for row in rows {
		println!("{}\t{}\t{}\t{}", row.name, row.kind, row.flags, row.label);
	}
}

fn render_node(node: &DataNode) -> String {
	match node {
		DataNode::Int(text)
		| DataNode::Real(text)
		| DataNode::Boolean(text)
		| DataNode::Enum(text)
		| DataNode::Point(text)
		| DataNode::Rectangle(text)
		| DataNode::BezPoint(text)
		| DataNode::Color(text)
		| DataNode::Matrix(text) => text.clone(),
		DataNode::String(text) => format!("{text:?}"),
		DataNode::Pixbuf(text) => format!("<{} base64 chars>", text.len()),
		DataNode::Font(font) => format!("font({}, {}, {})", font.family, font.style, font.name),
		DataNode::Composite(composite) => {
			let inner: Vec<String> = composite
				.attributes
				.iter()
				.map(|attr| format!("{}={}", attr.name, render_attribute(attr)))
				.collect();
			format!("{}{{{}}}", composite.kind, inner.join(" "))
		}
	}
}

/// Render the data of an attribute on one line.
pub(crate) fn render_attribute(attr: &AttributeNode) -> String {
	match attr.data.as_slice() {
		[] => "-".to_owned(),
		[single] => render_node(single),
		nodes => format!("[{}]", nodes.iter().map(render_node).collect::<Vec<_>>().join(", ")),
	}
}

/// Render a property value in its persisted literal form.
pub(crate) fn render_value(prop: &Property) -> String {
	let mut attr = AttributeNode::new(prop.name());
	save_value(prop, &mut attr, &CodecOptions::default());
	render_attribute(&attr)
}

/// Parse `text` into `prop` using the literal syntax of the document format.
///
/// Enum values may also be given by item label.
pub(crate) fn parse_value(prop: &mut Property, text: &str) -> Result<()> {
	let name = prop.name().to_owned();
	let kind = prop.kind();
	let invalid = || PropError::InvalidValue {
		name: name.clone(),
		kind: kind.to_string(),
		value: text.to_owned(),
	};
	let node = match kind {
		PropertyKind::Bool => DataNode::Boolean(text.to_owned()),
		PropertyKind::Int | PropertyKind::ConnPointLine => DataNode::Int(text.to_owned()),
		PropertyKind::Enum => {
			let by_label = prop
				.descr()
				.extra()
				.enum_items()
				.and_then(|items| items.iter().find(|item| item.label.eq_ignore_ascii_case(text)))
				.map(|item| item.value.to_string());
			DataNode::Enum(by_label.unwrap_or_else(|| text.to_owned()))
		}
		PropertyKind::Real | PropertyKind::Length | PropertyKind::FontSize => DataNode::Real(text.to_owned()),
		PropertyKind::String | PropertyKind::File | PropertyKind::MultiString => DataNode::String(text.to_owned()),
		PropertyKind::Point => DataNode::Point(text.to_owned()),
		PropertyKind::Rect => DataNode::Rectangle(text.to_owned()),
		PropertyKind::BezPoint => DataNode::BezPoint(text.to_owned()),
		PropertyKind::Colour => DataNode::Color(text.to_owned()),
		_ => return Err(invalid()),
	};
	let mut attr = AttributeNode::new(prop.name());
	attr.push(node);
	let mut diag = Diagnostics::new();
	if load_value(prop, &attr, &CodecOptions::default(), &mut diag) {
		Ok(())
	} else {
		Err(invalid())
	}
}
