use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::props::{BezPoint, BezPointKind, Color, FontRef, Matrix, Point, Rect};

/// Failure to read a data node as the requested literal type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
	/// Node is of a different type.
	#[error("expected {expected} node, found {found}")]
	WrongNode {
		/// Requested node type.
		expected: &'static str,
		/// Node type present.
		found: &'static str,
	},
	/// Node text does not parse.
	#[error("malformed {expected} literal {text:?}")]
	Malformed {
		/// Requested literal type.
		expected: &'static str,
		/// Offending text.
		text: String,
	},
}

/// One persisted object: type name, id, and its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectNode {
	/// Object type name used to recreate the object.
	#[serde(rename = "type")]
	pub type_name: String,
	/// Object id within its document.
	pub id: u32,
	/// Property attributes.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub attributes: Vec<AttributeNode>,
}

impl ObjectNode {
	/// Object node with no attributes.
	pub fn new(type_name: impl Into<String>, id: u32) -> Self {
		Self {
			type_name: type_name.into(),
			id,
			attributes: Vec::new(),
		}
	}
}

/// Named attribute holding zero or more data nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeNode {
	/// Attribute name (the property name).
	pub name: String,
	/// Data nodes in order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub data: Vec<DataNode>,
}

impl AttributeNode {
	/// Attribute with no data.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			data: Vec::new(),
		}
	}

	/// Append a data node.
	pub fn push(&mut self, node: DataNode) {
		self.data.push(node);
	}

	/// First data node.
	pub fn first(&self) -> Option<&DataNode> {
		self.data.first()
	}

	/// Number of data nodes.
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// True when the attribute holds no data.
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}

/// Font literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontNode {
	/// Font family.
	pub family: String,
	/// Style bits.
	#[serde(default)]
	pub style: u32,
	/// Legacy face name.
	#[serde(default)]
	pub name: String,
}

/// Nested composite: a typed group of attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeNode {
	/// Composite type tag.
	#[serde(rename = "type")]
	pub kind: String,
	/// Member attributes.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub attributes: Vec<AttributeNode>,
}

impl CompositeNode {
	/// Composite with no attributes.
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			attributes: Vec::new(),
		}
	}
}

/// One literal or composite inside an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataNode {
	/// Decimal integer.
	Int(String),
	/// Decimal real.
	Real(String),
	/// `true` or `false`.
	Boolean(String),
	/// Decimal enum value.
	Enum(String),
	/// Text.
	String(String),
	/// `x,y`.
	Point(String),
	/// `left,top;right,bottom`.
	Rectangle(String),
	/// `moveto x,y`, `lineto x,y`, or `curveto x1,y1 x2,y2 x3,y3`.
	BezPoint(String),
	/// `#rrggbbaa`.
	Color(String),
	/// `xx,xy,yx,yy,x0,y0`.
	Matrix(String),
	/// Base64 image bytes.
	Pixbuf(String),
	/// Font reference.
	Font(FontNode),
	/// Nested attribute group.
	Composite(CompositeNode),
}

fn malformed(expected: &'static str, text: &str) -> DataError {
	DataError::Malformed {
		expected,
		text: text.to_owned(),
	}
}

fn parse_real(expected: &'static str, text: &str) -> Result<f64, DataError> {
	text.trim().parse::<f64>().map_err(|_| malformed(expected, text))
}

fn parse_point(expected: &'static str, text: &str) -> Result<Point, DataError> {
	let (x, y) = text.split_once(',').ok_or_else(|| malformed(expected, text))?;
	Ok(Point::new(parse_real(expected, x)?, parse_real(expected, y)?))
}

fn format_point(point: Point) -> String {
	format!("{},{}", point.x, point.y)
}

impl DataNode {
	/// Node type label.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Int(_) => "int",
			Self::Real(_) => "real",
			Self::Boolean(_) => "boolean",
			Self::Enum(_) => "enum",
			Self::String(_) => "string",
			Self::Point(_) => "point",
			Self::Rectangle(_) => "rectangle",
			Self::BezPoint(_) => "bezpoint",
			Self::Color(_) => "color",
			Self::Matrix(_) => "matrix",
			Self::Pixbuf(_) => "pixbuf",
			Self::Font(_) => "font",
			Self::Composite(_) => "composite",
		}
	}

	fn wrong(&self, expected: &'static str) -> DataError {
		DataError::WrongNode {
			expected,
			found: self.type_name(),
		}
	}

	/// Integer literal.
	pub fn int(value: i32) -> Self {
		Self::Int(value.to_string())
	}

	/// Real literal.
	pub fn real(value: f64) -> Self {
		Self::Real(value.to_string())
	}

	/// Boolean literal.
	pub fn boolean(value: bool) -> Self {
		Self::Boolean(value.to_string())
	}

	/// Enum literal.
	pub fn enumeration(value: i32) -> Self {
		Self::Enum(value.to_string())
	}

	/// String literal.
	pub fn string(value: impl Into<String>) -> Self {
		Self::String(value.into())
	}

	/// Point literal.
	pub fn point(value: Point) -> Self {
		Self::Point(format_point(value))
	}

	/// Rectangle literal.
	pub fn rect(value: Rect) -> Self {
		Self::Rectangle(format!("{},{};{},{}", value.left, value.top, value.right, value.bottom))
	}

	/// Bezier point literal.
	pub fn bezpoint(value: BezPoint) -> Self {
		let text = match value.kind {
			BezPointKind::MoveTo | BezPointKind::LineTo => format!("{} {}", value.kind.as_str(), format_point(value.p1)),
			BezPointKind::CurveTo => format!(
				"{} {} {} {}",
				value.kind.as_str(),
				format_point(value.p1),
				format_point(value.p2),
				format_point(value.p3)
			),
		};
		Self::BezPoint(text)
	}

	/// Colour literal.
	pub fn colour(value: Color) -> Self {
		Self::Color(value.to_hex())
	}

	/// Matrix literal.
	pub fn matrix(value: Matrix) -> Self {
		Self::Matrix(format!("{},{},{},{},{},{}", value.xx, value.xy, value.yx, value.yy, value.x0, value.y0))
	}

	/// Font literal.
	pub fn font(value: &FontRef) -> Self {
		Self::Font(FontNode {
			family: value.family.clone(),
			style: value.style,
			name: value.name.clone(),
		})
	}

	/// Read as integer; enum nodes are accepted too.
	pub fn as_int(&self) -> Result<i32, DataError> {
		match self {
			Self::Int(text) | Self::Enum(text) => text.trim().parse().map_err(|_| malformed("int", text)),
			other => Err(other.wrong("int")),
		}
	}

	/// Read as enum value; int nodes are accepted too.
	pub fn as_enum(&self) -> Result<i32, DataError> {
		match self {
			Self::Enum(text) | Self::Int(text) => text.trim().parse().map_err(|_| malformed("enum", text)),
			other => Err(other.wrong("enum")),
		}
	}

	/// Read as real; int nodes are accepted too.
	pub fn as_real(&self) -> Result<f64, DataError> {
		match self {
			Self::Real(text) | Self::Int(text) => parse_real("real", text),
			other => Err(other.wrong("real")),
		}
	}

	/// Read as boolean.
	pub fn as_bool(&self) -> Result<bool, DataError> {
		match self {
			Self::Boolean(text) => match text.trim() {
				"true" => Ok(true),
				"false" => Ok(false),
				_ => Err(malformed("boolean", text)),
			},
			other => Err(other.wrong("boolean")),
		}
	}

	/// Read as string.
	pub fn as_string(&self) -> Result<&str, DataError> {
		match self {
			Self::String(text) => Ok(text),
			other => Err(other.wrong("string")),
		}
	}

	/// Read as point.
	pub fn as_point(&self) -> Result<Point, DataError> {
		match self {
			Self::Point(text) => parse_point("point", text),
			other => Err(other.wrong("point")),
		}
	}

	/// Read as rectangle.
	pub fn as_rect(&self) -> Result<Rect, DataError> {
		match self {
			Self::Rectangle(text) => {
				let (a, b) = text.split_once(';').ok_or_else(|| malformed("rectangle", text))?;
				let top_left = parse_point("rectangle", a)?;
				let bottom_right = parse_point("rectangle", b)?;
				Ok(Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y))
			}
			other => Err(other.wrong("rectangle")),
		}
	}

	/// Read as bezier point.
	pub fn as_bezpoint(&self) -> Result<BezPoint, DataError> {
		let Self::BezPoint(text) = self else {
			return Err(self.wrong("bezpoint"));
		};
		let mut parts = text.split_whitespace();
		let kind = parts
			.next()
			.and_then(BezPointKind::parse)
			.ok_or_else(|| malformed("bezpoint", text))?;
		let points = parts.map(|part| parse_point("bezpoint", part)).collect::<Result<Vec<_>, _>>()?;
		match (kind, points.as_slice()) {
			(BezPointKind::MoveTo | BezPointKind::LineTo, [p1]) => Ok(BezPoint {
				kind,
				p1: *p1,
				..BezPoint::default()
			}),
			(BezPointKind::CurveTo, [p1, p2, p3]) => Ok(BezPoint {
				kind,
				p1: *p1,
				p2: *p2,
				p3: *p3,
			}),
			_ => Err(malformed("bezpoint", text)),
		}
	}

	/// Read as colour.
	pub fn as_colour(&self) -> Result<Color, DataError> {
		match self {
			Self::Color(text) => Color::from_hex(text).ok_or_else(|| malformed("color", text)),
			other => Err(other.wrong("color")),
		}
	}

	/// Read as matrix.
	pub fn as_matrix(&self) -> Result<Matrix, DataError> {
		let Self::Matrix(text) = self else {
			return Err(self.wrong("matrix"));
		};
		let parts = text.split(',').map(|part| parse_real("matrix", part)).collect::<Result<Vec<_>, _>>()?;
		let [xx, xy, yx, yy, x0, y0] = parts.as_slice() else {
			return Err(malformed("matrix", text));
		};
		Ok(Matrix {
			xx: *xx,
			xy: *xy,
			yx: *yx,
			yy: *yy,
			x0: *x0,
			y0: *y0,
		})
	}

	/// Read as font reference.
	pub fn as_font(&self) -> Result<FontRef, DataError> {
		match self {
			Self::Font(node) => Ok(FontRef {
				family: node.family.clone(),
				style: node.style,
				name: node.name.clone(),
			}),
			other => Err(other.wrong("font")),
		}
	}

	/// Read as base64 image text.
	pub fn as_pixbuf(&self) -> Result<&str, DataError> {
		match self {
			Self::Pixbuf(text) => Ok(text),
			other => Err(other.wrong("pixbuf")),
		}
	}

	/// Read as composite.
	pub fn as_composite(&self) -> Result<&CompositeNode, DataError> {
		match self {
			Self::Composite(node) => Ok(node),
			other => Err(other.wrong("composite")),
		}
	}
}

/// Node that owns a list of attributes.
pub trait AttributeHost {
	/// Attributes in order.
	fn attributes(&self) -> &[AttributeNode];

	/// Mutable attribute list.
	fn attributes_mut(&mut self) -> &mut Vec<AttributeNode>;

	/// First attribute named `name`.
	fn find_attribute(&self, name: &str) -> Option<&AttributeNode> {
		self.attributes().iter().find(|attr| attr.name == name)
	}

	/// Append a new empty attribute and return it.
	fn add_attribute(&mut self, name: &str) -> &mut AttributeNode {
		let attrs = self.attributes_mut();
		attrs.push(AttributeNode::new(name));
		let last = attrs.len() - 1;
		&mut attrs[last]
	}
}

impl AttributeHost for ObjectNode {
	fn attributes(&self) -> &[AttributeNode] {
		&self.attributes
	}

	fn attributes_mut(&mut self) -> &mut Vec<AttributeNode> {
		&mut self.attributes
	}
}

impl AttributeHost for CompositeNode {
	fn attributes(&self) -> &[AttributeNode] {
		&self.attributes
	}

	fn attributes_mut(&mut self) -> &mut Vec<AttributeNode> {
		&mut self.attributes
	}
}
