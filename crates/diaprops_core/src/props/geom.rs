//! Plain value types carried by property payloads.

/// 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Construct a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
	/// Left edge.
	pub left: f64,
	/// Top edge.
	pub top: f64,
	/// Right edge.
	pub right: f64,
	/// Bottom edge.
	pub bottom: f64,
}

impl Rect {
	/// Construct a rectangle from its edges.
	pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
		Self { left, top, right, bottom }
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.right - self.left
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.bottom - self.top
	}
}

/// Segment type of a bezier point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BezPointKind {
	/// Start a new sub-path at `p1`.
	#[default]
	MoveTo,
	/// Straight segment to `p1`.
	LineTo,
	/// Cubic segment with control points `p1`, `p2` ending at `p3`.
	CurveTo,
}

impl BezPointKind {
	/// Stable persisted label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::MoveTo => "moveto",
			Self::LineTo => "lineto",
			Self::CurveTo => "curveto",
		}
	}

	/// Parse a persisted label.
	pub fn parse(label: &str) -> Option<Self> {
		match label {
			"moveto" => Some(Self::MoveTo),
			"lineto" => Some(Self::LineTo),
			"curveto" => Some(Self::CurveTo),
			_ => None,
		}
	}
}

/// One element of a bezier path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BezPoint {
	/// Segment type.
	pub kind: BezPointKind,
	/// First point (end point for move/line, first control point for curves).
	pub p1: Point,
	/// Second control point.
	pub p2: Point,
	/// Curve end point.
	pub p3: Point,
}

/// RGBA colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red channel.
	pub red: u8,
	/// Green channel.
	pub green: u8,
	/// Blue channel.
	pub blue: u8,
	/// Alpha channel (255 is opaque).
	pub alpha: u8,
}

impl Color {
	/// Opaque black.
	pub const BLACK: Self = Self::rgb(0, 0, 0);
	/// Opaque white.
	pub const WHITE: Self = Self::rgb(255, 255, 255);

	/// Opaque colour from channels.
	pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
		Self { red, green, blue, alpha: 255 }
	}

	/// Colour from channels including alpha.
	pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
		Self { red, green, blue, alpha }
	}

	/// Render as `#rrggbbaa`.
	pub fn to_hex(self) -> String {
		format!("#{:02x}{:02x}{:02x}{:02x}", self.red, self.green, self.blue, self.alpha)
	}

	/// Parse `#rrggbb` or `#rrggbbaa`.
	pub fn from_hex(text: &str) -> Option<Self> {
		let hex = text.trim().strip_prefix('#')?;
		if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
			return None;
		}
		let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
		let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
		Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::BLACK
	}
}

/// Dash pattern of a stroked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyleKind {
	/// Continuous stroke.
	#[default]
	Solid,
	/// Evenly dashed.
	Dashed,
	/// Dash, dot.
	DashDot,
	/// Dash, dot, dot.
	DashDotDot,
	/// Dotted.
	Dotted,
}

impl LineStyleKind {
	/// Persisted enum value.
	pub fn as_i32(self) -> i32 {
		match self {
			Self::Solid => 0,
			Self::Dashed => 1,
			Self::DashDot => 2,
			Self::DashDotDot => 3,
			Self::Dotted => 4,
		}
	}

	/// Decode a persisted enum value.
	pub fn from_i32(value: i32) -> Option<Self> {
		match value {
			0 => Some(Self::Solid),
			1 => Some(Self::Dashed),
			2 => Some(Self::DashDot),
			3 => Some(Self::DashDotDot),
			4 => Some(Self::Dotted),
			_ => None,
		}
	}
}

/// Default dash length for dashed line styles.
pub const DEFAULT_DASH_LENGTH: f64 = 1.0;

/// Line style together with its dash length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
	/// Dash pattern.
	pub style: LineStyleKind,
	/// Dash length used by non-solid patterns.
	pub dash: f64,
}

impl Default for LineStyle {
	fn default() -> Self {
		Self {
			style: LineStyleKind::Solid,
			dash: DEFAULT_DASH_LENGTH,
		}
	}
}

/// Arrow head shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowType {
	/// No arrow head.
	#[default]
	None,
	/// Two open strokes.
	Lines,
	/// Outlined triangle.
	HollowTriangle,
	/// Filled triangle.
	FilledTriangle,
	/// Outlined diamond.
	HollowDiamond,
	/// Filled diamond.
	FilledDiamond,
	/// Half head on one side.
	HalfHead,
	/// Slashed cross.
	SlashedCross,
	/// Filled ellipse.
	FilledEllipse,
	/// Outlined ellipse.
	HollowEllipse,
}

impl ArrowType {
	const ALL: [Self; 10] = [
		Self::None,
		Self::Lines,
		Self::HollowTriangle,
		Self::FilledTriangle,
		Self::HollowDiamond,
		Self::FilledDiamond,
		Self::HalfHead,
		Self::SlashedCross,
		Self::FilledEllipse,
		Self::HollowEllipse,
	];

	/// Persisted enum value.
	pub fn as_i32(self) -> i32 {
		Self::ALL.iter().position(|item| *item == self).unwrap_or(0) as i32
	}

	/// Decode a persisted enum value.
	pub fn from_i32(value: i32) -> Option<Self> {
		usize::try_from(value).ok().and_then(|index| Self::ALL.get(index).copied())
	}
}

/// Default arrow head length and width.
pub const DEFAULT_ARROW_SIZE: f64 = 0.5;

/// Arrow head description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
	/// Head shape.
	pub kind: ArrowType,
	/// Head length.
	pub length: f64,
	/// Head width.
	pub width: f64,
}

impl Default for Arrow {
	fn default() -> Self {
		Self {
			kind: ArrowType::None,
			length: DEFAULT_ARROW_SIZE,
			width: DEFAULT_ARROW_SIZE,
		}
	}
}

/// Font reference by family, style bits, and face name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontRef {
	/// Font family, e.g. `sans`.
	pub family: String,
	/// Style bit set (weight and slant) as persisted.
	pub style: u32,
	/// Legacy face name.
	pub name: String,
}

impl Default for FontRef {
	fn default() -> Self {
		Self {
			family: "sans".to_owned(),
			style: 0,
			name: "Helvetica".to_owned(),
		}
	}
}

/// 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
	/// Scale/rotate x component of x.
	pub xx: f64,
	/// Shear x by y.
	pub xy: f64,
	/// Shear y by x.
	pub yx: f64,
	/// Scale/rotate y component of y.
	pub yy: f64,
	/// Horizontal translation.
	pub x0: f64,
	/// Vertical translation.
	pub y0: f64,
}

impl Matrix {
	/// Identity transform.
	pub const IDENTITY: Self = Self {
		xx: 1.0,
		xy: 0.0,
		yx: 0.0,
		yy: 1.0,
		x0: 0.0,
		y0: 0.0,
	};

	/// True when this transform leaves every point in place.
	pub fn is_identity(&self) -> bool {
		*self == Self::IDENTITY
	}
}

impl Default for Matrix {
	fn default() -> Self {
		Self::IDENTITY
	}
}

/// Encoded image bytes (PNG or similar), opaque to the property system.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ImageData {
	/// Encoded image bytes.
	pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageData {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "ImageData({} bytes)", self.bytes.len())
	}
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
	/// Flush left.
	#[default]
	Left,
	/// Centered.
	Center,
	/// Flush right.
	Right,
}

impl TextAlign {
	/// Persisted enum value.
	pub fn as_i32(self) -> i32 {
		match self {
			Self::Left => 0,
			Self::Center => 1,
			Self::Right => 2,
		}
	}

	/// Decode a persisted enum value.
	pub fn from_i32(value: i32) -> Option<Self> {
		match value {
			0 => Some(Self::Left),
			1 => Some(Self::Center),
			2 => Some(Self::Right),
			_ => None,
		}
	}
}

/// Default font height for text blocks.
pub const DEFAULT_FONT_HEIGHT: f64 = 0.8;

/// Styled text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextValue {
	/// Text content; lines separated by `\n`.
	pub string: String,
	/// Font face.
	pub font: FontRef,
	/// Font height.
	pub height: f64,
	/// Text colour.
	pub colour: Color,
	/// Horizontal alignment.
	pub alignment: TextAlign,
}

impl Default for TextValue {
	fn default() -> Self {
		Self {
			string: String::new(),
			font: FontRef::default(),
			height: DEFAULT_FONT_HEIGHT,
			colour: Color::BLACK,
			alignment: TextAlign::Left,
		}
	}
}
