use std::borrow::Cow;
use std::fmt;

use crate::props::registry::{KindTable, kind_by_name, lookup_kind};

/// Numeric tag identifying a property kind in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindTag(pub u16);

/// Number of built-in kinds; custom tags start here.
pub const BUILTIN_KIND_COUNT: u16 = 40;

/// Shape of a property value.
///
/// Built-in kinds are a closed set; plugin kinds registered at runtime are
/// carried as [`PropertyKind::Custom`] with the tag the registry allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
	/// Placeholder that carries nothing.
	Noop,
	/// Single character.
	Char,
	/// Boolean toggle.
	Bool,
	/// Signed integer.
	Int,
	/// List of integers.
	IntArray,
	/// Integer picked from a fixed item list.
	Enum,
	/// List of enum values.
	EnumArray,
	/// Floating point number.
	Real,
	/// Distance in diagram units.
	Length,
	/// Font height.
	FontSize,
	/// 2D point.
	Point,
	/// List of points.
	PointArray,
	/// Bezier path element.
	BezPoint,
	/// Bezier path.
	BezPointArray,
	/// Rectangle.
	Rect,
	/// Start and end point of a connection.
	Endpoints,
	/// Number of connection points on a line.
	ConnPointLine,
	/// Single-line string.
	String,
	/// File name.
	File,
	/// Multi-line string.
	MultiString,
	/// Styled text block.
	Text,
	/// Dash style plus dash length.
	LineStyle,
	/// Arrow head.
	Arrow,
	/// RGBA colour.
	Colour,
	/// Font reference.
	Font,
	/// Static label shown in dialogs.
	Static,
	/// Push button shown in dialogs.
	Button,
	/// Opens a notebook container.
	NotebookBegin,
	/// Starts a notebook page.
	NotebookPage,
	/// Closes a notebook container.
	NotebookEnd,
	/// Opens a multi-column container.
	MultiColBegin,
	/// Starts a column.
	MultiColColumn,
	/// Closes a multi-column container.
	MultiColEnd,
	/// Opens a frame container.
	FrameBegin,
	/// Closes a frame container.
	FrameEnd,
	/// Fixed-length record array.
	SArray,
	/// Variable-length record array.
	DArray,
	/// String to string map.
	Dict,
	/// Optional 2D affine transform.
	Matrix,
	/// Optional embedded image.
	Pixbuf,
	/// Kind registered at runtime.
	Custom(KindTag),
}

/// Built-in kinds in tag order.
pub const BUILTIN_KINDS: [PropertyKind; BUILTIN_KIND_COUNT as usize] = [
	PropertyKind::Noop,
	PropertyKind::Char,
	PropertyKind::Bool,
	PropertyKind::Int,
	PropertyKind::IntArray,
	PropertyKind::Enum,
	PropertyKind::EnumArray,
	PropertyKind::Real,
	PropertyKind::Length,
	PropertyKind::FontSize,
	PropertyKind::Point,
	PropertyKind::PointArray,
	PropertyKind::BezPoint,
	PropertyKind::BezPointArray,
	PropertyKind::Rect,
	PropertyKind::Endpoints,
	PropertyKind::ConnPointLine,
	PropertyKind::String,
	PropertyKind::File,
	PropertyKind::MultiString,
	PropertyKind::Text,
	PropertyKind::LineStyle,
	PropertyKind::Arrow,
	PropertyKind::Colour,
	PropertyKind::Font,
	PropertyKind::Static,
	PropertyKind::Button,
	PropertyKind::NotebookBegin,
	PropertyKind::NotebookPage,
	PropertyKind::NotebookEnd,
	PropertyKind::MultiColBegin,
	PropertyKind::MultiColColumn,
	PropertyKind::MultiColEnd,
	PropertyKind::FrameBegin,
	PropertyKind::FrameEnd,
	PropertyKind::SArray,
	PropertyKind::DArray,
	PropertyKind::Dict,
	PropertyKind::Matrix,
	PropertyKind::Pixbuf,
];

/// Widget container family opened and closed by marker kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
	/// Tabbed notebook.
	Notebook,
	/// One notebook tab.
	NotebookPage,
	/// Side-by-side columns.
	MultiColumn,
	/// One column.
	Column,
	/// Labelled frame.
	Frame,
}

impl ContainerKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Notebook => "notebook",
			Self::NotebookPage => "page",
			Self::MultiColumn => "multicol",
			Self::Column => "column",
			Self::Frame => "frame",
		}
	}

	/// Inner container opened by the split markers of this container.
	pub fn part(self) -> Option<Self> {
		match self {
			Self::Notebook => Some(Self::NotebookPage),
			Self::MultiColumn => Some(Self::Column),
			_ => None,
		}
	}
}

/// Role a marker kind plays in the container structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
	/// Opens the container.
	Begin(ContainerKind),
	/// Starts the next page or column inside an open container.
	Split(ContainerKind),
	/// Closes the container.
	End(ContainerKind),
}

impl PropertyKind {
	/// Registry tag of this kind.
	pub fn tag(self) -> KindTag {
		match self {
			Self::Custom(tag) => tag,
			builtin => KindTag(BUILTIN_KINDS.iter().position(|item| *item == builtin).unwrap_or(0) as u16),
		}
	}

	/// Built-in kind for `tag`, if the tag is in the built-in range.
	pub fn builtin(tag: KindTag) -> Option<Self> {
		BUILTIN_KINDS.get(usize::from(tag.0)).copied()
	}

	/// True for kinds in the closed built-in set.
	pub fn is_builtin(self) -> bool {
		!matches!(self, Self::Custom(_))
	}

	/// Persisted kind name of a built-in kind.
	pub fn builtin_name(self) -> Option<&'static str> {
		let name = match self {
			Self::Noop => "noop",
			Self::Char => "char",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::IntArray => "intarray",
			Self::Enum => "enum",
			Self::EnumArray => "enumarray",
			Self::Real => "real",
			Self::Length => "length",
			Self::FontSize => "fontsize",
			Self::Point => "point",
			Self::PointArray => "pointarray",
			Self::BezPoint => "bezpoint",
			Self::BezPointArray => "bezpointarray",
			Self::Rect => "rect",
			Self::Endpoints => "endpoints",
			Self::ConnPointLine => "connpoint_line",
			Self::String => "string",
			Self::File => "file",
			Self::MultiString => "multistring",
			Self::Text => "text",
			Self::LineStyle => "linestyle",
			Self::Arrow => "arrow",
			Self::Colour => "colour",
			Self::Font => "font",
			Self::Static => "static",
			Self::Button => "button",
			Self::NotebookBegin => "nb_begin",
			Self::NotebookPage => "nb_page",
			Self::NotebookEnd => "nb_end",
			Self::MultiColBegin => "mc_begin",
			Self::MultiColColumn => "mc_column",
			Self::MultiColEnd => "mc_end",
			Self::FrameBegin => "f_begin",
			Self::FrameEnd => "f_end",
			Self::SArray => "sarray",
			Self::DArray => "darray",
			Self::Dict => "dict",
			Self::Matrix => "matrix",
			Self::Pixbuf => "pixbuf",
			Self::Custom(_) => return None,
		};
		Some(name)
	}

	/// Kind name; custom kinds are resolved through the process-wide registry.
	pub fn name(self) -> Cow<'static, str> {
		if let Some(name) = self.builtin_name() {
			return Cow::Borrowed(name);
		}
		match lookup_kind(self) {
			KindTable::Custom(ops) => Cow::Owned(ops.name.clone()),
			_ => Cow::Owned(format!("unregistered#{}", self.tag().0)),
		}
	}

	/// Resolve a kind name, built-in names first.
	pub fn from_name(name: &str) -> Option<Self> {
		BUILTIN_KINDS
			.iter()
			.copied()
			.find(|kind| kind.builtin_name() == Some(name))
			.or_else(|| kind_by_name(name))
	}

	/// False for structural kinds that carry no value.
	pub fn has_payload(self) -> bool {
		!matches!(self, Self::Noop | Self::Static | Self::Button) && self.marker_role().is_none()
	}

	/// Container role of marker kinds.
	pub fn marker_role(self) -> Option<MarkerRole> {
		let role = match self {
			Self::NotebookBegin => MarkerRole::Begin(ContainerKind::Notebook),
			Self::NotebookPage => MarkerRole::Split(ContainerKind::Notebook),
			Self::NotebookEnd => MarkerRole::End(ContainerKind::Notebook),
			Self::MultiColBegin => MarkerRole::Begin(ContainerKind::MultiColumn),
			Self::MultiColColumn => MarkerRole::Split(ContainerKind::MultiColumn),
			Self::MultiColEnd => MarkerRole::End(ContainerKind::MultiColumn),
			Self::FrameBegin => MarkerRole::Begin(ContainerKind::Frame),
			Self::FrameEnd => MarkerRole::End(ContainerKind::Frame),
			_ => return None,
		};
		Some(role)
	}

	/// True for record array kinds.
	pub fn is_record_array(self) -> bool {
		matches!(self, Self::SArray | Self::DArray)
	}
}

impl fmt::Display for PropertyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name())
	}
}
