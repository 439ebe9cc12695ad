//! Toolkit-neutral property dialogs.
//!
//! A [`PropDialog`] lays out one control per visible property through a
//! caller-supplied [`WidgetFactory`], tracks which values the user touched,
//! and turns those into a [`ChangeList`] on apply.

use std::sync::Arc;

use crate::props::kind::MarkerRole;
use crate::props::registry::{KindTable, lookup_kind};
use crate::props::{
	ChangeList, ContainerKind, Diagnostics, EnumItem, Experience, MergeOption, NumberRange, ObjectId, ObjectStore, PropDescriptor, PropError, PropExtra,
	PropFilter, PropFlags, PropValue, PropertyKind, PropertyList, PropertyObject, Result, Warning, apply_props, describe_objects,
};

/// Control a property wants in a dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetSpec {
	/// No control.
	None,
	/// Read-only label.
	Label,
	/// Check box.
	Check,
	/// Single-line text entry.
	Entry,
	/// Multi-line text entry.
	MultiLineEntry,
	/// File name entry with a chooser.
	FileChooser,
	/// Numeric spin box.
	Spin(NumberRange),
	/// Single choice among items.
	Choice(Arc<[EnumItem]>),
	/// Multiple choice among items.
	MultiChoice(Arc<[EnumItem]>),
	/// Coordinate entry for points, rectangles and paths.
	Coordinates,
	/// Rich text editor.
	TextEditor,
	/// Line style selector.
	LineStyle,
	/// Arrow head selector.
	Arrow,
	/// Colour selector.
	Colour,
	/// Font selector.
	Font,
	/// Push button.
	Button,
	/// Table with one column per record field.
	Table(Vec<String>),
	/// Key/value editor.
	Dict,
	/// Image selector.
	Image,
	/// Control named by a custom kind.
	Custom(String),
}

impl WidgetSpec {
	/// Control for `descr`; custom kinds ask their registered operations.
	pub fn for_descriptor(descr: &PropDescriptor) -> Self {
		let range = || match descr.extra() {
			PropExtra::Number(range) => *range,
			_ => NumberRange::default(),
		};
		let items = || match descr.extra() {
			PropExtra::Enum(items) => items.clone(),
			_ => Arc::from(Vec::new()),
		};
		match descr.kind() {
			PropertyKind::Static => Self::Label,
			PropertyKind::Bool => Self::Check,
			PropertyKind::Char | PropertyKind::String => Self::Entry,
			PropertyKind::MultiString => Self::MultiLineEntry,
			PropertyKind::File => Self::FileChooser,
			PropertyKind::Int | PropertyKind::IntArray | PropertyKind::Real | PropertyKind::Length | PropertyKind::FontSize | PropertyKind::ConnPointLine => {
				Self::Spin(range())
			}
			PropertyKind::Enum => Self::Choice(items()),
			PropertyKind::EnumArray => Self::MultiChoice(items()),
			PropertyKind::Point
			| PropertyKind::PointArray
			| PropertyKind::BezPoint
			| PropertyKind::BezPointArray
			| PropertyKind::Rect
			| PropertyKind::Endpoints => Self::Coordinates,
			PropertyKind::Text => Self::TextEditor,
			PropertyKind::LineStyle => Self::LineStyle,
			PropertyKind::Arrow => Self::Arrow,
			PropertyKind::Colour => Self::Colour,
			PropertyKind::Font => Self::Font,
			PropertyKind::Button => Self::Button,
			PropertyKind::SArray | PropertyKind::DArray => {
				let columns = descr
					.extra()
					.records()
					.map(|extra| extra.record.iter().map(|field| field.label().to_owned()).collect())
					.unwrap_or_default();
				Self::Table(columns)
			}
			PropertyKind::Dict => Self::Dict,
			PropertyKind::Pixbuf => Self::Image,
			kind @ PropertyKind::Custom(_) => match lookup_kind(kind) {
				KindTable::Custom(ops) => ops.get_widget.map_or(Self::None, |get_widget| get_widget(descr)),
				_ => Self::None,
			},
			PropertyKind::Noop
			| PropertyKind::Matrix
			| PropertyKind::NotebookBegin
			| PropertyKind::NotebookPage
			| PropertyKind::NotebookEnd
			| PropertyKind::MultiColBegin
			| PropertyKind::MultiColColumn
			| PropertyKind::MultiColEnd
			| PropertyKind::FrameBegin
			| PropertyKind::FrameEnd => Self::None,
		}
	}
}

/// Builds and reads the controls of one dialog.
pub trait WidgetFactory {
	/// Toolkit control handle.
	type Control;

	/// Create the control for `descr` showing `value`.
	fn create(&mut self, descr: &PropDescriptor, spec: &WidgetSpec, value: &PropValue) -> Self::Control;

	/// Current value shown by `control`.
	fn read(&mut self, control: &Self::Control) -> PropValue;

	/// Show `value` in `control`.
	fn reset(&mut self, control: &mut Self::Control, value: &PropValue);

	/// Start placing controls inside a new container.
	fn open_container(&mut self, kind: ContainerKind, label: &str);

	/// Finish the innermost container.
	fn close_container(&mut self, kind: ContainerKind);
}

/// Construction switches of a [`PropDialog`].
#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
	/// How the tables of a multi-selection are combined.
	pub merge: MergeOption,
	/// Edit defaults: standard properties are left out.
	pub defaults: bool,
}

/// One open property dialog.
///
/// Dropping the session cancels the edit; objects only change in
/// [`PropDialog::apply`].
pub struct PropDialog<F: WidgetFactory> {
	factory: F,
	props: PropertyList,
	controls: Vec<Option<F::Control>>,
	containers: Vec<ContainerKind>,
	targets: Vec<ObjectId>,
	scratch: Option<Box<dyn PropertyObject>>,
}

impl<F: WidgetFactory> PropDialog<F> {
	/// Lay out a dialog for `objects`, showing the values of the first one.
	pub fn new(factory: F, objects: &[&dyn PropertyObject], options: &DialogOptions, diag: &mut Diagnostics) -> Self {
		let table = describe_objects(objects, options.merge);
		let filter = if options.defaults { PropFilter::VisibleNonStandard } else { PropFilter::Visible };
		let mut props = PropertyList::from_table(&table, filter);
		if let Some(first) = objects.first() {
			first.get_props(&mut props, diag);
		}
		let targets = objects.iter().map(|object| object.id()).collect();
		Self::with_props(factory, props, targets, diag)
	}

	/// Lay out a dialog for a prepared value set.
	///
	/// Every value starts untouched.
	pub fn with_props(factory: F, mut props: PropertyList, targets: Vec<ObjectId>, diag: &mut Diagnostics) -> Self {
		for prop in props.iter_mut() {
			prop.experience |= Experience::NOTSET;
		}
		let mut dialog = Self {
			factory,
			props,
			controls: Vec::new(),
			containers: Vec::new(),
			targets,
			scratch: None,
		};
		dialog.build(diag);
		dialog
	}

	/// Object event handlers run against. Without one, handlers are skipped.
	pub fn set_scratch(&mut self, scratch: Box<dyn PropertyObject>) {
		self.scratch = Some(scratch);
	}

	fn build(&mut self, diag: &mut Diagnostics) {
		let props = std::mem::take(&mut self.props);
		let mut controls = Vec::with_capacity(props.len());
		for prop in props.iter() {
			let descr = prop.descr();
			match descr.kind().marker_role() {
				Some(role) => {
					self.place_marker(role, descr, diag);
					controls.push(None);
				}
				None => {
					let spec = WidgetSpec::for_descriptor(descr);
					let control = (spec != WidgetSpec::None).then(|| self.factory.create(descr, &spec, &prop.value));
					controls.push(control);
				}
			}
		}
		while let Some(open) = self.containers.pop() {
			diag.warn(Warning::UnbalancedContainer {
				name: open.as_str().to_owned(),
			});
			self.factory.close_container(open);
		}
		self.props = props;
		self.controls = controls;
	}

	fn close_part(&mut self, outer: ContainerKind) {
		if let Some(part) = outer.part()
			&& self.containers.last() == Some(&part)
		{
			self.containers.pop();
			self.factory.close_container(part);
		}
	}

	fn place_marker(&mut self, role: MarkerRole, descr: &PropDescriptor, diag: &mut Diagnostics) {
		let unbalanced = || Warning::UnbalancedContainer {
			name: descr.name().to_owned(),
		};
		match role {
			MarkerRole::Begin(kind) => {
				self.factory.open_container(kind, descr.label());
				self.containers.push(kind);
			}
			MarkerRole::Split(kind) => {
				self.close_part(kind);
				match (self.containers.last(), kind.part()) {
					(Some(top), Some(part)) if *top == kind => {
						self.factory.open_container(part, descr.label());
						self.containers.push(part);
					}
					_ => diag.warn(unbalanced()),
				}
			}
			MarkerRole::End(kind) => {
				self.close_part(kind);
				if self.containers.last() == Some(&kind) {
					self.containers.pop();
					self.factory.close_container(kind);
				} else {
					diag.warn(unbalanced());
				}
			}
		}
	}

	/// Values shown by the dialog.
	pub fn props(&self) -> &PropertyList {
		&self.props
	}

	/// Control of the property at `at`.
	pub fn control(&self, at: usize) -> Option<&F::Control> {
		self.controls.get(at).and_then(Option::as_ref)
	}

	/// Position of the property named `name`.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.props.iter().position(|prop| prop.name() == name)
	}

	/// Widget factory, for inspecting or driving controls.
	pub fn factory_mut(&mut self) -> &mut F {
		&mut self.factory
	}

	/// Objects this dialog edits.
	pub fn targets(&self) -> &[ObjectId] {
		&self.targets
	}

	/// React to a change of the control at `at`: read it back, mark the
	/// value touched, and run the property's event handlers.
	///
	/// Returns true when a handler changed other values and the controls
	/// were refreshed.
	pub fn notify_changed(&mut self, at: usize, diag: &mut Diagnostics) -> bool {
		let Some(Some(control)) = self.controls.get(at) else {
			return false;
		};
		let read = self.factory.read(control);
		let Some(prop) = self.props.get_mut(at) else {
			return false;
		};
		let value = match (prop.kind(), read) {
			(kind @ PropertyKind::Custom(_), raw) if !matches!(raw, PropValue::Custom(_)) => match lookup_kind(kind) {
				KindTable::Custom(ops) => ops.set_from_widget.and_then(|convert| convert(&raw)).map(PropValue::Custom),
				_ => None,
			},
			(_, value) => Some(value),
		};
		match value {
			Some(value) if value.fits(prop.kind()) => {
				prop.value = value;
				prop.experience.remove(Experience::NOTSET);
				prop.experience |= Experience::SET_FROM_WIDGET;
			}
			other => {
				diag.warn(Warning::KindMismatch {
					name: prop.name().to_owned(),
					expected: prop.kind().to_string(),
					got: other.map_or("none", |value| value.shape_name()).to_owned(),
				});
				return false;
			}
		}
		if prop.descr().handlers().effective().is_none() {
			return false;
		}
		self.run_handlers(at, diag)
	}

	/// Run the action of the button at `at`.
	pub fn press_button(&mut self, at: usize, diag: &mut Diagnostics) -> bool {
		let Some(prop) = self.props.get(at) else {
			return false;
		};
		if !matches!(prop.descr().extra(), PropExtra::Button(_)) && prop.descr().handlers().current().is_none() {
			return false;
		}
		self.run_handlers(at, diag)
	}

	fn run_handlers(&mut self, at: usize, diag: &mut Diagnostics) -> bool {
		let Some(scratch) = self.scratch.as_mut() else {
			return false;
		};
		let Some(prop) = self.props.get(at).cloned() else {
			return false;
		};
		scratch.set_props(&self.props, diag);
		let mut changed = prop.descr().handlers().dispatch(&mut **scratch, &prop);
		if let PropExtra::Button(action) = prop.descr().extra() {
			changed |= action.call(&mut **scratch, &prop);
		}
		if !changed {
			return false;
		}

		let before = self.props.clone();
		scratch.get_props(&mut self.props, diag);
		for (prop, old) in self.props.iter_mut().zip(before.iter()) {
			prop.experience = if prop.value == old.value {
				old.experience
			} else {
				(old.experience - Experience::NOTSET) | Experience::SET_FROM_WIDGET
			};
		}
		for (control, prop) in self.controls.iter_mut().zip(self.props.iter()) {
			if let Some(control) = control {
				self.factory.reset(control, &prop.value);
			}
		}
		true
	}

	/// Values the user touched, ready to be written into objects.
	pub fn touched(&self) -> PropertyList {
		self.props
			.iter()
			.filter(|prop| prop.is_set() && !prop.descr().has_flags(PropFlags::WIDGET_ONLY))
			.cloned()
			.collect()
	}

	/// Write the touched values into every target object.
	pub fn apply(&self, store: &mut dyn ObjectStore, diag: &mut Diagnostics) -> Result<ChangeList> {
		let values = self.touched();
		let mut changes = ChangeList::new();
		if values.is_empty() {
			return Ok(changes);
		}
		for id in &self.targets {
			let object = store.object_mut(*id).ok_or(PropError::ObjectNotFound { id: *id })?;
			changes.push(apply_props(object, &values, diag));
		}
		Ok(changes)
	}
}

#[cfg(test)]
mod tests;
