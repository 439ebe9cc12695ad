//! Reversible property changes and the undo history built from them.

use std::collections::VecDeque;

use crate::props::{Diagnostics, ObjectId, PropError, PropertyList, PropertyObject, Result};

/// Saved values of one object, swapped in and out to undo and redo an edit.
#[derive(Debug, Clone)]
pub struct ChangeRecord {
	target: ObjectId,
	saved: Option<PropertyList>,
}

impl ChangeRecord {
	/// Record holding `saved` for `target`.
	pub fn new(target: ObjectId, saved: PropertyList) -> Self {
		Self { target, saved: Some(saved) }
	}

	/// Object this record belongs to.
	pub fn target(&self) -> ObjectId {
		self.target
	}

	/// Values that the next apply or revert writes back.
	pub fn saved(&self) -> Option<&PropertyList> {
		self.saved.as_ref()
	}

	/// True once [`ChangeRecord::free`] dropped the saved values.
	pub fn is_freed(&self) -> bool {
		self.saved.is_none()
	}

	/// Redo the change on `object`.
	pub fn apply(&mut self, object: &mut dyn PropertyObject, diag: &mut Diagnostics) -> Result<()> {
		self.swap(object, diag)
	}

	/// Undo the change on `object`.
	pub fn revert(&mut self, object: &mut dyn PropertyObject, diag: &mut Diagnostics) -> Result<()> {
		self.swap(object, diag)
	}

	/// Drop the saved values without touching the object.
	pub fn free(&mut self) {
		self.saved = None;
	}

	fn swap(&mut self, object: &mut dyn PropertyObject, diag: &mut Diagnostics) -> Result<()> {
		if object.id() != self.target {
			return Err(PropError::ChangeTargetMismatch {
				expected: self.target,
				got: object.id(),
			});
		}
		let Some(saved) = self.saved.as_mut() else {
			return Ok(());
		};
		let mut current = saved.copy_empty();
		object.get_props(&mut current, diag);
		object.set_props(saved, diag);
		*saved = current;
		Ok(())
	}
}

/// Write `values` into `object` and return the record that undoes it.
pub fn apply_props(object: &mut dyn PropertyObject, values: &PropertyList, diag: &mut Diagnostics) -> ChangeRecord {
	let mut old = values.copy_empty();
	object.get_props(&mut old, diag);
	object.set_props(values, diag);
	ChangeRecord::new(object.id(), old)
}

/// Lookup of objects by id, used to replay changes.
pub trait ObjectStore {
	/// Object with `id`, if present.
	fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn PropertyObject>;
}

/// Changes made to several objects by one user action.
#[derive(Debug, Clone, Default)]
pub struct ChangeList {
	changes: Vec<ChangeRecord>,
}

impl ChangeList {
	/// Empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a change.
	pub fn push(&mut self, change: ChangeRecord) {
		self.changes.push(change);
	}

	/// Number of changes.
	pub fn len(&self) -> usize {
		self.changes.len()
	}

	/// True when no object changed.
	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}

	/// Changes in the order they were made.
	pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
		self.changes.iter()
	}

	/// Redo every change, first to last.
	pub fn apply(&mut self, store: &mut dyn ObjectStore, diag: &mut Diagnostics) -> Result<()> {
		for change in &mut self.changes {
			let object = store.object_mut(change.target()).ok_or(PropError::ObjectNotFound { id: change.target() })?;
			change.apply(object, diag)?;
		}
		Ok(())
	}

	/// Undo every change, last to first.
	pub fn revert(&mut self, store: &mut dyn ObjectStore, diag: &mut Diagnostics) -> Result<()> {
		for change in self.changes.iter_mut().rev() {
			let object = store.object_mut(change.target()).ok_or(PropError::ObjectNotFound { id: change.target() })?;
			change.revert(object, diag)?;
		}
		Ok(())
	}

	/// Drop every saved value set.
	pub fn free(&mut self) {
		self.changes.iter_mut().for_each(ChangeRecord::free);
	}
}

impl FromIterator<ChangeRecord> for ChangeList {
	fn from_iter<I: IntoIterator<Item = ChangeRecord>>(iter: I) -> Self {
		Self {
			changes: iter.into_iter().collect(),
		}
	}
}

/// Limits of an [`UndoStack`].
#[derive(Debug, Clone)]
pub struct UndoOptions {
	/// Maximum number of undoable actions kept; older ones are freed.
	pub depth: usize,
}

impl Default for UndoOptions {
	fn default() -> Self {
		Self { depth: 15 }
	}
}

impl UndoOptions {
	/// Keep every action.
	pub fn unlimited() -> Self {
		Self { depth: usize::MAX }
	}
}

/// Undo/redo history of change lists.
#[derive(Debug, Default)]
pub struct UndoStack {
	options: UndoOptions,
	done: VecDeque<ChangeList>,
	undone: Vec<ChangeList>,
}

impl UndoStack {
	/// Empty history with `options`.
	pub fn new(options: UndoOptions) -> Self {
		Self {
			options,
			done: VecDeque::new(),
			undone: Vec::new(),
		}
	}

	/// Record an action that was already applied. Clears the redo side.
	pub fn push(&mut self, changes: ChangeList) {
		if changes.is_empty() {
			return;
		}
		for mut list in self.undone.drain(..) {
			list.free();
		}
		self.done.push_back(changes);
		while self.done.len() > self.options.depth {
			if let Some(mut oldest) = self.done.pop_front() {
				oldest.free();
			}
		}
	}

	/// Undo the newest action. Returns false when there is nothing to undo.
	pub fn undo(&mut self, store: &mut dyn ObjectStore, diag: &mut Diagnostics) -> Result<bool> {
		let Some(mut changes) = self.done.pop_back() else {
			return Ok(false);
		};
		changes.revert(store, diag)?;
		self.undone.push(changes);
		Ok(true)
	}

	/// Redo the newest undone action. Returns false when there is nothing to redo.
	pub fn redo(&mut self, store: &mut dyn ObjectStore, diag: &mut Diagnostics) -> Result<bool> {
		let Some(mut changes) = self.undone.pop() else {
			return Ok(false);
		};
		changes.apply(store, diag)?;
		self.done.push_back(changes);
		Ok(true)
	}

	/// True when [`UndoStack::undo`] has something to do.
	pub fn can_undo(&self) -> bool {
		!self.done.is_empty()
	}

	/// True when [`UndoStack::redo`] has something to do.
	pub fn can_redo(&self) -> bool {
		!self.undone.is_empty()
	}

	/// Number of undoable actions.
	pub fn depth(&self) -> usize {
		self.done.len()
	}
}
