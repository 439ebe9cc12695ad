use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::props::{Property, PropertyObject};

/// Callback run when a dialog control changes or a button is pressed.
///
/// Returns true when the object changed in a way that requires the dialog to
/// re-read its values.
pub type PropEventHandler = fn(&mut dyn PropertyObject, &Property) -> bool;

/// Identity of a registered event handler.
///
/// Registering the same function twice yields two distinct ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u32);

struct HandlerEntry {
	name: &'static str,
	handler: PropEventHandler,
}

fn arena() -> &'static Mutex<Vec<HandlerEntry>> {
	static HANDLERS: OnceLock<Mutex<Vec<HandlerEntry>>> = OnceLock::new();
	HANDLERS.get_or_init(|| Mutex::new(Vec::new()))
}

/// Register `handler` under a diagnostic `name`.
pub fn register_handler(name: &'static str, handler: PropEventHandler) -> HandlerId {
	let mut entries = arena().lock().unwrap_or_else(PoisonError::into_inner);
	entries.push(HandlerEntry { name, handler });
	HandlerId(entries.len() as u32 - 1)
}

impl HandlerId {
	/// Name given at registration.
	pub fn name(self) -> &'static str {
		let entries = arena().lock().unwrap_or_else(PoisonError::into_inner);
		entries.get(self.0 as usize).map_or("?", |entry| entry.name)
	}

	/// Run the handler against `object`.
	pub fn call(self, object: &mut dyn PropertyObject, prop: &Property) -> bool {
		let handler = {
			let entries = arena().lock().unwrap_or_else(PoisonError::into_inner);
			entries.get(self.0 as usize).map(|entry| entry.handler)
		};
		handler.is_some_and(|handler| handler(object, prop))
	}
}

impl fmt::Debug for HandlerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "HandlerId({}:{})", self.0, self.name())
	}
}

/// Current handler slot plus the handlers it displaced, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerChain {
	current: Option<HandlerId>,
	previous: Vec<Option<HandlerId>>,
}

impl HandlerChain {
	/// Chain holding a single handler.
	pub fn new(current: Option<HandlerId>) -> Self {
		Self {
			current,
			previous: Vec::new(),
		}
	}

	/// Most recently installed handler.
	pub fn current(&self) -> Option<HandlerId> {
		self.current
	}

	/// Install `handler`, pushing the current one onto the displaced stack.
	///
	/// A lone empty displaced slot is overwritten instead of stacked.
	pub fn insert(&mut self, handler: Option<HandlerId>) {
		if self.previous == [None] {
			self.previous.clear();
		}
		self.previous.push(self.current.take());
		self.current = handler;
	}

	/// Handler that decides merge compatibility.
	///
	/// When the most recently displaced slot is empty this is the current
	/// handler; otherwise it is the oldest non-empty displaced handler.
	pub fn effective(&self) -> Option<HandlerId> {
		match self.previous.last() {
			Some(Some(_)) => self.previous.iter().copied().flatten().next(),
			_ => self.current,
		}
	}

	/// Number of handlers displaced by [`HandlerChain::insert`].
	pub fn depth(&self) -> usize {
		self.previous.len()
	}

	/// Run every installed handler, newest first. Returns true when any of
	/// them reported a change.
	pub fn dispatch(&self, object: &mut dyn PropertyObject, prop: &Property) -> bool {
		let mut changed = false;
		for handler in std::iter::once(self.current).chain(self.previous.iter().rev().copied()).flatten() {
			changed |= handler.call(object, prop);
		}
		changed
	}
}

#[cfg(test)]
mod tests {
	use super::{HandlerChain, register_handler};
	use crate::props::{Property, PropertyObject};

	fn noop(_: &mut dyn PropertyObject, _: &Property) -> bool {
		false
	}

	#[test]
	fn effective_handler_is_the_oldest_installed() {
		let base = register_handler("base", noop);
		let wrapper = register_handler("wrapper", noop);

		let mut chain = HandlerChain::new(Some(base));
		assert_eq!(chain.effective(), Some(base));

		chain.insert(Some(wrapper));
		assert_eq!(chain.current(), Some(wrapper));
		assert_eq!(chain.effective(), Some(base));
		assert_eq!(chain.depth(), 1);
	}

	#[test]
	fn empty_slots_are_skipped() {
		let late = register_handler("late", noop);
		let mut chain = HandlerChain::default();
		assert_eq!(chain.effective(), None);
		chain.insert(Some(late));
		assert_eq!(chain.effective(), Some(late));
	}

	#[test]
	fn an_empty_displaced_slot_defers_to_the_current_handler() {
		let base = register_handler("base", noop);
		let wrapper = register_handler("wrapper", noop);

		let mut chain = HandlerChain::new(Some(base));
		chain.insert(None);
		assert_eq!(chain.effective(), Some(base));

		chain.insert(Some(wrapper));
		assert_eq!(chain.depth(), 2);
		assert_eq!(chain.effective(), Some(wrapper));
	}

	#[test]
	fn a_lone_empty_slot_is_overwritten() {
		let first = register_handler("first", noop);
		let second = register_handler("second", noop);

		let mut chain = HandlerChain::default();
		chain.insert(Some(first));
		chain.insert(Some(second));
		assert_eq!(chain.depth(), 1);
		assert_eq!(chain.effective(), Some(first));
	}

	#[test]
	fn same_function_registered_twice_is_two_identities() {
		let a = register_handler("twice", noop);
		let b = register_handler("twice", noop);
		assert_ne!(a, b);
		assert_eq!(a.name(), "twice");
	}
}
