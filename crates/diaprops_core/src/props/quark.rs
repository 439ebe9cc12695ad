use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Interned string handle used for fast property name comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quark(u32);

#[derive(Default)]
struct Interner {
	names: Vec<Box<str>>,
	lookup: HashMap<Box<str>, u32>,
}

fn interner() -> &'static Mutex<Interner> {
	static INTERNER: OnceLock<Mutex<Interner>> = OnceLock::new();
	INTERNER.get_or_init(|| Mutex::new(Interner::default()))
}

impl Quark {
	/// Intern `name`, returning its quark. The same text always maps to the same quark.
	pub fn intern(name: &str) -> Self {
		let mut table = interner().lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(index) = table.lookup.get(name) {
			return Self(*index);
		}
		table.names.push(name.into());
		let index = table.names.len() as u32;
		table.lookup.insert(name.into(), index);
		Self(index)
	}

	/// Look `name` up without interning it.
	pub fn lookup(name: &str) -> Option<Self> {
		let table = interner().lock().unwrap_or_else(PoisonError::into_inner);
		table.lookup.get(name).copied().map(Self)
	}

	/// Text this quark was interned from.
	pub fn as_string(self) -> String {
		let table = interner().lock().unwrap_or_else(PoisonError::into_inner);
		table
			.names
			.get(self.0 as usize - 1)
			.map(|name| name.to_string())
			.unwrap_or_default()
	}

	/// Raw interned index (never zero).
	pub fn index(self) -> u32 {
		self.0
	}
}

impl fmt::Display for Quark {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.as_string())
	}
}
