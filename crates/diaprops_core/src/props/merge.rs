//! Combining the descriptor tables of a multi-object selection.

use std::collections::HashSet;
use std::sync::Arc;

use crate::props::registry::{KindTable, lookup_kind};
use crate::props::{DescriptorTable, PropDescriptor, PropExtra, PropFlags};

/// How the tables of several objects are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOption {
	/// Every property any object has.
	Union,
	/// Only properties all objects share and can edit together.
	#[default]
	Intersection,
}

impl MergeOption {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Union => "union",
			Self::Intersection => "intersection",
		}
	}
}

fn merged_type_name(tables: &[&DescriptorTable]) -> String {
	let mut names: Vec<&str> = Vec::new();
	for table in tables {
		if !names.contains(&table.type_name()) {
			names.push(table.type_name());
		}
	}
	names.join("+")
}

/// Every descriptor of every table, first occurrence of each name wins.
pub fn union<'a>(tables: impl IntoIterator<Item = &'a DescriptorTable>) -> DescriptorTable {
	let tables: Vec<&DescriptorTable> = tables.into_iter().collect();
	let mut seen = HashSet::new();
	let mut descs = Vec::new();
	for table in &tables {
		for desc in table.iter() {
			if seen.insert(desc.quark()) {
				descs.push(desc.clone());
			}
		}
	}
	DescriptorTable::from_shared(merged_type_name(&tables), descs)
}

/// Descriptors of the first table that every later table has in a
/// compatible form.
///
/// A later table without any visible descriptor empties the result.
pub fn intersection<'a>(tables: impl IntoIterator<Item = &'a DescriptorTable>) -> DescriptorTable {
	let tables: Vec<&DescriptorTable> = tables.into_iter().collect();
	let type_name = merged_type_name(&tables);
	let Some((first, rest)) = tables.split_first() else {
		return DescriptorTable::from_shared(type_name, Vec::new());
	};

	let mut descs: Vec<Arc<PropDescriptor>> = first.iter().cloned().collect();
	for table in rest {
		if !table.iter().any(|desc| desc.has_flags(PropFlags::VISIBLE)) {
			descs.clear();
			break;
		}
		for at in (0..descs.len()).rev() {
			let keep = table.find_quark(descs[at].quark()).is_some_and(|other| can_be_merged(other, &descs[at]));
			if !keep {
				descs.remove(at);
			}
		}
	}
	DescriptorTable::from_shared(type_name, descs)
}

/// Combine `tables` according to `option`.
pub fn merge<'a>(tables: impl IntoIterator<Item = &'a DescriptorTable>, option: MergeOption) -> DescriptorTable {
	match option {
		MergeOption::Union => union(tables),
		MergeOption::Intersection => intersection(tables),
	}
}

/// True when one control can edit both descriptors at once.
pub fn can_be_merged(a: &PropDescriptor, b: &PropDescriptor) -> bool {
	if a.kind() != b.kind() {
		return false;
	}
	if (a.flags() | b.flags()).contains(PropFlags::DONT_MERGE) {
		return false;
	}
	if a.handlers().effective() != b.handlers().effective() {
		return false;
	}
	if let KindTable::Custom(ops) = lookup_kind(a.kind())
		&& let Some(can_merge) = ops.can_merge
	{
		return can_merge(a, b) && can_merge(b, a);
	}
	extras_compatible(a.extra(), b.extra())
}

fn extras_compatible(a: &PropExtra, b: &PropExtra) -> bool {
	match (a, b) {
		(PropExtra::Enum(a), PropExtra::Enum(b)) => a == b,
		(PropExtra::Records(a), PropExtra::Records(b)) => Arc::ptr_eq(&a.record, &b.record) && a.static_len == b.static_len,
		(PropExtra::Records(_), _) | (_, PropExtra::Records(_)) => false,
		(PropExtra::Button(a), PropExtra::Button(b)) => a == b,
		_ => true,
	}
}
