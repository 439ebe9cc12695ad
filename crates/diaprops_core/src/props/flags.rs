bitflags::bitflags! {
	/// Static behaviour flags attached to a property descriptor.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct PropFlags: u32 {
		/// Shown in property dialogs.
		const VISIBLE = 0x0001;
		/// Never persisted.
		const DONT_SAVE = 0x0002;
		/// Excluded from multi-object merges.
		const DONT_MERGE = 0x0004;
		/// Not copied when taking defaults from another object.
		const NO_DEFAULTS = 0x0008;
		/// Read when loading, never written when saving.
		const LOAD_ONLY = 0x0010;
		/// Common to every object type (position, bounding box).
		const STANDARD = 0x0020;
		/// Shown and edited only, never read back from a host.
		const WIDGET_ONLY = 0x0080;
		/// May be absent from a persisted object without complaint.
		const OPTIONAL = 0x0100;
		/// Applies to the owning object only, not to its children or the codec.
		const SELF_ONLY = 0x0200;
	}
}

bitflags::bitflags! {
	/// What happened to one property value during its lifetime.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Experience: u32 {
		/// Value was copied from another value set.
		const COPIED = 0x0001;
		/// Value was read from a persisted attribute.
		const LOADED = 0x0002;
		/// Value was read from a host object.
		const GET_FROM_HOST = 0x0004;
		/// Value was edited through a dialog control.
		const SET_FROM_WIDGET = 0x0008;
		/// Value holds no meaningful data and must not be written to a host.
		const NOTSET = 0x0100;
	}
}

/// Descriptor predicate used to build value sets from a descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropFilter {
	/// Every descriptor.
	#[default]
	All,
	/// Descriptors shown in dialogs.
	Visible,
	/// Visible descriptors that are not standard object properties.
	VisibleNonStandard,
	/// Descriptors the save path writes.
	DoSave,
	/// Saved descriptors that are not standard object properties.
	DoSaveNonStandard,
	/// Saved non-standard descriptors that may serve as defaults.
	DoSaveNonStandardDefaults,
	/// Descriptors the load path reads.
	DoLoad,
	/// Descriptors that may be copied as defaults.
	Defaults,
	/// Descriptors hidden from dialogs.
	NotVisible,
	/// Descriptors that are never persisted.
	DoNotSave,
}

impl PropFilter {
	/// Test `flags` against this filter.
	pub fn matches(self, flags: PropFlags) -> bool {
		let do_save = !flags.intersects(PropFlags::DONT_SAVE | PropFlags::LOAD_ONLY | PropFlags::SELF_ONLY);
		let standard = flags.contains(PropFlags::STANDARD);
		let visible = flags.contains(PropFlags::VISIBLE);
		match self {
			Self::All => true,
			Self::Visible => visible,
			Self::VisibleNonStandard => visible && !standard,
			Self::DoSave => do_save,
			Self::DoSaveNonStandard => do_save && !standard,
			Self::DoSaveNonStandardDefaults => do_save && !standard && !flags.contains(PropFlags::NO_DEFAULTS),
			Self::DoLoad => flags.contains(PropFlags::LOAD_ONLY) || !flags.intersects(PropFlags::DONT_SAVE | PropFlags::SELF_ONLY),
			Self::Defaults => !flags.contains(PropFlags::NO_DEFAULTS),
			Self::NotVisible => !visible,
			Self::DoNotSave => flags.contains(PropFlags::DONT_SAVE),
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Visible => "visible",
			Self::VisibleNonStandard => "visible-non-standard",
			Self::DoSave => "do-save",
			Self::DoSaveNonStandard => "do-save-non-standard",
			Self::DoSaveNonStandardDefaults => "do-save-non-standard-defaults",
			Self::DoLoad => "do-load",
			Self::Defaults => "defaults",
			Self::NotVisible => "not-visible",
			Self::DoNotSave => "do-not-save",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{PropFilter, PropFlags};

	#[test]
	fn load_only_is_loaded_but_not_saved() {
		let flags = PropFlags::VISIBLE | PropFlags::LOAD_ONLY;
		assert!(PropFilter::DoLoad.matches(flags));
		assert!(!PropFilter::DoSave.matches(flags));
	}

	#[test]
	fn dont_save_and_self_only_stay_out_of_the_codec() {
		for flags in [PropFlags::DONT_SAVE, PropFlags::SELF_ONLY] {
			assert!(!PropFilter::DoSave.matches(flags));
			assert!(!PropFilter::DoLoad.matches(flags));
		}
		assert!(PropFilter::DoNotSave.matches(PropFlags::DONT_SAVE));
	}

	#[test]
	fn standard_props_are_filtered_from_non_standard_sets() {
		let flags = PropFlags::VISIBLE | PropFlags::STANDARD;
		assert!(PropFilter::Visible.matches(flags));
		assert!(!PropFilter::VisibleNonStandard.matches(flags));
		assert!(!PropFilter::DoSaveNonStandard.matches(flags));
		assert!(!PropFilter::NotVisible.matches(flags));
	}

	#[test]
	fn no_defaults_is_excluded_from_default_copies() {
		assert!(!PropFilter::Defaults.matches(PropFlags::NO_DEFAULTS));
		assert!(!PropFilter::DoSaveNonStandardDefaults.matches(PropFlags::NO_DEFAULTS));
		assert!(PropFilter::DoSaveNonStandardDefaults.matches(PropFlags::VISIBLE));
	}
}
