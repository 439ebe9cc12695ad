use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::props::test_object::{Sticky, StickyBoard};
use crate::props::{
	ContainerKind, DescriptorTable, Diagnostics, DialogOptions, EnumItem, Experience, ObjectId, OffsetTable, PropDescriptor, PropDialog, PropExtra,
	PropFilter, PropFlags, PropValue, Property, PropertyKind, PropertyList, PropertyObject, Warning, WidgetFactory, WidgetSpec, intersection, make_new_prop,
	register_handler,
};

#[derive(Debug, Clone)]
struct MockControl {
	name: String,
	value: PropValue,
}

#[derive(Debug, Default)]
struct Recorder {
	log: Vec<String>,
	edits: HashMap<String, PropValue>,
}

impl WidgetFactory for Recorder {
	type Control = MockControl;

	fn create(&mut self, descr: &PropDescriptor, _: &WidgetSpec, value: &PropValue) -> MockControl {
		self.log.push(format!("create {}", descr.name()));
		MockControl {
			name: descr.name().to_owned(),
			value: value.clone(),
		}
	}

	fn read(&mut self, control: &MockControl) -> PropValue {
		self.edits.get(&control.name).cloned().unwrap_or_else(|| control.value.clone())
	}

	fn reset(&mut self, control: &mut MockControl, value: &PropValue) {
		control.value = value.clone();
		self.log.push(format!("reset {}", control.name));
	}

	fn open_container(&mut self, kind: ContainerKind, label: &str) {
		self.log.push(format!("open {} {label}", kind.as_str()));
	}

	fn close_container(&mut self, kind: ContainerKind) {
		self.log.push(format!("close {}", kind.as_str()));
	}
}

#[derive(Debug, Clone, Default)]
struct Counter {
	id: u32,
	count: i32,
	doubled: i32,
}

fn double_count(object: &mut dyn PropertyObject, prop: &Property) -> bool {
	let PropValue::Int(count) = prop.value else {
		return false;
	};
	let mut doubled = make_new_prop("doubled", PropertyKind::Int, PropFlags::empty());
	doubled.value = PropValue::Int(count * 2);
	object.set_props(&PropertyList::single(doubled), &mut Diagnostics::new())
}

fn zero_count(object: &mut dyn PropertyObject, _: &Property) -> bool {
	let mut count = make_new_prop("count", PropertyKind::Int, PropFlags::empty());
	count.value = PropValue::Int(0);
	object.set_props(&PropertyList::single(count), &mut Diagnostics::new())
}

fn counter_table() -> Arc<DescriptorTable> {
	static TABLE: OnceLock<Arc<DescriptorTable>> = OnceLock::new();
	TABLE
		.get_or_init(|| {
			let visible = PropFlags::VISIBLE;
			let table = DescriptorTable::builder("counter")
				.push(PropDescriptor::new("pages", PropertyKind::NotebookBegin).with_flags(visible).with_label("Pages"))
				.push(PropDescriptor::new("first_page", PropertyKind::NotebookPage).with_flags(visible).with_label("First"))
				.push(
					PropDescriptor::new("count", PropertyKind::Int)
						.with_flags(visible)
						.with_handler(register_handler("double count", double_count)),
				)
				.push(PropDescriptor::new("second_page", PropertyKind::NotebookPage).with_flags(visible).with_label("Second"))
				.push(PropDescriptor::new("doubled", PropertyKind::Int).with_flags(visible))
				.push(
					PropDescriptor::new("zero", PropertyKind::Button)
						.with_flags(visible | PropFlags::WIDGET_ONLY)
						.with_extra(PropExtra::Button(register_handler("zero count", zero_count))),
				)
				.push(PropDescriptor::new("pages_end", PropertyKind::NotebookEnd).with_flags(visible))
				.build()
				.expect("counter table builds");
			Arc::new(table)
		})
		.clone()
}

fn counter_offsets() -> &'static OffsetTable<Counter> {
	static OFFSETS: OnceLock<OffsetTable<Counter>> = OnceLock::new();
	OFFSETS.get_or_init(|| {
		OffsetTable::new("counter")
			.field("count", PropertyKind::Int, |c: &Counter| &c.count, |c: &mut Counter| &mut c.count)
			.field("doubled", PropertyKind::Int, |c: &Counter| &c.doubled, |c: &mut Counter| &mut c.doubled)
	})
}

impl PropertyObject for Counter {
	fn id(&self) -> ObjectId {
		ObjectId(self.id)
	}

	fn type_name(&self) -> &str {
		"counter"
	}

	fn describe(&self) -> Arc<DescriptorTable> {
		counter_table()
	}

	fn get_props(&self, props: &mut PropertyList, diag: &mut Diagnostics) -> bool {
		counter_offsets().get_props_with(self, props, diag)
	}

	fn set_props(&mut self, props: &PropertyList, diag: &mut Diagnostics) -> bool {
		counter_offsets().set_props_with(self, props, diag)
	}
}

#[test]
fn containers_open_and_close_in_order() {
	let counter = Counter::default();
	let mut diag = Diagnostics::new();
	let mut dialog = PropDialog::new(Recorder::default(), &[&counter], &DialogOptions::default(), &mut diag);
	assert!(diag.is_empty(), "{:?}", diag.warnings());
	assert_eq!(
		dialog.factory_mut().log,
		vec![
			"open notebook Pages",
			"open page First",
			"create count",
			"close page",
			"open page Second",
			"create doubled",
			"create zero",
			"close page",
			"close notebook",
		]
	);
	assert!(dialog.control(0).is_none());
	assert!(dialog.control(2).is_some());
}

#[test]
fn nothing_is_touched_initially() {
	let sticky = Sticky::new(1);
	let dialog = PropDialog::new(Recorder::default(), &[&sticky], &DialogOptions::default(), &mut Diagnostics::new());
	assert!(dialog.props().iter().all(|prop| !prop.is_set()));
	assert_eq!(dialog.props().find("label").expect("label").value, PropValue::String("sticky 1".into()));
	assert!(dialog.touched().is_empty());
	assert!(dialog.props().find("cache").is_none());
}

#[test]
fn apply_writes_only_touched_values_to_every_target() {
	let mut board = StickyBoard {
		items: vec![Sticky::new(1), Sticky::new(2)],
	};
	board.items[1].width = 0.7;
	let mut diag = Diagnostics::new();
	let mut dialog = {
		let objects: Vec<&dyn PropertyObject> = board.items.iter().map(|item| item as &dyn PropertyObject).collect();
		PropDialog::new(Recorder::default(), &objects, &DialogOptions::default(), &mut diag)
	};
	assert_eq!(dialog.targets(), &[ObjectId(1), ObjectId(2)]);

	let at = dialog.position("label").expect("label shown");
	dialog.factory_mut().edits.insert("label".into(), PropValue::String("shared".into()));
	assert!(!dialog.notify_changed(at, &mut diag));
	let touched = dialog.touched();
	assert_eq!(touched.names(), vec!["label"]);
	assert!(touched.iter().all(|prop| prop.experience.contains(Experience::SET_FROM_WIDGET)));

	let mut changes = dialog.apply(&mut board, &mut diag).expect("targets exist");
	assert_eq!(changes.len(), 2);
	assert!(board.items.iter().all(|item| item.label == "shared"));
	assert_eq!(board.items[1].width, 0.7);

	changes.revert(&mut board, &mut diag).expect("revert");
	assert_eq!(board.items[0].label, "sticky 1");
	assert_eq!(board.items[1].label, "sticky 2");
}

#[test]
fn handlers_update_dependent_controls() {
	let counter = Counter { id: 3, count: 1, doubled: 2 };
	let mut diag = Diagnostics::new();
	let mut dialog = PropDialog::new(Recorder::default(), &[&counter], &DialogOptions::default(), &mut diag);
	dialog.set_scratch(Box::new(counter.clone()));

	let at = dialog.position("count").expect("count shown");
	dialog.factory_mut().edits.insert("count".into(), PropValue::Int(4));
	assert!(dialog.notify_changed(at, &mut diag));

	assert_eq!(dialog.props().find("doubled").expect("doubled").value, PropValue::Int(8));
	assert!(dialog.factory_mut().log.contains(&"reset doubled".to_owned()));
	assert_eq!(dialog.touched().names(), vec!["count", "doubled"]);
	assert_eq!(counter.doubled, 2);
}

#[test]
fn buttons_run_their_action() {
	let counter = Counter { id: 3, count: 5, doubled: 10 };
	let mut diag = Diagnostics::new();
	let mut dialog = PropDialog::new(Recorder::default(), &[&counter], &DialogOptions::default(), &mut diag);
	let at = dialog.position("zero").expect("button shown");
	assert!(!dialog.press_button(at, &mut diag));

	dialog.set_scratch(Box::new(counter.clone()));
	assert!(dialog.press_button(at, &mut diag));
	assert_eq!(dialog.props().find("count").expect("count").value, PropValue::Int(0));
	assert_eq!(dialog.touched().names(), vec!["count"]);
}

#[test]
fn merged_tables_may_leave_containers_open() {
	let half = DescriptorTable::builder("half")
		.push(PropDescriptor::new("pages", PropertyKind::NotebookBegin).with_flags(PropFlags::VISIBLE))
		.push(PropDescriptor::new("doubled", PropertyKind::Int).with_flags(PropFlags::VISIBLE))
		.push(PropDescriptor::new("pages_end", PropertyKind::NotebookEnd).with_flags(PropFlags::VISIBLE | PropFlags::DONT_MERGE))
		.build()
		.expect("half builds");
	let merged = intersection([counter_table().as_ref(), &half]);
	assert_eq!(merged.names(), vec!["pages", "doubled"]);

	let mut diag = Diagnostics::new();
	let props = PropertyList::from_table(&merged, PropFilter::Visible);
	let mut dialog = PropDialog::with_props(Recorder::default(), props, vec![ObjectId(3)], &mut diag);
	assert_eq!(dialog.factory_mut().log, vec!["open notebook Pages", "create doubled", "close notebook"]);
	assert!(matches!(diag.warnings(), [Warning::UnbalancedContainer { name }] if name == "notebook"));
}

#[test]
fn widget_specs_follow_kinds() {
	let choice = PropDescriptor::new("spec_choice", PropertyKind::Enum).with_enum([EnumItem::new("left", 0), EnumItem::new("right", 1)]);
	assert!(matches!(WidgetSpec::for_descriptor(&choice), WidgetSpec::Choice(items) if items.len() == 2));
	assert_eq!(
		WidgetSpec::for_descriptor(&PropDescriptor::new("spec_matrix", PropertyKind::Matrix)),
		WidgetSpec::None
	);
	let rows = PropDescriptor::new("spec_rows", PropertyKind::DArray).with_records(
		Arc::new(
			DescriptorTable::builder("spec row")
				.push(PropDescriptor::new("name", PropertyKind::String).with_label("Name"))
				.push(PropDescriptor::new("value", PropertyKind::String).with_label("Value"))
				.build()
				.expect("row builds"),
		),
		"row",
	);
	assert_eq!(WidgetSpec::for_descriptor(&rows), WidgetSpec::Table(vec!["Name".into(), "Value".into()]));
}
