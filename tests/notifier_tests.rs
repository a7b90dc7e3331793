/* tests/notifier_tests.rs */

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use livegate::ingest::from_map;
use livegate::notifier::changes;
use livegate::{Change, Features, FlagSpec, FlagValue, Notifier, Registry, Snapshot, Stage, Subscriber};

type Call = (String, FlagValue, FlagValue);

#[derive(Default)]
struct Recorder {
	calls: Mutex<Vec<Call>>,
}

impl Recorder {
	fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}
}

impl Subscriber for Recorder {
	fn changed(&self, name: &str, old: FlagValue, new: FlagValue) {
		self.calls.lock().unwrap().push((name.to_string(), old, new));
	}
}

fn call(name: &str, old: FlagValue, new: FlagValue) -> Call {
	(name.to_string(), old, new)
}

fn registry() -> Registry {
	Registry::builder()
		.flag("A", FlagSpec::new(FlagValue::Enabled, "1.0", Stage::Alpha))
		.flag("B", FlagSpec::new(FlagValue::Disabled, "1.0", Stage::Alpha))
		.build()
}

#[test]
fn test_changes_reports_only_differences() {
	let registry = registry();
	let old = from_map(&registry, [("A", "Enabled"), ("B", "Disabled")]);
	let new = from_map(&registry, [("A", "Enabled"), ("B", "Enabled")]);

	let diff = changes(&registry, &old, &new);
	assert_eq!(
		diff,
		vec![Change {
			name: "B".to_string(),
			old: FlagValue::Disabled,
			new: FlagValue::Enabled,
		}]
	);
	assert!(changes(&registry, &new, &new).is_empty());
}

#[test]
fn test_changes_treats_missing_entries_as_default() {
	let registry = registry();
	let empty = Snapshot::defaults(&Registry::builder().build());
	let old = from_map(&registry, [("A", "Disabled")]);

	assert_eq!(
		changes(&registry, &old, &empty),
		vec![Change {
			name: "A".to_string(),
			old: FlagValue::Disabled,
			new: FlagValue::Enabled,
		}]
	);
	assert!(changes(&registry, &empty, &Snapshot::defaults(&registry)).is_empty());
}

#[test]
fn test_update_config_with_foreign_snapshot_stays_total() {
	let features = Features::default();
	let recorder = Arc::new(Recorder::default());
	features.subscribe(recorder.clone(), "EXAMPLE");

	let unrelated = Registry::builder()
		.flag("OTHER", FlagSpec::new(FlagValue::Disabled, "1.0", Stage::Alpha))
		.build();
	let changed = features.update_config(Snapshot::defaults(&unrelated));

	assert!(changed.is_empty());
	assert!(recorder.calls().is_empty());
	assert_eq!(features.current().len(), 1);
	assert_eq!(features.value("EXAMPLE"), Some(FlagValue::Enabled));
	assert_eq!(features.value("OTHER"), None);

	let overlapping = Registry::builder()
		.flag("EXAMPLE", FlagSpec::new(FlagValue::Disabled, "2.0", Stage::Alpha))
		.flag("OTHER", FlagSpec::new(FlagValue::Enabled, "1.0", Stage::Alpha))
		.build();
	let changed = features.update_config(Snapshot::defaults(&overlapping));

	assert_eq!(changed.len(), 1);
	assert_eq!(
		recorder.calls(),
		vec![call("EXAMPLE", FlagValue::Enabled, FlagValue::Disabled)]
	);
	assert_eq!(features.current().len(), 1);
	assert_eq!(features.value("OTHER"), None);
}

#[test]
fn test_single_notification_for_changed_flag() {
	let features = Features::new(registry());
	let on_a = Arc::new(Recorder::default());
	let on_b = Arc::new(Recorder::default());
	features.subscribe(on_a.clone(), "A");
	features.subscribe(on_b.clone(), "B");

	let changed = features.update_from_map([("A", "Enabled"), ("B", "Enabled")]);

	assert_eq!(changed.len(), 1);
	assert!(on_a.calls().is_empty());
	assert_eq!(
		on_b.calls(),
		vec![call("B", FlagValue::Disabled, FlagValue::Enabled)]
	);
}

#[test]
fn test_subscriber_isolated_by_name() {
	let features = Features::new(registry());
	let on_a = Arc::new(Recorder::default());
	features.subscribe(on_a.clone(), "A");

	features.update_from_map([("A", "Disabled"), ("B", "Enabled")]);

	assert_eq!(
		on_a.calls(),
		vec![call("A", FlagValue::Enabled, FlagValue::Disabled)]
	);
}

#[test]
fn test_duplicate_subscription_is_noop() {
	let notifier = Notifier::new();
	let recorder = Arc::new(Recorder::default());

	assert!(notifier.subscribe(recorder.clone(), "A"));
	assert!(!notifier.subscribe(recorder.clone(), "A"));
	assert!(notifier.subscribe(recorder.clone(), "B"));
	assert_eq!(notifier.subscriber_count("A"), 1);

	notifier.notify("A", FlagValue::Enabled, FlagValue::Disabled);
	assert_eq!(recorder.calls().len(), 1);
}

#[test]
fn test_delivery_in_registration_order() {
	let notifier = Notifier::new();
	let order = Arc::new(Mutex::new(Vec::new()));

	for id in 0..3 {
		let order = Arc::clone(&order);
		notifier.subscribe(
			Arc::new(move |_: &str, _: FlagValue, _: FlagValue| order.lock().unwrap().push(id)),
			"A",
		);
	}

	notifier.notify("A", FlagValue::Enabled, FlagValue::Disabled);
	notifier.notify("B", FlagValue::Enabled, FlagValue::Disabled);
	assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_noop_update_fires_nothing() {
	let features = Features::new(registry());
	let recorder = Arc::new(Recorder::default());
	features.subscribe(recorder.clone(), "A");
	features.subscribe(recorder.clone(), "B");

	assert!(features.update_from_map([("A", "Enabled")]).is_empty());
	assert!(features.update_from_map(Vec::<(String, String)>::new()).is_empty());
	assert!(recorder.calls().is_empty());
	assert_eq!(features.store().generation(), 2);
}

#[test]
fn test_end_to_end_example_flag() {
	let features = Features::default();
	let recorder = Arc::new(Recorder::default());
	features.subscribe(recorder.clone(), "EXAMPLE");
	assert!(features.is_enabled("EXAMPLE"));

	features.update_from_map([("EXAMPLE", "Disabled")]);

	assert!(!features.is_enabled("EXAMPLE"));
	assert!(features.is_disabled("EXAMPLE"));
	assert_eq!(
		recorder.calls(),
		vec![call("EXAMPLE", FlagValue::Enabled, FlagValue::Disabled)]
	);
}

#[test]
fn test_reset_to_default_when_flag_disappears() {
	let features = Features::default();
	let recorder = Arc::new(Recorder::default());
	features.subscribe(recorder.clone(), "EXAMPLE");

	features.update_from_map([("EXAMPLE", "Disabled")]);
	features.update_from_map([("SOMETHING_ELSE", "Disabled")]);

	assert!(features.is_enabled("EXAMPLE"));
	assert_eq!(
		recorder.calls(),
		vec![
			call("EXAMPLE", FlagValue::Enabled, FlagValue::Disabled),
			call("EXAMPLE", FlagValue::Disabled, FlagValue::Enabled),
		]
	);
}

#[test]
fn test_update_from_env_source() {
	let features = Features::default();
	let mut env = std::collections::HashMap::new();
	env.insert("EXAMPLE".to_string(), "Disabled".to_string());

	let changed = features.update_from_env_source(&env);
	assert_eq!(changed.len(), 1);
	assert!(features.is_disabled("EXAMPLE"));
}

#[test]
fn test_unknown_reads_on_features() {
	let features = Features::default();
	assert!(!features.is_enabled("NOT_A_FLAG"));
	assert!(features.is_disabled("NOT_A_FLAG"));
	assert_eq!(features.value("NOT_A_FLAG"), None);
}

#[test]
fn test_handler_sees_new_snapshot() {
	let features = Arc::new(Features::default());
	let observed = Arc::new(Mutex::new(None));

	let weak = Arc::downgrade(&features);
	let slot = Arc::clone(&observed);
	features.subscribe(
		Arc::new(move |name: &str, _: FlagValue, _: FlagValue| {
			if let Some(features) = weak.upgrade() {
				*slot.lock().unwrap() = Some(features.is_enabled(name));
			}
		}),
		"EXAMPLE",
	);

	features.update_from_map([("EXAMPLE", "Disabled")]);
	assert_eq!(*observed.lock().unwrap(), Some(false));
}

#[test]
fn test_handler_can_format_features() {
	let features = Arc::new(Features::default());
	let rendered = Arc::new(Mutex::new(String::new()));

	let weak = Arc::downgrade(&features);
	let slot = Arc::clone(&rendered);
	features.subscribe(
		Arc::new(move |_: &str, _: FlagValue, _: FlagValue| {
			if let Some(features) = weak.upgrade() {
				*slot.lock().unwrap() = format!("{features:?}");
			}
		}),
		"EXAMPLE",
	);

	features.update_from_map([("EXAMPLE", "Disabled")]);
	let rendered = rendered.lock().unwrap();
	assert!(rendered.contains("Notifier"));
	assert!(rendered.contains(".."));
	drop(rendered);
	assert!(format!("{:?}", features.notifier()).contains("EXAMPLE"));
}

#[test]
fn test_panicking_handler_leaves_features_usable() {
	let features = Arc::new(Features::default());
	let armed = Arc::new(AtomicBool::new(true));
	let trigger = Arc::clone(&armed);
	features.subscribe(
		Arc::new(move |_: &str, _: FlagValue, _: FlagValue| {
			if trigger.swap(false, Ordering::SeqCst) {
				panic!("handler failure");
			}
		}),
		"EXAMPLE",
	);

	let updater = {
		let features = Arc::clone(&features);
		thread::spawn(move || features.update_from_map([("EXAMPLE", "Disabled")]))
	};
	assert!(updater.join().is_err());
	assert!(!armed.load(Ordering::SeqCst));
	assert!(features.is_disabled("EXAMPLE"));

	let recorder = Arc::new(Recorder::default());
	assert!(features.subscribe(recorder.clone(), "EXAMPLE"));
	assert_eq!(features.notifier().subscriber_count("EXAMPLE"), 2);

	let changed = features.update_from_map([("EXAMPLE", "Enabled")]);
	assert_eq!(changed.len(), 1);
	assert!(features.is_enabled("EXAMPLE"));
	assert_eq!(
		recorder.calls(),
		vec![call("EXAMPLE", FlagValue::Disabled, FlagValue::Enabled)]
	);
}

#[test]
fn test_concurrent_updates_notify_each_change_once() {
	let features = Arc::new(Features::default());
	let count = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&count);
	features.subscribe(
		Arc::new(move |_: &str, _: FlagValue, _: FlagValue| {
			counter.fetch_add(1, Ordering::SeqCst);
		}),
		"EXAMPLE",
	);

	let handles: Vec<_> = (0..8)
		.map(|i| {
			let features = Arc::clone(&features);
			thread::spawn(move || {
				let mut delivered = 0;
				for j in 0..200 {
					let value = if (i + j) % 2 == 0 { "Enabled" } else { "Disabled" };
					delivered += features.update_from_map([("EXAMPLE", value)]).len();
				}
				delivered
			})
		})
		.collect();

	let delivered: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
	assert_eq!(delivered, count.load(Ordering::SeqCst));
}

#[test]
fn test_subscribe_concurrently_with_delivery() {
	let features = Arc::new(Features::default());

	let writer = {
		let features = Arc::clone(&features);
		thread::spawn(move || {
			for j in 0..500 {
				let value = if j % 2 == 0 { "Disabled" } else { "Enabled" };
				features.update_from_map([("EXAMPLE", value)]);
			}
		})
	};

	for _ in 0..100 {
		features.subscribe(Arc::new(Recorder::default()), "EXAMPLE");
	}

	writer.join().unwrap();
	assert_eq!(features.notifier().subscriber_count("EXAMPLE"), 100);
}
