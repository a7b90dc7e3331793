/* src/notifier/mod.rs */

//!
//! Per-flag change detection and in-process publish/subscribe.
//!
//! Delivery is synchronous and happens while the subscription lock is held.
//! Overlapping updates may interleave their deliveries, so a handler should
//! re-read the current value instead of trusting the delivered pair.

mod diff;
#[cfg(feature = "events")]
mod event;
mod subscriber;

pub use diff::{Change, changes};
#[cfg(feature = "events")]
pub use event::{DEFAULT_EVENT_CAPACITY, FlagEvent};
pub use subscriber::Subscriber;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use crate::flag::FlagValue;

type Subscriptions = HashMap<String, Vec<Arc<dyn Subscriber>>>;

/// Registry of subscribers keyed by flag name.
pub struct Notifier {
	subs: Mutex<Subscriptions>,
	#[cfg(feature = "events")]
	events: tokio::sync::broadcast::Sender<FlagEvent>,
}

impl Notifier {
	pub fn new() -> Self {
		Self {
			subs: Mutex::new(HashMap::new()),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Creates a notifier with a custom event channel capacity.
	///
	/// Note: Events may be dropped if receivers fall behind and the channel
	/// fills up.
	#[cfg(feature = "events")]
	pub fn with_event_capacity(capacity: usize) -> Self {
		Self {
			subs: Mutex::new(HashMap::new()),
			events: tokio::sync::broadcast::channel(capacity).0,
		}
	}

	// A panicking handler poisons the lock; the map itself is still valid.
	fn lock(&self) -> MutexGuard<'_, Subscriptions> {
		self.subs.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Registers `subscriber` for changes of `name`.
	///
	/// Registering the same `Arc` twice for one name is a no-op and returns
	/// false. Must not be called from inside a handler.
	pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>, name: impl Into<String>) -> bool {
		let mut subs = self.lock();
		let list = subs.entry(name.into()).or_default();

		// Compare data pointers only; vtables may differ across codegen units.
		if list
			.iter()
			.any(|s| std::ptr::addr_eq(Arc::as_ptr(s), Arc::as_ptr(&subscriber)))
		{
			return false;
		}
		list.push(subscriber);
		true
	}

	/// Delivers a change of `name` to its subscribers, in registration order.
	pub fn notify(&self, name: &str, old: FlagValue, new: FlagValue) {
		let subs = self.lock();

		if let Some(list) = subs.get(name) {
			for subscriber in list {
				subscriber.changed(name, old, new);
			}
		}

		#[cfg(feature = "events")]
		{
			let _ = self.events.send(FlagEvent::Changed {
				name: name.to_string(),
				old,
				new,
			});
		}
	}

	/// Number of subscribers registered for `name`. Blocks during delivery.
	pub fn subscriber_count(&self, name: &str) -> usize {
		self.lock().get(name).map_or(0, Vec::len)
	}

	/// Subscribes to the broadcast of delivered changes.
	#[cfg(feature = "events")]
	pub fn events(&self) -> tokio::sync::broadcast::Receiver<FlagEvent> {
		self.events.subscribe()
	}
}

impl Default for Notifier {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Notifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("Notifier");
		// Formatting from inside a handler must not wait on the delivery lock.
		let subs = match self.subs.try_lock() {
			Ok(subs) => subs,
			Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
			Err(TryLockError::WouldBlock) => return s.finish_non_exhaustive(),
		};
		let mut names: Vec<_> = subs.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
		names.sort_unstable();
		s.field("subscriptions", &names).finish()
	}
}
