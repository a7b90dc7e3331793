/* src/store/mod.rs */

mod read;
mod replace;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use arc_swap::ArcSwap;

use crate::registry::Registry;
use crate::snapshot::Snapshot;

/// Holder of the current [`Snapshot`].
///
/// Reads are lock-free loads of an atomically swappable pointer. Writers
/// install a complete new snapshot with [`replace`](Store::replace); a
/// concurrent reader sees either the old or the new snapshot in full.
pub struct Store {
	pub(crate) inner: ArcSwap<Snapshot>,
	pub(crate) generation: AtomicU64,
}

impl Store {
	/// Creates a store holding the registry defaults.
	pub fn new(registry: &Registry) -> Self {
		Self::with_snapshot(Snapshot::defaults(registry))
	}

	pub fn with_snapshot(initial: Snapshot) -> Self {
		Self {
			inner: ArcSwap::from_pointee(initial),
			generation: AtomicU64::new(0),
		}
	}
}

impl std::fmt::Debug for Store {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Store")
			.field("current", &self.current())
			.field("generation", &self.generation())
			.finish()
	}
}

impl From<Arc<Snapshot>> for Store {
	fn from(initial: Arc<Snapshot>) -> Self {
		Self {
			inner: ArcSwap::new(initial),
			generation: AtomicU64::new(0),
		}
	}
}
