/* src/store/replace.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::Store;
use crate::snapshot::Snapshot;

impl Store {
	/// Atomically installs `next` and returns the snapshot it replaced.
	///
	/// # Notes
	///
	/// - Racing writers each get back the snapshot their own swap displaced,
	///   so the returned values chain through every installed snapshot.
	/// - Diffing and notifying are left to the caller and are not serialized
	///   across overlapping calls. Subscribers may see interleaved deliveries.
	pub fn replace(&self, next: Snapshot) -> Arc<Snapshot> {
		self.replace_arc(Arc::new(next))
	}

	/// Same as [`replace`](Store::replace) for an already shared snapshot.
	pub fn replace_arc(&self, next: Arc<Snapshot>) -> Arc<Snapshot> {
		self.replace_counted(next).0
	}

	/// Like [`replace_arc`](Store::replace_arc), also returning the generation
	/// this call produced.
	///
	/// The counter is bumped right after the swap, not with it. Under racing
	/// writers the numbers are unique per call but need not follow swap order.
	pub fn replace_counted(&self, next: Arc<Snapshot>) -> (Arc<Snapshot>, u64) {
		let previous = self.inner.swap(next);
		let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
		(previous, generation)
	}
}
