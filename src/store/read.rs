/* src/store/read.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::Store;
use crate::snapshot::Snapshot;

impl Store {
	/// Returns the active snapshot. This is a lock-free operation.
	pub fn current(&self) -> Arc<Snapshot> {
		self.inner.load_full()
	}

	pub fn is_enabled(&self, name: &str) -> bool {
		self.inner.load().is_enabled(name)
	}

	pub fn is_disabled(&self, name: &str) -> bool {
		self.inner.load().is_disabled(name)
	}

	/// Number of replacements performed so far.
	pub fn generation(&self) -> u64 {
		self.generation.load(Ordering::Acquire)
	}
}
