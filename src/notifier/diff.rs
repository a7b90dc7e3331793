/* src/notifier/diff.rs */

use crate::flag::FlagValue;
use crate::registry::Registry;
use crate::snapshot::Snapshot;

/// A single flag whose value differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	pub name: String,
	pub old: FlagValue,
	pub new: FlagValue,
}

/// Compares `old` and `new` for every known flag, in registry order.
///
/// A flag absent from either side counts as its registry default.
pub fn changes(registry: &Registry, old: &Snapshot, new: &Snapshot) -> Vec<Change> {
	registry
		.iter()
		.filter_map(|(name, spec)| {
			let o = old.get(name).unwrap_or(spec.default);
			let n = new.get(name).unwrap_or(spec.default);
			(o != n).then(|| Change {
				name: name.to_string(),
				old: o,
				new: n,
			})
		})
		.collect()
}
