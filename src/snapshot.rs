/* src/snapshot.rs */

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::flag::FlagValue;
use crate::registry::Registry;

/// One coherent flag configuration.
///
/// A snapshot is total over the [`Registry`] it was built from: every known
/// flag has a value. It cannot be modified through the public API; a new
/// configuration is installed by building a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Snapshot {
	values: BTreeMap<String, FlagValue>,
}

impl Snapshot {
	/// Every known flag at its registry default.
	pub fn defaults(registry: &Registry) -> Self {
		Self {
			values: registry
				.iter()
				.map(|(name, spec)| (name.to_string(), spec.default))
				.collect(),
		}
	}

	/// Returns true if the snapshot holds exactly the flags of `registry`.
	pub fn covers(&self, registry: &Registry) -> bool {
		self.values.len() == registry.len() && registry.names().all(|name| self.values.contains_key(name))
	}

	/// Maps the snapshot onto `registry`.
	///
	/// Names the registry does not know are dropped and known flags missing
	/// here take their default.
	pub fn conform(self, registry: &Registry) -> Self {
		if self.covers(registry) {
			return self;
		}
		let mut next = Self::defaults(registry);
		for (name, value) in self.values {
			next.set(&name, value);
		}
		next
	}

	/// Overwrites a value while the snapshot is still being built.
	///
	/// Names outside the snapshot are ignored, which keeps it total.
	pub(crate) fn set(&mut self, name: &str, value: FlagValue) {
		if let Some(slot) = self.values.get_mut(name) {
			*slot = value;
		}
	}

	/// Returns true iff `name` is mapped to [`FlagValue::Enabled`].
	///
	/// Unknown names are reported as not enabled.
	pub fn is_enabled(&self, name: &str) -> bool {
		self.values.get(name).is_some_and(|v| v.is_enabled())
	}

	/// Negation of [`is_enabled`](Self::is_enabled), so unknown names are disabled.
	pub fn is_disabled(&self, name: &str) -> bool {
		!self.is_enabled(name)
	}

	pub fn get(&self, name: &str) -> Option<FlagValue> {
		self.values.get(name).copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, FlagValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), *v))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Renders the snapshot with wire tokens as values.
	pub fn to_map(&self) -> BTreeMap<String, String> {
		self.values
			.iter()
			.map(|(k, v)| (k.clone(), v.as_str().to_string()))
			.collect()
	}
}
