/* src/ingest/map.rs */

use crate::flag::FlagValue;
use crate::registry::Registry;
use crate::snapshot::Snapshot;

/// Builds a snapshot from an arbitrary string map.
///
/// Unknown keys and values outside the allowed set are skipped; known flags
/// absent from `raw` keep their default. The same `raw` against the same
/// registry always yields an equal snapshot.
pub fn from_map<I, K, V>(registry: &Registry, raw: I) -> Snapshot
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut snapshot = Snapshot::defaults(registry);

	for (key, value) in raw {
		let (key, value) = (key.as_ref(), value.as_ref());

		if !registry.contains(key) {
			#[cfg(feature = "logging")]
			log::debug!("Ignoring unknown flag '{}'", key);
			continue;
		}

		match value.parse::<FlagValue>() {
			Ok(value) => snapshot.set(key, value),
			Err(_e) => {
				#[cfg(feature = "logging")]
				log::warn!("Ignoring value for '{}': {}", key, _e);
			}
		}
	}

	snapshot
}
