/* src/ingest/env.rs */

use std::collections::{BTreeMap, HashMap};

use crate::flag::FlagValue;
use crate::registry::Registry;
use crate::snapshot::Snapshot;

/// An environment-like key/value source.
pub trait EnvSource {
	/// Returns the raw value stored under `key`, if any.
	fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
	fn lookup(&self, key: &str) -> Option<String> {
		std::env::var(key).ok()
	}
}

impl EnvSource for HashMap<String, String> {
	fn lookup(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

impl EnvSource for BTreeMap<String, String> {
	fn lookup(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
	fn lookup(&self, key: &str) -> Option<String> {
		(**self).lookup(key)
	}
}

/// Builds a snapshot by looking up every known flag under its own name.
///
/// Missing and empty values leave the default in place. A value that is not
/// an allowed token is rejected as well, with a warning.
pub fn from_environment<S>(registry: &Registry, source: &S) -> Snapshot
where
	S: EnvSource + ?Sized,
{
	let mut snapshot = Snapshot::defaults(registry);

	for name in registry.names() {
		let Some(raw) = source.lookup(name) else {
			continue;
		};
		if raw.is_empty() {
			continue;
		}

		match raw.parse::<FlagValue>() {
			Ok(value) => snapshot.set(name, value),
			Err(_e) => {
				#[cfg(feature = "logging")]
				log::warn!("Ignoring environment override for '{}': {}", name, _e);
			}
		}
	}

	snapshot
}
