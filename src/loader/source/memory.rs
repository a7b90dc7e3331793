/* src/loader/source/memory.rs */

use super::super::{LoadError, Source};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

type Documents = Arc<RwLock<BTreeMap<String, Arc<[u8]>>>>;

/// An in-memory source whose documents can be replaced after the loader is built.
///
/// Clones share the same documents, so a collaborator holding one clone can
/// publish new bytes (for example, a config map it watches) that the loader
/// reads on its next `load`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
	docs: Documents,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `value` under `key`, replacing any previous document.
	pub fn insert(&self, key: &str, value: impl Into<Vec<u8>>) {
		let bytes: Arc<[u8]> = value.into().into();
		self.docs
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(key.to_string(), bytes);
	}

	/// Removes the document under `key`; later loads report it as not found.
	pub fn remove(&self, key: &str) -> bool {
		self.docs
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(key)
			.is_some()
	}

	fn get(&self, key: &str) -> Option<Arc<[u8]>> {
		self.docs
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(key)
			.cloned()
	}
}

impl<K, V> FromIterator<(K, V)> for MemorySource
where
	K: AsRef<str>,
	V: Into<Vec<u8>>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let source = Self::new();
		for (key, value) in iter {
			source.insert(key.as_ref(), value);
		}
		source
	}
}

#[async_trait]
impl Source for MemorySource {
	async fn read(&self, key: &str) -> Result<Vec<u8>, LoadError> {
		self.get(key).map(|bytes| bytes.to_vec()).ok_or(LoadError::NotFound)
	}

	async fn exists(&self, key: &str) -> bool {
		self.get(key).is_some()
	}
}
