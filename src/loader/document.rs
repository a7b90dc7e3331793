/* src/loader/document.rs */

use std::collections::BTreeMap;

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

/// A parsed flag document.
///
/// Parsing is lenient: string entries are kept as-is, nested tables become
/// sections, and any other value (numbers, booleans, lists) is dropped. No
/// flag-level validation happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagDocument {
	entries: BTreeMap<String, String>,
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	sections: BTreeMap<String, FlagDocument>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
	Text(String),
	Table(FlagDocument),
	Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for FlagDocument {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = BTreeMap::<String, RawEntry>::deserialize(deserializer)?;
		let mut doc = FlagDocument::default();
		for (key, entry) in raw {
			match entry {
				RawEntry::Text(value) => {
					doc.entries.insert(key, value);
				}
				RawEntry::Table(section) => {
					doc.sections.insert(key, section);
				}
				RawEntry::Other(_) => {}
			}
		}
		Ok(doc)
	}
}

impl FlagDocument {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Returns a nested table by name.
	pub fn section(&self, name: &str) -> Option<&FlagDocument> {
		self.sections.get(name)
	}

	/// String entries at this level.
	pub fn entries(&self) -> &BTreeMap<String, String> {
		&self.entries
	}

	pub fn into_entries(self) -> BTreeMap<String, String> {
		self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty() && self.sections.is_empty()
	}
}

impl<K, V> FromIterator<(K, V)> for FlagDocument
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut doc = Self::default();
		for (k, v) in iter {
			doc.insert(k, v);
		}
		doc
	}
}
