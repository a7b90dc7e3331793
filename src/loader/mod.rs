/* src/loader/mod.rs */

//!
//! Format-agnostic loading of flag documents.
//!
//! A flag document is a table of `name = "Enabled" | "Disabled"` entries,
//! such as the `data` section of a mounted config map. Loading only parses;
//! the result is handed to [`Features::update_from_document`](crate::Features::update_from_document).

mod document;
pub mod error;
pub mod format;
mod loader;
pub mod source;

pub use document::FlagDocument;
pub use error::LoadError;
pub use loader::{Loader, LoaderBuilder};
pub use source::MemorySource;

#[cfg(feature = "fs")]
pub use source::FileSource;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Abstract format parser that converts bytes into a structured object.
pub trait Format: Send + Sync {
	/// List of supported extensions or identifiers.
	fn extensions(&self) -> &'static [&'static str];

	/// Parse the raw bytes into the target type.
	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, LoadError>;

	/// Parse the raw bytes as a lenient flag document.
	fn parse_document(&self, input: &[u8]) -> Result<FlagDocument, LoadError> {
		self.parse(input)
	}
}

/// Abstract data source that retrieves raw bytes by key.
#[async_trait]
pub trait Source: Send + Sync {
	/// Read raw data as a vector of bytes.
	async fn read(&self, key: &str) -> Result<Vec<u8>, LoadError>;

	/// Check if the resource exists at the given key.
	async fn exists(&self, key: &str) -> bool;
}
