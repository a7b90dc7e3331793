/* src/loader/format/mod.rs */

use std::path::Path;

use super::{Format, LoadError};
use serde::de::DeserializeOwned;

/// Document formats compiled into the crate.
///
/// Every variant is self-describing, which the lenient
/// [`FlagDocument`](super::FlagDocument) parsing relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFormat {
	#[cfg(feature = "json")]
	Json,
	#[cfg(feature = "toml")]
	Toml,
	#[cfg(feature = "yaml")]
	Yaml,
}

impl AnyFormat {
	/// All enabled formats, in detection order.
	pub const ALL: &'static [AnyFormat] = &[
		#[cfg(feature = "json")]
		Self::Json,
		#[cfg(feature = "toml")]
		Self::Toml,
		#[cfg(feature = "yaml")]
		Self::Yaml,
	];

	/// Finds the enabled format handling `ext`.
	pub fn from_extension(ext: &str) -> Option<Self> {
		Self::ALL
			.iter()
			.copied()
			.find(|f| f.extensions().contains(&ext))
	}

	/// Finds the format of a file by its extension.
	pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
		path.as_ref()
			.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}
}

fn parse_error(e: impl std::fmt::Display) -> LoadError {
	LoadError::Parse(e.to_string())
}

impl Format for AnyFormat {
	fn extensions(&self) -> &'static [&'static str] {
		match self {
			#[cfg(feature = "json")]
			Self::Json => &["json"],
			#[cfg(feature = "toml")]
			Self::Toml => &["toml"],
			#[cfg(feature = "yaml")]
			Self::Yaml => &["yaml", "yml"],
			#[cfg(not(any(feature = "json", feature = "toml", feature = "yaml")))]
			_ => unreachable!(),
		}
	}

	fn parse<T: DeserializeOwned>(&self, _input: &[u8]) -> Result<T, LoadError> {
		match self {
			#[cfg(feature = "json")]
			Self::Json => serde_json::from_slice(_input).map_err(parse_error),
			#[cfg(feature = "toml")]
			Self::Toml => {
				let text = std::str::from_utf8(_input).map_err(parse_error)?;
				toml::from_str(text).map_err(parse_error)
			}
			#[cfg(feature = "yaml")]
			Self::Yaml => serde_yaml::from_slice(_input).map_err(parse_error),
			#[cfg(not(any(feature = "json", feature = "toml", feature = "yaml")))]
			_ => unreachable!(),
		}
	}
}
