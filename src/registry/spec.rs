/* src/registry/spec.rs */

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::flag::FlagValue;

/// Maturity stage of a known flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Stage {
	#[default]
	Alpha,
	Beta,
	Stable,
}

impl Stage {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Alpha => "alpha",
			Self::Beta => "beta",
			Self::Stable => "stable",
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage: {0:?}")]
pub struct ParseStageError(pub String);

impl FromStr for Stage {
	type Err = ParseStageError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"alpha" => Ok(Self::Alpha),
			"beta" => Ok(Self::Beta),
			"stable" => Ok(Self::Stable),
			other => Err(ParseStageError(other.to_string())),
		}
	}
}

/// Catalog metadata of a single known flag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagSpec {
	/// Value used when no override is supplied.
	pub default: FlagValue,
	/// Release in which the flag was introduced.
	pub since: String,
	pub stage: Stage,
}

impl FlagSpec {
	pub fn new(default: FlagValue, since: impl Into<String>, stage: Stage) -> Self {
		Self {
			default,
			since: since.into(),
			stage,
		}
	}
}
