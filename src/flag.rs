/* src/flag.rs */

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wire token for an enabled flag.
pub const ENABLED: &str = "Enabled";
/// Wire token for a disabled flag.
pub const DISABLED: &str = "Disabled";

/// The value of a feature flag.
///
/// Only two states exist. Parsing is case-sensitive and accepts exactly
/// [`ENABLED`] and [`DISABLED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlagValue {
	Enabled,
	Disabled,
}

impl FlagValue {
	/// All allowed values, in wire order.
	pub const ALL: [FlagValue; 2] = [FlagValue::Enabled, FlagValue::Disabled];

	/// Returns the wire token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Enabled => ENABLED,
			Self::Disabled => DISABLED,
		}
	}

	pub const fn is_enabled(self) -> bool {
		matches!(self, Self::Enabled)
	}
}

impl fmt::Display for FlagValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<bool> for FlagValue {
	fn from(enabled: bool) -> Self {
		if enabled { Self::Enabled } else { Self::Disabled }
	}
}

/// Returned when a string is not one of the two allowed tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flag value {value:?}, expected \"Enabled\" or \"Disabled\"")]
pub struct ParseFlagValueError {
	pub value: String,
}

impl FromStr for FlagValue {
	type Err = ParseFlagValueError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			ENABLED => Ok(Self::Enabled),
			DISABLED => Ok(Self::Disabled),
			other => Err(ParseFlagValueError {
				value: other.to_string(),
			}),
		}
	}
}
