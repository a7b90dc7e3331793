/* src/registry/mod.rs */

//!
//! Read-only catalog of known flags.
//!
//! A [`Registry`] is assembled once, before any store is created, and has
//! no mutation API afterwards. Names are case-sensitive.

mod spec;

pub use spec::{FlagSpec, ParseStageError, Stage};

use std::collections::BTreeMap;

use crate::flag::FlagValue;

/// Compiled-in catalog used by [`Registry::builtin`].
const BUILTIN: &[(&str, FlagValue, &str, Stage)] =
	&[("EXAMPLE", FlagValue::Enabled, "2.0", Stage::Alpha)];

/// Immutable mapping from flag name to its [`FlagSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registry {
	flags: BTreeMap<String, FlagSpec>,
}

/// One-shot builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
	flags: BTreeMap<String, FlagSpec>,
}

impl RegistryBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a flag. A later entry with the same name replaces the earlier one.
	pub fn flag(mut self, name: impl Into<String>, spec: FlagSpec) -> Self {
		self.flags.insert(name.into(), spec);
		self
	}

	pub fn build(self) -> Registry {
		Registry { flags: self.flags }
	}
}

impl Registry {
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::new()
	}

	/// The catalog shipped with the crate.
	pub fn builtin() -> Self {
		BUILTIN
			.iter()
			.fold(Self::builder(), |b, &(name, default, since, stage)| {
				b.flag(name, FlagSpec::new(default, since, stage))
			})
			.build()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.flags.contains_key(name)
	}

	pub fn get(&self, name: &str) -> Option<&FlagSpec> {
		self.flags.get(name)
	}

	pub fn default_of(&self, name: &str) -> Option<FlagValue> {
		self.flags.get(name).map(|spec| spec.default)
	}

	/// Flag names in ascending order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.flags.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagSpec)> {
		self.flags.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Names of the flags in the given maturity stage.
	pub fn in_stage(&self, stage: Stage) -> impl Iterator<Item = &str> {
		self.iter()
			.filter(move |(_, spec)| spec.stage == stage)
			.map(|(name, _)| name)
	}

	pub fn len(&self) -> usize {
		self.flags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.flags.is_empty()
	}
}
