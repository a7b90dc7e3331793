/* src/controller/mod.rs */

//!
//! The [`Features`] orchestrator: registry, store and notifier wired together.

mod features;
#[cfg(feature = "loader")]
mod load;

pub use features::{Features, FeaturesBuilder};
