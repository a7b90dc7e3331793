/* src/lib.rs */

//!
//! Runtime feature flags with lock-free reads and atomic replacement.
//!
//! The crate is organised leaves first:
//!
//! - **flag**: the two-state [`FlagValue`] and its wire tokens.
//! - **registry**: the read-only catalog of known flags.
//! - **snapshot**: one immutable, total flag configuration.
//! - **store**: the atomically swappable current snapshot.
//! - **ingest**: pipelines building snapshots from the environment or a string map.
//! - **notifier**: per-flag change detection and subscriptions.
//! - **controller**: [`Features`], wiring the above together.
//! - **loader** / **watch**: optional document loading and file-driven reloads.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `logging`: Logs ingestion and replacement through the `log` facade.
//! - `events`: Broadcasts every delivered change on a tokio channel.
//! - `serde`: Serialize/Deserialize for the data types.
//! - `loader`: Enables the `loader` module; `json`, `toml`, `yaml`, `fs` add formats and sources.
//! - `watch`: Reloads a flag document when its file changes.
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use livegate::{Features, FlagValue};
//!
//! let features = Features::default();
//! assert!(features.is_enabled("EXAMPLE"));
//!
//! features.subscribe(
//! 	Arc::new(|name: &str, old: FlagValue, new: FlagValue| {
//! 		println!("{name}: {old} -> {new}");
//! 	}),
//! 	"EXAMPLE",
//! );
//!
//! features.update_from_map([("EXAMPLE", "Disabled")]);
//! assert!(features.is_disabled("EXAMPLE"));
//! ```
//!
//! See `demos/basic.rs` for a file-watching example.

pub mod controller;
pub mod flag;
pub mod ingest;
pub mod notifier;
pub mod registry;
pub mod snapshot;
pub mod store;

#[cfg(feature = "loader")]
pub mod loader;

#[cfg(feature = "watch")]
pub mod watch;

pub use controller::{Features, FeaturesBuilder};
pub use flag::{DISABLED, ENABLED, FlagValue, ParseFlagValueError};
pub use notifier::{Change, Notifier, Subscriber};
pub use registry::{FlagSpec, Registry, Stage};
pub use snapshot::Snapshot;
pub use store::Store;
