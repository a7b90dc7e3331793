/* src/watch/mod.rs */

//!
//! Debounced file watching for flag documents.
//!
//! [`Watcher`] only signals that the watched file changed. Reloading is
//! done by [`Features::watch`](crate::Features::watch), which re-reads the
//! document and runs it through the map pipeline.

mod watcher;
mod worker;

pub use watcher::{WatchHandle, Watcher};

use std::path::PathBuf;
use std::time::Duration;

use crate::loader::LoadError;

/// Errors raised while setting up a watch.
#[derive(thiserror::Error, Debug)]
pub enum WatchError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Notify error: {0}")]
	Notify(#[from] notify::Error),

	#[error("Invalid configuration: {0}")]
	Config(String),

	#[error("Initial load failed: {0}")]
	Load(#[from] LoadError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Configuration for the watcher behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
	/// Quiet period after the last raw event before a change is signalled.
	pub debounce: Duration,

	/// Whether a removal of the file is signalled as a change.
	pub signal_remove: bool,
}

impl Default for WatchConfig {
	fn default() -> Self {
		Self {
			debounce: Duration::from_millis(500),
			signal_remove: false,
		}
	}
}

/// The kind of filesystem event we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// File was created.
	Create,
	/// File content was modified.
	Modify,
	/// File was removed.
	Remove,
}

/// A debounced change of the watched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
	pub path: PathBuf,
	pub kind: EventKind,
}
