/* src/controller/load.rs */

use crate::loader::format::AnyFormat;
use crate::loader::{FlagDocument, Format, LoadError, Loader};
use crate::notifier::Change;

use super::Features;

#[cfg(feature = "watch")]
use std::path::PathBuf;
#[cfg(feature = "watch")]
use std::sync::Arc;

#[cfg(feature = "watch")]
use crate::watch::{WatchConfig, WatchError, WatchHandle, Watcher};

impl Features {
	/// Replaces the configuration from a parsed document's string entries.
	pub fn update_from_document(&self, document: &FlagDocument) -> Vec<Change> {
		self.update_from_map(document.entries())
	}

	/// Parses `input` in `format` and replaces the configuration with it.
	///
	/// A document that fails to parse leaves the current configuration untouched.
	pub fn update_from_bytes(&self, format: AnyFormat, input: &[u8]) -> Result<Vec<Change>, LoadError> {
		let document = format.parse_document(input)?;
		Ok(self.update_from_document(&document))
	}

	/// Loads the document `key` through `loader` and replaces the configuration.
	pub async fn load(&self, loader: &Loader, key: &str) -> Result<Vec<Change>, LoadError> {
		let document = loader.load(key).await?;
		Ok(self.update_from_document(&document))
	}

	/// Loads `key` once, then reloads it whenever the file at `path` changes.
	///
	/// Failed reloads keep the current configuration and are logged. The
	/// returned handle stops the watch when dropped.
	#[cfg(feature = "watch")]
	pub async fn watch(
		self: &Arc<Self>,
		loader: Arc<Loader>,
		key: impl Into<String>,
		path: impl Into<PathBuf>,
		config: WatchConfig,
	) -> Result<WatchHandle, WatchError> {
		use tokio::sync::broadcast::error::RecvError;

		let key = key.into();
		self.load(&loader, &key).await?;

		let watcher = Watcher::new(path, config)?;
		let mut rx = watcher.subscribe();
		let features = Arc::clone(self);

		let handle = tokio::spawn(async move {
			tracing::info!("Started watching flag document '{}'", key);
			loop {
				match rx.recv().await {
					Ok(_) | Err(RecvError::Lagged(_)) => match features.load(&loader, &key).await {
						Ok(changed) => {
							tracing::debug!("Reloaded '{}', {} flag(s) changed", key, changed.len())
						}
						Err(e) => tracing::warn!("Failed to reload flag document '{}': {}", key, e),
					},
					Err(RecvError::Closed) => break,
				}
			}
			tracing::info!("Stopped watching flag document '{}'", key);
		});

		Ok(WatchHandle {
			watcher,
			abort_handle: handle.abort_handle(),
		})
	}
}
