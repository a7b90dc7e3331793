/* src/watch/watcher.rs */

use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tokio::sync::{broadcast, mpsc};
use tokio::task::{AbortHandle, JoinHandle};

use super::worker::process_events;
use super::{Result, WatchConfig, WatchError, WatchEvent};

/// Watches a single file and broadcasts debounced changes.
pub struct Watcher {
	_internal_watcher: RecommendedWatcher,
	task_handle: JoinHandle<()>,
	event_tx: broadcast::Sender<WatchEvent>,
}

impl Watcher {
	/// Creates a new Watcher and starts monitoring immediately.
	///
	/// Must be called from within a tokio runtime.
	#[must_use = "Watcher must be kept alive"]
	pub fn new(path: impl Into<PathBuf>, config: WatchConfig) -> Result<Self> {
		let path = path.into();
		let file_name = path
			.file_name()
			.map(|n| n.to_os_string())
			.ok_or_else(|| WatchError::Config(format!("Not a file path: {:?}", path)))?;

		// Editors often replace files by rename, so watch the parent directory.
		let dir = match path.parent() {
			Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
			_ => Path::new(".").to_path_buf(),
		};

		if !dir.exists() {
			return Err(WatchError::Config(format!(
				"Path does not exist: {:?}",
				dir
			)));
		}

		let (raw_tx, raw_rx) = mpsc::channel(100);

		let mut internal_watcher =
			notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
				let _ = raw_tx.blocking_send(res);
			})?;

		internal_watcher.watch(&dir, RecursiveMode::NonRecursive)?;

		let (user_tx, _) = broadcast::channel(16);
		let tx_clone = user_tx.clone();

		let task_handle = tokio::spawn(async move {
			process_events(raw_rx, tx_clone, path, file_name, config).await;
		});

		Ok(Self {
			_internal_watcher: internal_watcher,
			task_handle,
			event_tx: user_tx,
		})
	}

	pub fn subscribe(&self) -> broadcast::Receiver<WatchEvent> {
		self.event_tx.subscribe()
	}

	pub fn stop(&self) {
		self.task_handle.abort();
	}
}

impl Drop for Watcher {
	fn drop(&mut self) {
		self.task_handle.abort();
	}
}

/// Keeps a live reload running; dropping it stops the watch.
pub struct WatchHandle {
	pub(crate) watcher: Watcher,
	pub(crate) abort_handle: AbortHandle,
}

impl WatchHandle {
	pub fn stop(self) {
		drop(self);
	}

	/// Returns true while the reload task is still running.
	pub fn is_active(&self) -> bool {
		!self.abort_handle.is_finished()
	}
}

impl Drop for WatchHandle {
	fn drop(&mut self) {
		self.watcher.stop();
		self.abort_handle.abort();
	}
}

impl std::fmt::Debug for WatchHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WatchHandle")
			.field("active", &self.is_active())
			.finish()
	}
}
