/* src/watch/worker.rs */

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc};

use super::{EventKind, WatchConfig, WatchEvent};

struct Pending {
	last_seen: Instant,
	kind: EventKind,
}

pub(crate) async fn process_events(
	mut raw_rx: mpsc::Receiver<notify::Result<notify::Event>>,
	user_tx: broadcast::Sender<WatchEvent>,
	path: PathBuf,
	file_name: OsString,
	config: WatchConfig,
) {
	let mut pending: Option<Pending> = None;

	let tick_rate = if config.debounce < Duration::from_millis(50) {
		config.debounce.max(Duration::from_millis(1))
	} else {
		config.debounce / 5
	};

	let mut interval = tokio::time::interval(tick_rate);

	loop {
		tokio::select! {
			maybe_event = raw_rx.recv() => {
				match maybe_event {
					Some(Ok(event)) => handle_raw_event(event, &mut pending, &file_name),
					Some(Err(e)) => tracing::error!("Notify error: {:?}", e),
					None => break,
				}
			}
			_ = interval.tick() => {
				flush_pending(&mut pending, &user_tx, &path, &config);
			}
		}
	}
}

fn handle_raw_event(event: notify::Event, pending: &mut Option<Pending>, file_name: &OsString) {
	use notify::EventKind as NK;
	let kind = match event.kind {
		NK::Create(_) => EventKind::Create,
		NK::Modify(_) => EventKind::Modify,
		NK::Remove(_) => EventKind::Remove,
		_ => return,
	};

	// The parent directory is watched non-recursively, so the file name is unique.
	if !event
		.paths
		.iter()
		.any(|p| p.file_name() == Some(file_name.as_os_str()))
	{
		return;
	}

	let now = Instant::now();
	match pending {
		Some(state) => {
			state.last_seen = now;
			state.kind = match (state.kind, kind) {
				// An editor replacing the file shows up as remove then create.
				(EventKind::Remove, EventKind::Create | EventKind::Modify) => EventKind::Modify,
				(EventKind::Create, EventKind::Modify) => EventKind::Create,
				(_, next) => next,
			};
		}
		None => {
			*pending = Some(Pending {
				last_seen: now,
				kind,
			});
		}
	}
}

fn flush_pending(
	pending: &mut Option<Pending>,
	tx: &broadcast::Sender<WatchEvent>,
	path: &Path,
	config: &WatchConfig,
) {
	let Some(state) = pending.as_ref() else {
		return;
	};
	if state.last_seen.elapsed() < config.debounce {
		return;
	}

	let kind = state.kind;
	*pending = None;

	if kind == EventKind::Remove && !config.signal_remove {
		tracing::debug!("Ignoring removal of {:?}", path);
		return;
	}

	let _ = tx.send(WatchEvent {
		path: path.to_path_buf(),
		kind,
	});
}
