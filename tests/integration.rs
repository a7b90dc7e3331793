/* tests/integration.rs */

#![cfg(feature = "full")]

use std::sync::Arc;
use std::time::Duration;

use livegate::loader::format::AnyFormat;
use livegate::loader::{FileSource, Loader};
use livegate::notifier::FlagEvent;
use livegate::watch::WatchConfig;
use livegate::{Features, FlagValue};

#[tokio::test]
async fn test_file_source_sandbox() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	tokio::fs::write(dir.path().join("flags.json"), br#"{"EXAMPLE": "Disabled"}"#).await?;

	let loader = Loader::builder()
		.source(FileSource::new(dir.path()))
		.format(AnyFormat::Json)
		.build()?;

	assert!(loader.load_file("../flags.json").await.is_err());
	assert_eq!(loader.load("flags").await?.get("EXAMPLE"), Some("Disabled"));
	Ok(())
}

#[tokio::test]
async fn test_live_reload() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("flags.json");
	tokio::fs::write(&path, br#"{"EXAMPLE": "Enabled"}"#).await?;

	let loader = Loader::builder()
		.source(FileSource::new(dir.path()))
		.format(AnyFormat::Json)
		.build()?;

	let features = Arc::new(Features::default());
	let mut events = features.events();

	let config = WatchConfig {
		debounce: Duration::from_millis(100),
		..WatchConfig::default()
	};
	let handle = features
		.watch(Arc::new(loader), "flags", &path, config)
		.await?;
	assert!(handle.is_active());
	assert!(features.is_enabled("EXAMPLE"));

	// Give the watcher a moment to register before writing.
	tokio::time::sleep(Duration::from_millis(200)).await;
	tokio::fs::write(&path, br#"{"EXAMPLE": "Disabled"}"#).await?;

	for _ in 0..50 {
		// 5 seconds max
		tokio::time::sleep(Duration::from_millis(100)).await;
		if features.is_disabled("EXAMPLE") {
			break;
		}
	}

	assert!(features.is_disabled("EXAMPLE"));
	assert_eq!(
		tokio::time::timeout(Duration::from_secs(1), events.recv()).await??,
		FlagEvent::Changed {
			name: "EXAMPLE".to_string(),
			old: FlagValue::Enabled,
			new: FlagValue::Disabled,
		}
	);

	handle.stop();
	Ok(())
}
