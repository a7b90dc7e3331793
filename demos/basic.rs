/* demos/basic.rs */

use livegate::loader::format::AnyFormat;
use livegate::loader::{FileSource, Loader};
use livegate::watch::WatchConfig;
use livegate::{Features, FlagValue};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. Prepare a real file
	let config_path = "example_flags.yaml";
	fs::write(config_path, "EXAMPLE: Enabled\n")?;
	println!("Created {}", config_path);

	// 1. Setup flags, seeded from the environment (e.g. EXAMPLE=Disabled)
	let features = Arc::new(Features::builder().from_environment(true).build());

	// 2. React to changes; always re-read the current value
	let reader = Arc::downgrade(&features);
	features.subscribe(
		Arc::new(move |name: &str, old: FlagValue, new: FlagValue| {
			let now = reader.upgrade().map(|f| f.is_enabled(name));
			println!("{name} changed {old} -> {new} (enabled now: {now:?})");
		}),
		"EXAMPLE",
	);

	// 3. Loader over the current directory
	let loader = Loader::builder()
		.source(FileSource::new("."))
		.format(AnyFormat::Yaml)
		.build()?;

	// 4. Initial load and watch
	let _handle = features
		.watch(
			Arc::new(loader),
			"example_flags",
			config_path,
			WatchConfig::default(),
		)
		.await?;

	println!(
		"Watching {}... (set EXAMPLE to Enabled or Disabled to see updates)",
		config_path
	);

	for _ in 0..10 {
		tokio::time::sleep(Duration::from_secs(2)).await;
		println!("EXAMPLE enabled: {}", features.is_enabled("EXAMPLE"));
	}

	// Cleanup
	fs::remove_file(config_path)?;
	println!("Done.");
	Ok(())
}
