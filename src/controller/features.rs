/* src/controller/features.rs */

use std::sync::Arc;

use crate::flag::FlagValue;
use crate::ingest::{self, EnvSource, ProcessEnv};
use crate::notifier::{Change, Notifier, Subscriber, changes};
use crate::registry::Registry;
use crate::snapshot::Snapshot;
use crate::store::Store;

#[cfg(feature = "logging")]
use log::{debug, info};

/// Feature flags of one application.
///
/// Created once at startup and shared, usually as `Arc<Features>`, with every
/// component that reads flags. Reads never block. Updates replace the whole
/// configuration and then notify subscribers of the flags that changed.
///
/// # Consistency
///
/// The swap and the notification are two separate steps. When two updates
/// overlap, their notifications may interleave, so subscribers can miss
/// intermediate states. Handlers should call [`is_enabled`](Self::is_enabled)
/// rather than rely on the delivered values.
pub struct Features {
	registry: Arc<Registry>,
	store: Store,
	notifier: Notifier,
}

/// Builder for [`Features`].
pub struct FeaturesBuilder {
	registry: Option<Arc<Registry>>,
	from_environment: bool,
	#[cfg(feature = "events")]
	event_capacity: Option<usize>,
}

impl FeaturesBuilder {
	pub fn new() -> Self {
		Self {
			registry: None,
			from_environment: false,
			#[cfg(feature = "events")]
			event_capacity: None,
		}
	}

	/// Catalog of known flags. Defaults to [`Registry::builtin`].
	pub fn registry(mut self, registry: impl Into<Arc<Registry>>) -> Self {
		self.registry = Some(registry.into());
		self
	}

	/// Seeds the initial snapshot from the process environment.
	pub fn from_environment(mut self, enabled: bool) -> Self {
		self.from_environment = enabled;
		self
	}

	#[cfg(feature = "events")]
	pub fn event_capacity(mut self, capacity: usize) -> Self {
		self.event_capacity = Some(capacity);
		self
	}

	pub fn build(self) -> Features {
		let registry = self
			.registry
			.unwrap_or_else(|| Arc::new(Registry::builtin()));

		let initial = if self.from_environment {
			ingest::from_environment(&registry, &ProcessEnv)
		} else {
			Snapshot::defaults(&registry)
		};

		#[cfg(feature = "events")]
		let notifier = match self.event_capacity {
			Some(capacity) => Notifier::with_event_capacity(capacity),
			None => Notifier::new(),
		};
		#[cfg(not(feature = "events"))]
		let notifier = Notifier::new();

		Features {
			store: Store::with_snapshot(initial),
			registry,
			notifier,
		}
	}
}

impl Default for FeaturesBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl Features {
	/// Starts at the defaults of `registry`.
	pub fn new(registry: impl Into<Arc<Registry>>) -> Self {
		Self::builder().registry(registry).build()
	}

	pub fn builder() -> FeaturesBuilder {
		FeaturesBuilder::new()
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	pub fn store(&self) -> &Store {
		&self.store
	}

	pub fn notifier(&self) -> &Notifier {
		&self.notifier
	}

	/// Returns the active snapshot.
	pub fn current(&self) -> Arc<Snapshot> {
		self.store.current()
	}

	/// Unknown names are never enabled.
	pub fn is_enabled(&self, name: &str) -> bool {
		self.store.is_enabled(name)
	}

	/// Unknown names are always disabled.
	pub fn is_disabled(&self, name: &str) -> bool {
		self.store.is_disabled(name)
	}

	/// Registers `subscriber` for changes of `name`. See [`Notifier::subscribe`].
	pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>, name: impl Into<String>) -> bool {
		self.notifier.subscribe(subscriber, name)
	}

	/// Subscribes to the broadcast of delivered changes.
	#[cfg(feature = "events")]
	pub fn events(&self) -> tokio::sync::broadcast::Receiver<crate::notifier::FlagEvent> {
		self.notifier.events()
	}

	/// Installs `next` and notifies subscribers of every flag that changed.
	///
	/// `next` is first mapped onto this registry (see [`Snapshot::conform`]),
	/// so a snapshot built elsewhere can never leave known flags unset.
	///
	/// Returns the changes delivered, in registry order. Subscribers run on
	/// the calling thread before this returns; a panicking handler unwinds
	/// through here after the new snapshot is already installed.
	pub fn update_config(&self, next: Snapshot) -> Vec<Change> {
		let next = Arc::new(next.conform(&self.registry));
		let (previous, _generation) = self.store.replace_counted(Arc::clone(&next));
		let changed = changes(&self.registry, &previous, &next);

		#[cfg(feature = "logging")]
		if changed.is_empty() {
			debug!("Feature config replaced without changes");
		} else {
			info!(
				"Feature config replaced (generation {}), {} flag(s) changed",
				_generation,
				changed.len()
			);
		}

		for change in &changed {
			#[cfg(feature = "logging")]
			debug!("Flag '{}' changed: {} -> {}", change.name, change.old, change.new);

			self.notifier.notify(&change.name, change.old, change.new);
		}

		changed
	}

	/// Replaces the configuration from the process environment.
	pub fn update_from_environment(&self) -> Vec<Change> {
		self.update_from_env_source(&ProcessEnv)
	}

	/// Replaces the configuration from an environment-like source.
	pub fn update_from_env_source<S>(&self, source: &S) -> Vec<Change>
	where
		S: EnvSource + ?Sized,
	{
		self.update_config(ingest::from_environment(&self.registry, source))
	}

	/// Replaces the configuration from a string map.
	///
	/// Unknown names and invalid values are ignored; flags missing from `raw`
	/// fall back to their default. Meant to be called on every external
	/// configuration update, including ones that change nothing.
	pub fn update_from_map<I, K, V>(&self, raw: I) -> Vec<Change>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		self.update_config(ingest::from_map(&self.registry, raw))
	}

	/// Value of a flag in the active snapshot, `None` if unknown.
	pub fn value(&self, name: &str) -> Option<FlagValue> {
		self.store.current().get(name)
	}
}

impl Default for Features {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl std::fmt::Debug for Features {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Features")
			.field("registry", &self.registry)
			.field("store", &self.store)
			.field("notifier", &self.notifier)
			.finish()
	}
}
