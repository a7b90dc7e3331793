/* src/loader/loader.rs */

use super::{FlagDocument, Format, LoadError, Source, format::AnyFormat};

/// Loads flag documents from a [`Source`], detecting the format by extension.
pub struct Loader {
	source: Box<dyn Source>,
	formats: Vec<AnyFormat>,
	section: Option<String>,
}

pub struct LoaderBuilder {
	source: Option<Box<dyn Source>>,
	formats: Vec<AnyFormat>,
	section: Option<String>,
}

impl LoaderBuilder {
	pub fn new() -> Self {
		Self {
			source: None,
			formats: Vec::new(),
			section: None,
		}
	}

	pub fn source(mut self, source: impl Source + 'static) -> Self {
		self.source = Some(Box::new(source));
		self
	}

	pub fn format(mut self, format: AnyFormat) -> Self {
		self.formats.push(format);
		self
	}

	/// Reads flags from a nested table (e.g. `data`) instead of the top level.
	pub fn section(mut self, name: impl Into<String>) -> Self {
		self.section = Some(name.into());
		self
	}

	pub fn build(self) -> Result<Loader, &'static str> {
		let source = self.source.ok_or("source is required")?;
		if self.formats.is_empty() {
			return Err("at least one format is required");
		}
		Ok(Loader {
			source,
			formats: self.formats,
			section: self.section,
		})
	}
}

impl Default for LoaderBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl Loader {
	pub fn new(source: Box<dyn Source>, formats: Vec<AnyFormat>) -> Self {
		Self {
			source,
			formats,
			section: None,
		}
	}

	pub fn builder() -> LoaderBuilder {
		LoaderBuilder::new()
	}

	/// Loads `{base_name}.{ext}` for the first registered format that has a match.
	pub async fn load(&self, base_name: &str) -> Result<FlagDocument, LoadError> {
		let mut found = None;

		'formats: for format in &self.formats {
			for ext in format.extensions() {
				let key = format!("{}.{}", base_name, ext);
				if self.source.exists(&key).await {
					found = Some((key, *format));
					break 'formats;
				}
			}
		}

		let (key, format) = found.ok_or(LoadError::NotFound)?;

		#[cfg(feature = "logging")]
		log::debug!("Loading flag document '{}'", key);

		self.load_explicit(&key, &format).await
	}

	/// Directly loads a specific key, selecting the parser by extension.
	pub async fn load_file(&self, key: &str) -> Result<FlagDocument, LoadError> {
		let ext = key
			.rsplit_once('.')
			.map(|(_, ext)| ext)
			.ok_or_else(|| LoadError::Parse("missing extension".to_string()))?;

		let format = self
			.formats
			.iter()
			.find(|f| f.extensions().contains(&ext))
			.ok_or_else(|| LoadError::UnsupportedFormat(ext.to_string()))?;

		self.load_explicit(key, format).await
	}

	async fn load_explicit(&self, key: &str, format: &AnyFormat) -> Result<FlagDocument, LoadError> {
		let bytes = self.source.read(key).await?;
		let document = format.parse_document(&bytes)?;

		match &self.section {
			None => Ok(document),
			Some(name) => document
				.section(name)
				.cloned()
				.ok_or_else(|| LoadError::MissingSection(name.clone())),
		}
	}
}

impl std::fmt::Debug for Loader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Loader")
			.field("formats", &self.formats)
			.field("section", &self.section)
			.finish_non_exhaustive()
	}
}
