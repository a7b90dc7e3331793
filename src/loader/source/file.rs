/* src/loader/source/file.rs */

use super::super::{LoadError, Source};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// A file system source backed by tokio::fs.
#[derive(Debug, Clone)]
pub struct FileSource {
	root: PathBuf,
}

impl FileSource {
	/// Create a new FileSource rooted at the given path.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Resolves the path safely, ensuring it is within the root directory.
	async fn resolve_secure(&self, key: &str) -> Result<PathBuf, LoadError> {
		if Path::new(key)
			.components()
			.any(|c| matches!(c, Component::ParentDir | Component::RootDir))
		{
			return Err(LoadError::SandboxViolation);
		}

		let canonical_root = fs::canonicalize(&self.root).await?;

		match fs::canonicalize(self.root.join(key)).await {
			Ok(canonical_path) if canonical_path.starts_with(&canonical_root) => Ok(canonical_path),
			Ok(_) => Err(LoadError::SandboxViolation),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound),
			Err(e) => Err(LoadError::Io(e)),
		}
	}
}

#[async_trait]
impl Source for FileSource {
	async fn read(&self, key: &str) -> Result<Vec<u8>, LoadError> {
		let path = self.resolve_secure(key).await?;
		Ok(fs::read(path).await?)
	}

	async fn exists(&self, key: &str) -> bool {
		self.resolve_secure(key).await.is_ok()
	}
}
