//! JSON file implementation of the cache store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CacheError, CacheMap, CacheStore};

/// File-based implementation of [`CacheStore`].
///
/// The file is a JSON object keyed by hostname:
///
/// ```json
/// {
///   "home.example.duia.in": {
///     "ipv4": "203.0.113.9",
///     "ipv6": "2001:db8::1"
///   }
/// }
/// ```
///
/// # Atomic Writes
///
/// Saving writes `{path}.tmp` and renames it over `{path}`, so the cache is
/// either the old or the new document, never a partial one.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self) -> Result<CacheMap, CacheError> {
        let content = match std::fs::read(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cache at {}, starting empty", self.path.display());
                return Ok(CacheMap::new());
            }
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&content).map_err(|source| CacheError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, cache: &CacheMap) -> Result<(), CacheError> {
        let mut content = serde_json::to_string_pretty(cache).map_err(CacheError::Serialize)?;
        content.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        // cache.json -> cache.json.tmp, not cache.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));
        std::fs::write(&temp_path, content).map_err(|e| self.write_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;

        tracing::debug!("Saved {} cache entries to {}", cache.len(), self.path.display());
        Ok(())
    }
}
