//! Persistence of the last-published addresses per hostname.
//!
//! The cache is what makes a run idempotent: an address is only sent to the
//! provider when it differs from the one recorded here, and a record only
//! changes after the provider confirmed the update.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileCacheStore;

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{Address, Family};

/// Last-published addresses of one hostname.
///
/// Fields hold the text that was written, not a parsed [`Address`], so a
/// hand-edited or stale value only invalidates that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Last IPv4 address confirmed by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,

    /// Last IPv6 address confirmed by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
}

impl HostRecord {
    /// Returns the cached text for `family`.
    #[must_use]
    pub fn cached(&self, family: Family) -> Option<&str> {
        match family {
            Family::V4 => self.ipv4.as_deref(),
            Family::V6 => self.ipv6.as_deref(),
        }
    }

    /// Records `addr` in the field matching its family.
    pub fn record(&mut self, addr: &Address) {
        let slot = match addr.family() {
            Family::V4 => &mut self.ipv4,
            Family::V6 => &mut self.ipv6,
        };
        *slot = Some(addr.to_string());
    }
}

/// Hostname to [`HostRecord`] map, the whole persisted state.
///
/// Keys are kept sorted so the file is written deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheMap(BTreeMap<String, HostRecord>);

impl CacheMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `host`, if any.
    #[must_use]
    pub fn get(&self, host: &str) -> Option<&HostRecord> {
        self.0.get(host)
    }

    /// Returns the record for `host`, creating an empty one if needed.
    pub fn entry(&mut self, host: &str) -> &mut HostRecord {
        self.0.entry(host.to_string()).or_default()
    }

    /// Inserts or replaces the record for `host`.
    pub fn insert(&mut self, host: impl Into<String>, record: HostRecord) {
        self.0.insert(host.into(), record);
    }

    /// Returns the number of hostnames recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no hostname is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over hostnames and records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostRecord)> {
        self.0.iter().map(|(host, record)| (host.as_str(), record))
    }
}

/// Errors that can occur while loading or saving the cache.
///
/// Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache file exists but is not a valid cache document.
    #[error("Cache file {} is corrupt: {source}", path.display())]
    Corrupt {
        /// Path of the cache file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The cache file exists but could not be read.
    #[error("Failed to read cache file {}: {source}", path.display())]
    Read {
        /// Path of the cache file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The cache file could not be written.
    #[error("Failed to write cache file {}: {source}", path.display())]
    Write {
        /// Path of the cache file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The cache could not be serialized.
    #[error("Failed to serialize cache: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Abstraction for loading and saving the [`CacheMap`].
///
/// Implementations should:
/// - Treat a missing cache as an empty map
/// - Report unreadable or malformed caches as errors
/// - Replace the stored cache atomically on save
pub trait CacheStore: Send + Sync {
    /// Loads the cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Corrupt`] or [`CacheError::Read`] if a stored
    /// cache exists but cannot be used.
    fn load(&self) -> Result<CacheMap, CacheError>;

    /// Replaces the stored cache with `cache`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Write`] or [`CacheError::Serialize`] on failure.
    fn save(&self, cache: &CacheMap) -> Result<(), CacheError>;
}

/// Mock cache store for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::RwLock;

    /// A mock implementation of [`CacheStore`] for testing.
    #[derive(Debug)]
    pub struct MockCacheStore {
        initial: Option<CacheMap>,
        fail_save: bool,
        saved: RwLock<Option<CacheMap>>,
        loads: RwLock<usize>,
    }

    impl MockCacheStore {
        /// Creates a store whose `load` returns `cache`.
        #[must_use]
        pub fn with_cache(cache: CacheMap) -> Self {
            Self {
                initial: Some(cache),
                fail_save: false,
                saved: RwLock::new(None),
                loads: RwLock::new(0),
            }
        }

        /// Creates a store holding an empty cache.
        #[must_use]
        pub fn empty() -> Self {
            Self::with_cache(CacheMap::new())
        }

        /// Creates a store whose `load` reports a corrupt file.
        #[must_use]
        pub fn corrupt() -> Self {
            Self {
                initial: None,
                ..Self::empty()
            }
        }

        /// Makes every `save` fail.
        #[must_use]
        pub fn failing_save(mut self) -> Self {
            self.fail_save = true;
            self
        }

        /// Returns the last saved cache, if any.
        #[must_use]
        pub fn saved(&self) -> Option<CacheMap> {
            self.saved.read().unwrap().clone()
        }

        /// Returns how many times `load` was called.
        #[must_use]
        pub fn loads(&self) -> usize {
            *self.loads.read().unwrap()
        }
    }

    impl CacheStore for MockCacheStore {
        fn load(&self) -> Result<CacheMap, CacheError> {
            *self.loads.write().unwrap() += 1;
            self.initial.clone().ok_or_else(|| CacheError::Corrupt {
                path: PathBuf::from("mock.json"),
                source: serde_json::from_str::<CacheMap>("{").unwrap_err(),
            })
        }

        fn save(&self, cache: &CacheMap) -> Result<(), CacheError> {
            if self.fail_save {
                return Err(CacheError::Write {
                    path: PathBuf::from("mock.json"),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            *self.saved.write().unwrap() = Some(cache.clone());
            Ok(())
        }
    }
}
