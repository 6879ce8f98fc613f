// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Harness settings and the storage port they persist through.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::compare::Tolerance;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Serializes config values as JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize the value stored under `key`; `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist a value under `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

/// JSON files under a base directory, one per key.
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Store rooted at the user config directory (e.g. `~/.config/mmath`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "mmath")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Store rooted at `base`, created if missing.
    pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        fs::write(self.path_for(key), data)?;
        Ok(())
    }
}

/// In-process store for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

/// PRNG seed per generated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seeds {
    /// Translations and Euler triples.
    pub vec3: u64,
    /// Single-axis angles.
    pub floats: u64,
    /// Rotation orders.
    pub orders: u64,
    /// Per-axis scales.
    pub scales: u64,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            vec3: 0,
            floats: 1,
            orders: 2,
            scales: 4,
        }
    }
}

/// Everything a harness run depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Cases drawn per operation.
    pub samples: usize,
    /// Seeds for the input streams.
    pub seeds: Seeds,
    /// Translations and angles are drawn from `±value_range`.
    pub value_range: f32,
    /// Smallest scale magnitude drawn.
    pub scale_min: f32,
    /// Largest scale magnitude drawn.
    pub scale_max: f32,
    /// Pass threshold for each comparison.
    pub tolerance: Tolerance,
    /// Whether discrepancies fail the run.
    pub fail_on_mismatch: bool,
}

impl HarnessConfig {
    /// Key under which the config is stored.
    pub const KEY: &'static str = "harness";

    /// Reads a config file directly, bypassing the store.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes the config to `path` as pretty JSON.
    pub fn save_file(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Stored config, or the defaults when nothing is stored yet.
    pub fn load_or_default<S: ConfigStore>(
        service: &ConfigService<S>,
    ) -> Result<Self, ConfigError> {
        Ok(service.load(Self::KEY)?.unwrap_or_default())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            seeds: Seeds::default(),
            value_range: 1000.0,
            scale_min: 0.25,
            scale_max: 2.0,
            tolerance: Tolerance::default(),
            fail_on_mismatch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_defaults() {
        let service = ConfigService::new(MemoryConfigStore::default());
        let cfg = HarnessConfig::load_or_default(&service).expect("load");
        assert_eq!(cfg, HarnessConfig::default());
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let cfg: HarnessConfig =
            serde_json::from_str(r#"{ "samples": 7, "seeds": { "orders": 9 } }"#).expect("parse");
        assert_eq!(cfg.samples, 7);
        assert_eq!(cfg.seeds.orders, 9);
        assert_eq!(cfg.seeds.vec3, 0);
        assert!(cfg.fail_on_mismatch);
    }

    #[test]
    fn malformed_blob_is_a_serde_error() {
        let store = MemoryConfigStore::default();
        store.save_raw(HarnessConfig::KEY, b"{ not json").expect("save");
        let service = ConfigService::new(store);
        assert!(matches!(
            HarnessConfig::load_or_default(&service),
            Err(ConfigError::Serde(_))
        ));
    }
}
