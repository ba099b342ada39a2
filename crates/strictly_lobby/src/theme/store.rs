//! Client-local key/value preference storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// String key/value storage for client preferences.
pub trait PreferenceStore {
    /// Reads the value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Writes `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PreferenceError>;
}

/// Preference storage error.
#[derive(Debug, Clone, Display, Error)]
#[display("Preference error: {} at {}:{}", message, file, line)]
pub struct PreferenceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PreferenceError {
    /// Creates a new preference error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PreferenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// TOML file of string entries.
///
/// The file is read on every access so edits made by another process are
/// picked up. A missing file is an empty store; a file that does not parse
/// is replaced on the next write.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry. Non-string values come back as their TOML text,
    /// so callers see a value they do not recognise rather than an error.
    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            PreferenceError::new(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| {
            PreferenceError::new(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(table
            .into_iter()
            .map(|(key, value)| match value {
                toml::Value::String(text) => (key, text),
                other => (key, other.to_string()),
            })
            .collect())
    }

    /// Entries to start a write from, and whether the file on disk was
    /// unreadable and must be rewritten.
    fn load_for_write(&self) -> (BTreeMap<String, String>, bool) {
        match self.load() {
            Ok(entries) => (entries, false),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable preferences file");
                (BTreeMap::new(), true)
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                PreferenceError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let content = toml::to_string(entries)
            .map_err(|e| PreferenceError::new(format!("Failed to encode preferences: {}", e)))?;
        std::fs::write(&self.path, content).map_err(|e| {
            PreferenceError::new(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let (mut entries, _) = self.load_for_write();
        entries.insert(key.to_string(), value.to_string());
        debug!("Persisting preference");
        self.save(&entries)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&mut self, key: &str) -> Result<(), PreferenceError> {
        let (mut entries, discarded) = self.load_for_write();
        if entries.remove(key).is_some() || discarded {
            debug!("Clearing preference");
            self.save(&entries)?;
        }
        Ok(())
    }
}
