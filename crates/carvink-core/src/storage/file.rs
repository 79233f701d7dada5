//! File-based persist sink.

use super::{PersistPayload, PersistSink, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each persisted payload as `<event_name>.json` in a directory.
///
/// A later push under the same event name overwrites the earlier file.
pub struct FileSink {
    /// Directory receiving the payload files.
    base_path: PathBuf,
}

impl FileSink {
    /// Create a sink writing into `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create output directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a sink in the default location.
    ///
    /// On Unix: `~/.local/share/carvink/drawings/`
    /// On Windows: `%LOCALAPPDATA%\carvink\drawings\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("carvink").join("drawings"))
    }

    /// File path for an event name.
    pub fn event_path(&self, event_name: &str) -> PathBuf {
        // Keep event names safe for filenames
        let safe_name: String = event_name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_name))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Read back the last payload written under `event_name`.
    pub fn load(&self, event_name: &str) -> StorageResult<PersistPayload> {
        let path = self.event_path(event_name);
        if !path.exists() {
            return Err(StorageError::NotFound(event_name.to_string()));
        }

        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl PersistSink for FileSink {
    fn push(&mut self, event_name: &str, payload: &PersistPayload) -> StorageResult<()> {
        let path = self.event_path(event_name);
        let json = serde_json::to_string_pretty(payload)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::info!("Persisted drawing to {}", path.display());
        Ok(())
    }
}
