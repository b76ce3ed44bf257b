//! JSON configuration for an alignment run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use calib_sync_core::EmptyPolicy;

use crate::record::RecordIoError;

fn default_detected_only() -> bool {
    true
}

/// Knobs of the load-and-align pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Drop records whose detection attempt found nothing before aligning.
    #[serde(default = "default_detected_only")]
    pub detected_only: bool,
    /// Emit frames whose common marker set is empty.
    #[serde(default)]
    pub keep_empty_intersections: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            detected_only: true,
            keep_empty_intersections: false,
        }
    }
}

impl SyncConfig {
    /// The empty-intersection policy selected by this config.
    pub fn empty_policy(&self) -> EmptyPolicy {
        EmptyPolicy::from(self.keep_empty_intersections)
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RecordIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RecordIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
