//! Persisted detection records.
//!
//! The detector writes one JSON record per processed image; the filename
//! stem is the capture timestamp in decimal nanoseconds (e.g.
//! `1403709080213660928.json`). Camera index and timestamp are therefore
//! not part of the record body; the loader supplies them.

use std::fs;
use std::path::Path;

use nalgebra::Scalar;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use calib_sync_core::{Correspondence, Observation, ObservationError};

/// Errors reading or writing a record file.
#[derive(thiserror::Error, Debug)]
pub enum RecordIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One camera's detection result for one image, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Scalar + serde::de::DeserializeOwned"))]
pub struct DetectionRecord<T: Scalar = f64> {
    /// False when the detector ran but found nothing usable. Such records
    /// are still written so that reprocessing can skip the image.
    #[serde(default = "default_detected")]
    pub detected: bool,
    /// Detected marker ids, strictly ascending.
    #[serde(default)]
    pub marker_ids: Vec<u32>,
    /// Corner correspondences, four per marker.
    #[serde(default)]
    pub corners: Vec<Correspondence<T>>,
}

fn default_detected() -> bool {
    true
}

impl<T: Scalar + Serialize + DeserializeOwned> DetectionRecord<T> {
    /// Load a record from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RecordIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this record to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RecordIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl<T: Scalar> DetectionRecord<T> {
    /// Turn the record into a validated observation.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored ids/corners violate the observation
    /// invariants.
    pub fn into_observation(
        self,
        camera_index: usize,
        timestamp: u64,
    ) -> Result<Observation<T>, ObservationError> {
        Observation::new(camera_index, timestamp, self.marker_ids, self.corners)
    }

    /// Build a record from an observation (camera and timestamp move into
    /// the filename).
    pub fn from_observation(obs: Observation<T>) -> Self {
        Self {
            detected: !obs.marker_ids.is_empty(),
            marker_ids: obs.marker_ids,
            corners: obs.corners,
        }
    }
}
