//! Directory loading of per-camera detection records.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use nalgebra::Scalar;
use serde::de::DeserializeOwned;

use calib_sync_core::{Observation, ObservationError};

use crate::record::DetectionRecord;

/// Errors loading a batch of observation sequences.
///
/// Any of these aborts the whole batch; no partial sequences are returned.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read data directory {dir}")]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read record {path}")]
    ReadRecord {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode record {path}")]
    DecodeRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("record filename {path} does not encode a decimal timestamp")]
    BadTimestamp { path: PathBuf },
    #[error(transparent)]
    InvalidObservation(#[from] ObservationError),
    #[error("camera {camera}: duplicate record timestamp {timestamp}")]
    DuplicateTimestamp { camera: usize, timestamp: u64 },
}

/// Load one camera's observation sequence from a directory of records.
///
/// Every `*.json` entry is a record whose stem is the decimal nanosecond
/// timestamp. Stems are parsed numerically and the sequence is sorted by
/// the parsed value, so mixed-width stems (`99.json`, `100.json`) order
/// correctly where a lexicographic sort would not. Non-json entries are
/// ignored.
///
/// With `detected_only`, records flagged as not detected are dropped
/// before the sequence is handed to the aligners.
///
/// # Errors
///
/// Fails fast on an unreadable directory, an unparsable stem, a corrupt
/// record, an invalid observation, or two records with the same timestamp.
pub fn load_camera_observations<T>(
    dir: impl AsRef<Path>,
    camera_index: usize,
    detected_only: bool,
) -> Result<Vec<Observation<T>>, LoadError>
where
    T: Scalar + DeserializeOwned,
{
    let dir = dir.as_ref();
    let mut entries = timestamped_record_paths(dir)?;
    entries.sort_by_key(|&(timestamp, _)| timestamp);

    // Duplicates are caught on the full sorted list, before detected_only
    // can hide one of the offending records.
    for pair in entries.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(LoadError::DuplicateTimestamp {
                camera: camera_index,
                timestamp: pair[0].0,
            });
        }
    }

    let mut observations: Vec<Observation<T>> = Vec::with_capacity(entries.len());
    for (timestamp, path) in entries {
        let raw = fs::read_to_string(&path).map_err(|source| LoadError::ReadRecord {
            path: path.clone(),
            source,
        })?;
        let record: DetectionRecord<T> =
            serde_json::from_str(&raw).map_err(|source| LoadError::DecodeRecord {
                path: path.clone(),
                source,
            })?;

        if detected_only && !record.detected {
            trace!("camera {camera_index}: skipping undetected record {}", path.display());
            continue;
        }
        observations.push(record.into_observation(camera_index, timestamp)?);
    }

    debug!(
        "camera {camera_index}: loaded {} observations from {}",
        observations.len(),
        dir.display()
    );
    Ok(observations)
}

/// Load one observation sequence per camera directory; the camera index is
/// the directory's position in `dirs`. Fails fast on the first bad camera.
pub fn load_multicam_observations<T>(
    dirs: &[impl AsRef<Path>],
    detected_only: bool,
) -> Result<Vec<Vec<Observation<T>>>, LoadError>
where
    T: Scalar + DeserializeOwned,
{
    dirs.iter()
        .enumerate()
        .map(|(camera_index, dir)| load_camera_observations(dir, camera_index, detected_only))
        .collect()
}

/// Scan `dir` for record files and parse each stem as a timestamp.
fn timestamped_record_paths(dir: &Path) -> Result<Vec<(u64, PathBuf)>, LoadError> {
    let read_dir = fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| LoadError::ReadDir {
            dir: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let timestamp = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| LoadError::BadTimestamp { path: path.clone() })?;
        out.push((timestamp, path));
    }
    Ok(out)
}
