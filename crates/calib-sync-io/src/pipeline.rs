//! One-shot load-and-align pipeline.

use std::path::Path;

use log::info;
use nalgebra::Scalar;
use serde::de::DeserializeOwned;

use calib_sync_core::{align_streams, AlignedFrame, SyncError};

use crate::config::SyncConfig;
use crate::loader::{load_multicam_observations, LoadError};

/// Errors of the end-to-end pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Align(#[from] SyncError),
}

/// Load every camera directory and align the resulting streams.
///
/// The camera index of each stream is its position in `dirs`. Loading is
/// fail-fast: any unreadable directory or corrupt record aborts the batch
/// before alignment starts. An empty frame list is a valid outcome, not a
/// failure.
pub fn sync_from_dirs<T>(
    dirs: &[impl AsRef<Path>],
    config: &SyncConfig,
) -> Result<Vec<AlignedFrame<T>>, PipelineError>
where
    T: Scalar + DeserializeOwned,
{
    let streams = load_multicam_observations(dirs, config.detected_only)?;
    let frames = align_streams(&streams, config.empty_policy())?;
    info!(
        "aligned {} cameras into {} synchronized frames",
        dirs.len(),
        frames.len()
    );
    Ok(frames)
}
