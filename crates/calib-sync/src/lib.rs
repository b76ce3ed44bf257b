//! High-level facade crate for the `calib-sync-*` workspace.
//!
//! Aligns time-stamped fiducial-marker observations from two or more
//! cameras into synchronized frames containing only the markers every
//! camera saw at that instant. Detection, projection models and the
//! downstream calibration solver live elsewhere; this workspace covers the
//! temporal equi-join between them.
//!
//! ## Quickstart
//!
//! ```no_run
//! use calib_sync::{sync_from_dirs, AlignedFrame, SyncConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SyncConfig::default();
//! let frames: Vec<AlignedFrame> =
//!     sync_from_dirs(&["data/cam0", "data/cam1"], &config)?;
//! for frame in &frames {
//!     println!("{}: {} common markers", frame.timestamp, frame.marker_ids().len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `calib_sync::core`: observation and frame types, the intersection and
//!   the pairwise/multiway aligners.
//! - `calib_sync::io`: detection-record format, directory loader, config,
//!   one-shot pipeline.

pub use calib_sync_core as core;
pub use calib_sync_io as io;

pub use calib_sync_core::{
    align_pair, align_streams, intersect_group, AlignedFrame, Correspondence, EmptyPolicy,
    Observation, ObservationError, SyncError, CORNERS_PER_MARKER,
};
pub use calib_sync_io::{
    load_camera_observations, load_multicam_observations, sync_from_dirs, DetectionRecord,
    LoadError, PipelineError, SyncConfig,
};
