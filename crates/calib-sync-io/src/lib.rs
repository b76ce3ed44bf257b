//! Loading of persisted detection records for `calib-sync`.
//!
//! The detector collaborator writes one JSON record per camera image, named
//! by the capture timestamp in decimal nanoseconds. This crate turns such
//! directories into validated, ascending [`Observation`] sequences and
//! offers a one-shot [`sync_from_dirs`] pipeline on top of the core
//! aligners.
//!
//! [`Observation`]: calib_sync_core::Observation

mod config;
mod loader;
mod pipeline;
mod record;

pub use config::SyncConfig;
pub use loader::{load_camera_observations, load_multicam_observations, LoadError};
pub use pipeline::{sync_from_dirs, PipelineError};
pub use record::{DetectionRecord, RecordIoError};
