//! Temporal alignment of multi-camera calibration observations.
//!
//! Each camera independently produces a time-sorted sequence of
//! [`Observation`]s (fiducial markers detected on a calibration target).
//! This crate joins those sequences into [`AlignedFrame`]s: for every
//! timestamp simultaneously reached by all streams, the observations are
//! reduced to the marker subset every camera saw. Loading records from
//! disk lives in `calib-sync-io`; detection, projection models and the
//! calibration solver are out of scope entirely.
//!
//! The core is purely sequential and performs no I/O. Point coordinates
//! are generic over a scalar type (default `f64`).

mod error;
mod frame;
mod intersect;
mod logger;
mod multiway;
mod observation;
mod pairwise;

pub use error::SyncError;
pub use frame::{AlignedFrame, EmptyPolicy};
pub use intersect::intersect_group;
pub use multiway::align_streams;
pub use observation::{Correspondence, Observation, ObservationError, CORNERS_PER_MARKER};
pub use pairwise::align_pair;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
