//! Per-camera marker observations.
//!
//! An [`Observation`] is the unit of input for the aligners: everything one
//! camera detected on the calibration target at a single instant. Detection
//! itself happens upstream; this crate only consumes the result.

use nalgebra::{Point2, Point3, Scalar};
use serde::{Deserialize, Serialize};

/// Number of corner correspondences contributed by each marker.
pub const CORNERS_PER_MARKER: usize = 4;

/// A measured image point paired with its reference point on the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correspondence<T: Scalar = f64> {
    /// Detected corner position in image pixels.
    pub image: Point2<T>,
    /// Known corner position on the calibration target.
    pub target: Point3<T>,
}

/// Structural invariant violations of an [`Observation`].
#[derive(thiserror::Error, Debug)]
pub enum ObservationError {
    #[error("marker ids not strictly ascending at index {index}")]
    UnsortedMarkerIds { index: usize },
    #[error("corner count {corners} does not match {} x {markers} markers", CORNERS_PER_MARKER)]
    CornerCountMismatch { markers: usize, corners: usize },
}

/// One camera's detection result at one instant.
///
/// Invariants, enforced by [`Observation::new`] and re-checked by
/// [`Observation::validate`]:
/// - `marker_ids` is strictly ascending (unique ids),
/// - `corners.len() == CORNERS_PER_MARKER * marker_ids.len()`, co-indexed
///   with `marker_ids` in groups of four.
///
/// Observations are immutable once built; the aligners return restricted
/// copies instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation<T: Scalar = f64> {
    /// Index of the camera that produced this observation.
    pub camera_index: usize,
    /// Capture instant in nanoseconds.
    pub timestamp: u64,
    /// Detected marker ids, strictly ascending.
    pub marker_ids: Vec<u32>,
    /// Corner correspondences, four per marker.
    pub corners: Vec<Correspondence<T>>,
}

impl<T: Scalar> Observation<T> {
    /// Build a validated observation.
    ///
    /// # Errors
    ///
    /// Returns an error if `marker_ids` is not strictly ascending or the
    /// corner count does not match the marker count.
    pub fn new(
        camera_index: usize,
        timestamp: u64,
        marker_ids: Vec<u32>,
        corners: Vec<Correspondence<T>>,
    ) -> Result<Self, ObservationError> {
        let obs = Self {
            camera_index,
            timestamp,
            marker_ids,
            corners,
        };
        obs.validate()?;
        Ok(obs)
    }

    /// Re-check the structural invariants.
    ///
    /// The aligners call this on every input before producing any frame:
    /// a violated invariant here would corrupt every downstream frame
    /// undetectably, so it is a fatal precondition failure.
    pub fn validate(&self) -> Result<(), ObservationError> {
        for (index, pair) in self.marker_ids.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ObservationError::UnsortedMarkerIds { index: index + 1 });
            }
        }
        let expected = self.marker_ids.len() * CORNERS_PER_MARKER;
        if self.corners.len() != expected {
            return Err(ObservationError::CornerCountMismatch {
                markers: self.marker_ids.len(),
                corners: self.corners.len(),
            });
        }
        Ok(())
    }

    /// Number of detected markers.
    #[inline]
    pub fn num_markers(&self) -> usize {
        self.marker_ids.len()
    }

    /// Returns true if nothing was detected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marker_ids.is_empty()
    }

    /// Corner correspondences of the marker at `position` in `marker_ids`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    #[inline]
    pub fn marker_corners(&self, position: usize) -> &[Correspondence<T>] {
        let start = position * CORNERS_PER_MARKER;
        &self.corners[start..start + CORNERS_PER_MARKER]
    }

    /// Copy of this observation restricted to the markers at the given
    /// positions, corners re-indexed to match.
    ///
    /// `positions` must be ascending indices into `marker_ids`; the result
    /// then satisfies the same invariants as the source.
    pub(crate) fn restricted(&self, positions: &[usize]) -> Self {
        let marker_ids = positions.iter().map(|&p| self.marker_ids[p]).collect();
        let mut corners = Vec::with_capacity(positions.len() * CORNERS_PER_MARKER);
        for &p in positions {
            corners.extend_from_slice(self.marker_corners(p));
        }
        Self {
            camera_index: self.camera_index,
            timestamp: self.timestamp,
            marker_ids,
            corners,
        }
    }
}
