//! Synchronized multi-camera frames and the empty-intersection policy.

use nalgebra::Scalar;
use serde::{Deserialize, Serialize};

use crate::observation::Observation;

/// What to do with a frame whose common marker set came out empty.
///
/// A timestamp can be present in every stream while the cameras saw
/// disjoint marker subsets. Whether such a frame is worth keeping depends
/// on the consumer, so the choice is explicit rather than baked in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Emit the frame with an empty marker set.
    Keep,
    /// Skip the frame entirely.
    #[default]
    Drop,
}

impl From<bool> for EmptyPolicy {
    /// Maps the `keep_empty_intersections` config flag.
    fn from(keep_empty: bool) -> Self {
        if keep_empty {
            EmptyPolicy::Keep
        } else {
            EmptyPolicy::Drop
        }
    }
}

/// N observations synchronized to a shared timestamp and common marker set.
///
/// Invariant: every observation carries `timestamp` and an identical
/// `marker_ids` sequence (same elements, same ascending order). Frames are
/// only constructed by the aligners, which guarantee this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedFrame<T: Scalar = f64> {
    /// Shared capture instant in nanoseconds.
    pub timestamp: u64,
    /// One restricted observation per contributing camera.
    pub observations: Vec<Observation<T>>,
}

impl<T: Scalar> AlignedFrame<T> {
    /// Wrap a group of already-intersected observations, applying `policy`
    /// when the common marker set is empty.
    pub(crate) fn from_common(
        timestamp: u64,
        observations: Vec<Observation<T>>,
        policy: EmptyPolicy,
    ) -> Option<Self> {
        let empty = observations.first().is_none_or(Observation::is_empty);
        if empty && policy == EmptyPolicy::Drop {
            return None;
        }
        Some(Self {
            timestamp,
            observations,
        })
    }

    /// The common marker ids of this frame.
    #[inline]
    pub fn marker_ids(&self) -> &[u32] {
        self.observations
            .first()
            .map_or(&[], |obs| obs.marker_ids.as_slice())
    }

    /// Number of contributing cameras.
    #[inline]
    pub fn num_cameras(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if the common marker set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marker_ids().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_from_config_flag() {
        assert_eq!(EmptyPolicy::from(true), EmptyPolicy::Keep);
        assert_eq!(EmptyPolicy::from(false), EmptyPolicy::Drop);
        assert_eq!(EmptyPolicy::default(), EmptyPolicy::Drop);
    }

    #[test]
    fn drop_policy_discards_empty_group() {
        let obs: Observation = Observation::new(0, 7, vec![], vec![]).unwrap();
        assert!(AlignedFrame::from_common(7, vec![obs.clone()], EmptyPolicy::Drop).is_none());
        let frame = AlignedFrame::from_common(7, vec![obs], EmptyPolicy::Keep).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.num_cameras(), 1);
    }
}
