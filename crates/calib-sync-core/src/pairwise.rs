//! Two-stream merge-join alignment.

use log::debug;
use nalgebra::Scalar;

use crate::error::SyncError;
use crate::frame::{AlignedFrame, EmptyPolicy};
use crate::intersect::intersect_group;
use crate::observation::Observation;

/// Align two ascending-timestamp observation streams into synchronized
/// frames.
///
/// Classic two-pointer merge-join: the cursor at the smaller timestamp
/// advances; on equal timestamps the pair is intersected, both cursors
/// advance, and a frame is emitted subject to `policy`. Stops as soon as
/// either stream runs out.
///
/// Guarantees: output timestamps strictly increasing, output length at most
/// `min(|seq_a|, |seq_b|)`, and no timestamp appears unless present in both
/// inputs. Streams with no temporal overlap yield `Ok(vec![])`.
///
/// # Errors
///
/// Fails if either stream contains an invalid observation or is not
/// strictly ascending in timestamp.
pub fn align_pair<T: Scalar>(
    seq_a: &[Observation<T>],
    seq_b: &[Observation<T>],
    policy: EmptyPolicy,
) -> Result<Vec<AlignedFrame<T>>, SyncError> {
    validate_stream(0, seq_a)?;
    validate_stream(1, seq_b)?;

    let mut frames = Vec::new();
    let mut ia = 0;
    let mut ib = 0;

    while ia < seq_a.len() && ib < seq_b.len() {
        let a = &seq_a[ia];
        let b = &seq_b[ib];
        if a.timestamp < b.timestamp {
            ia += 1;
        } else if b.timestamp < a.timestamp {
            ib += 1;
        } else {
            let common = intersect_group(&[a, b])?;
            if let Some(frame) = AlignedFrame::from_common(a.timestamp, common, policy) {
                frames.push(frame);
            }
            ia += 1;
            ib += 1;
        }
    }

    debug!(
        "pairwise alignment: {} + {} observations -> {} frames",
        seq_a.len(),
        seq_b.len(),
        frames.len()
    );
    Ok(frames)
}

/// Check the loader contract on one stream: valid observations, strictly
/// increasing timestamps.
pub(crate) fn validate_stream<T: Scalar>(
    camera: usize,
    stream: &[Observation<T>],
) -> Result<(), SyncError> {
    let mut prev: Option<u64> = None;
    for obs in stream {
        obs.validate()?;
        if prev.is_some_and(|p| obs.timestamp <= p) {
            return Err(SyncError::UnsortedStream {
                camera,
                timestamp: obs.timestamp,
            });
        }
        prev = Some(obs.timestamp);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{Correspondence, CORNERS_PER_MARKER};
    use nalgebra::{Point2, Point3};

    fn obs(camera: usize, timestamp: u64, ids: &[u32]) -> Observation {
        let mut corners = Vec::new();
        for &id in ids {
            for k in 0..CORNERS_PER_MARKER {
                corners.push(Correspondence {
                    image: Point2::new(id as f64 * 10.0 + k as f64, timestamp as f64),
                    target: Point3::new(id as f64, k as f64, 0.0),
                });
            }
        }
        Observation::new(camera, timestamp, ids.to_vec(), corners).unwrap()
    }

    fn stream(camera: usize, entries: &[(u64, &[u32])]) -> Vec<Observation> {
        entries
            .iter()
            .map(|&(ts, ids)| obs(camera, ts, ids))
            .collect()
    }

    #[test]
    fn identity_streams_align_fully() {
        let a = stream(0, &[(1, &[10, 20]), (2, &[10, 20]), (3, &[10, 20])]);
        let b = stream(1, &[(1, &[10, 20]), (2, &[10, 20]), (3, &[10, 20])]);
        let frames = align_pair(&a, &b, EmptyPolicy::Drop).unwrap();
        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.timestamp, (i + 1) as u64);
            assert_eq!(frame.marker_ids(), &[10, 20]);
            // corner correspondences of each input survive unchanged
            assert_eq!(frame.observations[0].corners, a[i].corners);
            assert_eq!(frame.observations[1].corners, b[i].corners);
        }
    }

    #[test]
    fn skips_timestamps_missing_from_one_side() {
        let a = stream(0, &[(1, &[1]), (2, &[1]), (3, &[1])]);
        let b = stream(1, &[(1, &[1]), (2, &[1]), (4, &[1])]);
        let frames = align_pair(&a, &b, EmptyPolicy::Drop).unwrap();
        let timestamps: Vec<u64> = frames.iter().map(|f| f.timestamp).collect();
        assert_eq!(timestamps, vec![1, 2]);
    }

    #[test]
    fn empty_policy_is_respected() {
        let a = stream(0, &[(1, &[1, 2])]);
        let b = stream(1, &[(1, &[3, 4])]);
        let dropped = align_pair(&a, &b, EmptyPolicy::Drop).unwrap();
        assert!(dropped.is_empty());
        let kept = align_pair(&a, &b, EmptyPolicy::Keep).unwrap();
        assert_eq!(kept.len(), 1);
        assert!(kept[0].is_empty());
        assert_eq!(kept[0].num_cameras(), 2);
    }

    #[test]
    fn no_overlap_is_not_an_error() {
        let a = stream(0, &[(1, &[1]), (2, &[1])]);
        let b = stream(1, &[(5, &[1]), (6, &[1])]);
        let frames = align_pair(&a, &b, EmptyPolicy::Keep).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn output_bounded_by_shorter_stream() {
        let a = stream(0, &[(1, &[1]), (2, &[1]), (3, &[1]), (4, &[1])]);
        let b = stream(1, &[(2, &[1])]);
        let frames = align_pair(&a, &b, EmptyPolicy::Keep).unwrap();
        assert!(frames.len() <= b.len());
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].timestamp, 2);
    }

    #[test]
    fn rejects_unsorted_stream() {
        let a = vec![obs(0, 2, &[1]), obs(0, 1, &[1])];
        let b = stream(1, &[(1, &[1])]);
        assert!(matches!(
            align_pair(&a, &b, EmptyPolicy::Drop),
            Err(SyncError::UnsortedStream {
                camera: 0,
                timestamp: 1
            })
        ));
    }
}
