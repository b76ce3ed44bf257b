//! Common-marker intersection across a group of observations.

use nalgebra::Scalar;

use crate::error::SyncError;
use crate::observation::Observation;

/// Reduce `k >= 2` observations sharing one timestamp to their common
/// marker subset.
///
/// Runs a rolling-minimum sweep over the `k` sorted id lists: every id
/// where all cursors agree is kept, otherwise only the cursors at the
/// current minimum advance. Cost is O(sum of id-list lengths). Returns `k`
/// new observations restricted to the common ids (ascending), with corners
/// re-indexed four per marker; inputs are never mutated.
///
/// An empty common subset is returned as an empty result, not an error;
/// whether such a group still becomes a frame is the caller's
/// [`EmptyPolicy`](crate::EmptyPolicy) decision.
///
/// # Errors
///
/// Fails if the group has fewer than two members, the timestamps disagree,
/// or any observation violates its structural invariants.
pub fn intersect_group<T: Scalar>(
    group: &[&Observation<T>],
) -> Result<Vec<Observation<T>>, SyncError> {
    if group.len() < 2 {
        return Err(SyncError::GroupTooSmall(group.len()));
    }
    let timestamp = group[0].timestamp;
    for obs in group {
        obs.validate()?;
        if obs.timestamp != timestamp {
            return Err(SyncError::TimestampMismatch {
                expected: timestamp,
                found: obs.timestamp,
            });
        }
    }

    let mut cursors = vec![0usize; group.len()];
    let mut picks: Vec<Vec<usize>> = vec![Vec::new(); group.len()];

    'sweep: loop {
        // Any exhausted list ends the sweep; find the rolling minimum.
        let mut min_id = u32::MAX;
        for (obs, &cursor) in group.iter().zip(&cursors) {
            match obs.marker_ids.get(cursor) {
                Some(&id) => min_id = min_id.min(id),
                None => break 'sweep,
            }
        }

        let agreed = group
            .iter()
            .zip(&cursors)
            .all(|(obs, &cursor)| obs.marker_ids[cursor] == min_id);

        if agreed {
            for (k, cursor) in cursors.iter_mut().enumerate() {
                picks[k].push(*cursor);
                *cursor += 1;
            }
        } else {
            for (k, obs) in group.iter().enumerate() {
                if obs.marker_ids[cursors[k]] == min_id {
                    cursors[k] += 1;
                }
            }
        }
    }

    Ok(group
        .iter()
        .zip(&picks)
        .map(|(obs, positions)| obs.restricted(positions))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{Correspondence, CORNERS_PER_MARKER};
    use approx::assert_relative_eq;
    use nalgebra::{Point2, Point3};

    fn obs(camera: usize, timestamp: u64, ids: &[u32]) -> Observation {
        let mut corners = Vec::new();
        for &id in ids {
            for k in 0..CORNERS_PER_MARKER {
                corners.push(Correspondence {
                    image: Point2::new(
                        camera as f64 * 1000.0 + id as f64 * 10.0 + k as f64,
                        id as f64,
                    ),
                    target: Point3::new(id as f64, k as f64, 0.0),
                });
            }
        }
        Observation::new(camera, timestamp, ids.to_vec(), corners).unwrap()
    }

    #[test]
    fn identical_inputs_are_returned_unchanged() {
        let a = obs(0, 5, &[1, 2, 9]);
        let b = obs(1, 5, &[1, 2, 9]);
        let out = intersect_group(&[&a, &b]).unwrap();
        assert_eq!(out[0], a);
        assert_eq!(out[1], b);
    }

    #[test]
    fn self_intersection_is_idempotent() {
        let a = obs(0, 5, &[3, 6, 11]);
        let out = intersect_group(&[&a, &a]).unwrap();
        assert_eq!(out[0], a);
        assert_eq!(out[1], a);
    }

    #[test]
    fn keeps_only_common_ids_across_three() {
        let a = obs(0, 5, &[1, 2, 5, 8]);
        let b = obs(1, 5, &[2, 3, 5, 9]);
        let c = obs(2, 5, &[0, 2, 5]);
        let out = intersect_group(&[&a, &b, &c]).unwrap();
        for (restricted, source) in out.iter().zip([&a, &b, &c]) {
            assert_eq!(restricted.marker_ids, vec![2, 5]);
            assert_eq!(restricted.camera_index, source.camera_index);
            // corners travel with their marker
            let pos = source.marker_ids.iter().position(|&id| id == 5).unwrap();
            for (kept, orig) in restricted
                .marker_corners(1)
                .iter()
                .zip(source.marker_corners(pos))
            {
                assert_relative_eq!(kept.image.x, orig.image.x);
                assert_relative_eq!(kept.image.y, orig.image.y);
                assert_relative_eq!(kept.target.x, orig.target.x);
            }
        }
    }

    #[test]
    fn disjoint_sets_give_empty_result() {
        let a = obs(0, 5, &[1, 3]);
        let b = obs(1, 5, &[2, 4]);
        let out = intersect_group(&[&a, &b]).unwrap();
        assert!(out[0].is_empty());
        assert!(out[1].is_empty());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = obs(0, 5, &[1, 2]);
        let b = obs(1, 5, &[2, 3]);
        let before = (a.clone(), b.clone());
        let _ = intersect_group(&[&a, &b]).unwrap();
        assert_eq!((a, b), before);
    }

    #[test]
    fn rejects_small_group() {
        let a = obs(0, 5, &[1]);
        assert!(matches!(
            intersect_group(&[&a]),
            Err(SyncError::GroupTooSmall(1))
        ));
    }

    #[test]
    fn rejects_mixed_timestamps() {
        let a = obs(0, 5, &[1]);
        let b = obs(1, 6, &[1]);
        assert!(matches!(
            intersect_group(&[&a, &b]),
            Err(SyncError::TimestampMismatch {
                expected: 5,
                found: 6
            })
        ));
    }

    #[test]
    fn rejects_invalid_observation() {
        let a = obs(0, 5, &[1, 2]);
        let mut bad = obs(1, 5, &[1, 2]);
        bad.marker_ids = vec![2, 1];
        assert!(matches!(
            intersect_group(&[&a, &bad]),
            Err(SyncError::InvalidObservation(_))
        ));
    }
}
