//! N-stream alignment with a feasibility pre-filter.

use std::collections::BTreeMap;

use log::{debug, trace};
use nalgebra::Scalar;

use crate::error::SyncError;
use crate::frame::{AlignedFrame, EmptyPolicy};
use crate::intersect::intersect_group;
use crate::observation::Observation;
use crate::pairwise::validate_stream;

/// Align `N >= 2` ascending-timestamp observation streams into synchronized
/// frames.
///
/// A timestamp can only become a frame if every stream contains it
/// somewhere, so candidates are first counted across all streams and those
/// short of `N` appearances are skipped without touching any cursor. Each
/// feasible candidate is then driven through a check-ready / advance-stale
/// loop: streams whose cursor sits at a strictly smaller timestamp are
/// stale and get skipped forward until all `N` cursors agree, at which
/// point the group is intersected, every cursor advances, and a frame is
/// emitted subject to `policy`. A cursor running off its stream ends the
/// whole run; remaining candidates are dropped and no error is raised.
///
/// Guarantees: output timestamps strictly increasing, output length at most
/// the shortest stream length, cursors only move forward (no look-ahead,
/// no backtracking).
///
/// # Errors
///
/// Fails if fewer than two streams are given, any observation is invalid,
/// or any stream is not strictly ascending in timestamp.
pub fn align_streams<T: Scalar>(
    streams: &[Vec<Observation<T>>],
    policy: EmptyPolicy,
) -> Result<Vec<AlignedFrame<T>>, SyncError> {
    if streams.len() < 2 {
        return Err(SyncError::TooFewStreams(streams.len()));
    }
    for (camera, stream) in streams.iter().enumerate() {
        validate_stream(camera, stream)?;
    }

    let num_streams = streams.len();

    // Feasibility pre-filter: timestamp -> number of streams containing it
    // anywhere. Ascending iteration comes with the BTreeMap.
    let mut ts_count: BTreeMap<u64, usize> = BTreeMap::new();
    for stream in streams {
        for obs in stream {
            *ts_count.entry(obs.timestamp).or_insert(0) += 1;
        }
    }

    let mut cursors = vec![0usize; num_streams];
    let mut frames = Vec::new();

    'candidates: for (&candidate, &count) in &ts_count {
        if count < num_streams {
            trace!("skipping infeasible timestamp {candidate} (seen by {count}/{num_streams})");
            continue;
        }

        loop {
            // CHECK_READY: does every cursor sit exactly at the candidate?
            let mut all_ready = true;
            for (stream, &cursor) in streams.iter().zip(&cursors) {
                match stream.get(cursor) {
                    Some(obs) if obs.timestamp == candidate => {}
                    Some(_) => all_ready = false,
                    // TERMINATED: a stream is exhausted, drop the rest.
                    None => break 'candidates,
                }
            }

            if all_ready {
                // EMIT_AND_ADVANCE
                let group: Vec<&Observation<T>> = streams
                    .iter()
                    .zip(&cursors)
                    .map(|(stream, &cursor)| &stream[cursor])
                    .collect();
                let common = intersect_group(&group)?;
                for cursor in cursors.iter_mut() {
                    *cursor += 1;
                }
                if let Some(frame) = AlignedFrame::from_common(candidate, common, policy) {
                    frames.push(frame);
                }
                continue 'candidates;
            }

            // ADVANCE_STALE: skip entries that can no longer participate.
            // One pass may not catch every stream up, hence the loop.
            let mut advanced = false;
            for (stream, cursor) in streams.iter().zip(cursors.iter_mut()) {
                match stream.get(*cursor) {
                    Some(obs) if obs.timestamp < candidate => {
                        *cursor += 1;
                        advanced = true;
                    }
                    Some(_) => {}
                    None => break 'candidates,
                }
            }
            if !advanced {
                // A feasible candidate always leaves a stale stream to
                // advance; this bounds the loop no matter the input.
                continue 'candidates;
            }
        }
    }

    debug!(
        "multiway alignment: {} streams, {} candidate timestamps -> {} frames",
        num_streams,
        ts_count.len(),
        frames.len()
    );
    Ok(frames)
}
