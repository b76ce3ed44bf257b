use crate::observation::ObservationError;

/// Precondition failures of the intersection and alignment entry points.
///
/// None of these are recoverable mid-run: the aligners check their inputs
/// up front and fail before producing any frame.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("intersection needs at least two observations, got {0}")]
    GroupTooSmall(usize),
    #[error("alignment needs at least two streams, got {0}")]
    TooFewStreams(usize),
    #[error("mixed timestamps in intersection group: {expected} vs {found}")]
    TimestampMismatch { expected: u64, found: u64 },
    #[error("stream {camera}: timestamps not strictly increasing at {timestamp}")]
    UnsortedStream { camera: usize, timestamp: u64 },
    #[error(transparent)]
    InvalidObservation(#[from] ObservationError),
}
