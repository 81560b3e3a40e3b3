use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Failures reported by queue operations.
///
/// Both kinds are expected conditions: an operation that returns one of
/// them has left the queue exactly as it was before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueueError {
    /// Allocating an element slot or its string copy failed.
    AllocationFailure,
    /// The queue handle is absent, or the queue is empty where an element
    /// is required.
    InvalidArgument,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::AllocationFailure => f.write_str("memory allocation failed"),
            QueueError::InvalidArgument => f.write_str("queue is absent or empty"),
        }
    }
}

impl Error for QueueError {}

impl From<TryReserveError> for QueueError {
    fn from(_: TryReserveError) -> Self {
        QueueError::AllocationFailure
    }
}
