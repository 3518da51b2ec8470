//! Domain errors.

use thiserror::Error;

/// Validation failures when building value objects from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// The value is empty (or whitespace only)
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// The value exceeds the allowed length
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Errors raised by [`Room`](super::Room) mutators that reject input.
///
/// Everything else on a room is tolerant and never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The room already holds `capacity` players
    #[error("room is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
}

/// Errors raised while pushing messages to connections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No channel is registered for the connection
    #[error("connection '{0}' not found")]
    ClientNotFound(String),

    /// The channel exists but the receiving side is gone
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
