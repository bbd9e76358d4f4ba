use thiserror::Error;

/// Failure of a single pair-service call. Transport faults, non-success
/// statuses and malformed bodies all land here; every call is a single
/// attempt and every failure is terminal for that attempt.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("pair service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("pair {0} not found")]
    NotFound(i64),
}
