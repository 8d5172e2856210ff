use thiserror::Error;

/// Error type for JWT operations.
///
/// `Malformed` and `Expired` are kept apart for logging; request guards
/// collapse both into a single unauthenticated outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,
}
