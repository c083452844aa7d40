use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures are reported as exactly one of `Malformed`,
/// `InvalidSignature` or `Expired`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("token is malformed")]
    Malformed,

    #[error("signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,
}
