//! Error types for the Idemix oracle operations.

use thiserror::Error;

/// Errors from keyshare oracle operations.
#[derive(Debug, Error)]
pub enum IdemixError {
    /// Random number generation failed
    #[error("random number generation failed: {0}")]
    RandomGenerationFailed(String),

    /// Issuer public key carries no attribute bases
    #[error("malformed issuer public key: no attribute bases")]
    MalformedKey,
}

/// Result type for oracle operations
pub type Result<T> = std::result::Result<T, IdemixError>;
