//! Error types for packet handling and sealing.

use thiserror::Error;

/// Errors from packet construction and sealing operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// PIN string exceeds the fixed padded width
    #[error("pin too long")]
    PinTooLong,

    /// Keyshare secret does not fit the packet's secret field
    #[error("keyshare secret too large for packet")]
    SecretTooLong,

    /// Unsealing failed; deliberately unspecific
    #[error("invalid keyshare packet")]
    InvalidPacket,

    /// Sealing failed
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Random number generation failed
    #[error("random number generation failed: {0}")]
    RandomGenerationFailed(String),

    /// Two packet keys carry the same version byte
    #[error("duplicate packet key version {0}")]
    DuplicateKeyVersion(u8),

    /// The version marked current has no corresponding key
    #[error("no packet key for current version {0}")]
    UnknownCurrentVersion(u8),
}

/// Result type for packet operations
pub type Result<T> = std::result::Result<T, CryptoError>;
