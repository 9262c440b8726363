//! The closed error taxonomy of the keyshare engine.
//!
//! Callers map these to protocol responses; the engine never exposes finer
//! reasons within a category, so failure modes cannot be used as an
//! oracle. In particular every token defect is [`CoreError::InvalidJwt`]
//! and every decryption defect is [`CoreError::InvalidPacket`].

use keyshare_crypto::CryptoError;
use keyshare_idemix::IdemixError;
use thiserror::Error;

/// Errors surfaced to callers of the keyshare engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// PIN string exceeds the fixed padded width
    #[error("pin too long")]
    PinTooLong,

    /// PIN hash mismatch
    #[error("invalid pin")]
    InvalidPin,

    /// Challenge negative or wider than the parameter set allows
    #[error("challenge out of bounds")]
    InvalidChallenge,

    /// Any access or response token defect
    #[error("invalid jwt token")]
    InvalidJwt,

    /// Packet decryption failed
    #[error("invalid keyshare packet")]
    InvalidPacket,

    /// Unknown Idemix public key identifier
    #[error("public key not found")]
    KeyNotFound,

    /// Commit id absent from the commitment store
    #[error("unknown commit id")]
    UnknownCommit,

    /// Non-retryable internal failure (RNG or Idemix oracle)
    #[error("internal failure")]
    Internal,
}

impl CoreError {
    /// Collapse an internal failure, recording the cause for operators
    /// without exposing it to callers.
    pub(crate) fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "keyshare engine internal failure");
        CoreError::Internal
    }
}

impl From<CryptoError> for CoreError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::PinTooLong => CoreError::PinTooLong,
            CryptoError::InvalidPacket => CoreError::InvalidPacket,
            other => CoreError::internal(other),
        }
    }
}

impl From<IdemixError> for CoreError {
    fn from(err: IdemixError) -> Self {
        CoreError::internal(err)
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, CoreError>;
