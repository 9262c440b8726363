//! # keyshare-core
//!
//! The keyshare server cryptographic engine. Client wallets split their
//! Idemix master secret into a user-held share and a server-held share;
//! this crate is the custodian of the server-held shares and the arbiter
//! of authenticated access to them:
//!
//! - at-rest confidentiality and integrity of each user's keyshare packet
//! - PIN authentication producing short-lived RS256 access tokens bound to
//!   the packet instance
//! - PIN rotation that preserves the secret while killing outstanding
//!   tokens
//! - commit/response participation in proofs of knowledge of the combined
//!   secret
//!
//! Transport, persistence of the encrypted packets, and account tooling
//! are external collaborators. Every public operation is reentrant and
//! thread-safe; the only lock in the engine guards the in-memory
//! commitment store.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod errors;
mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use errors::{CoreError, Result};
pub use service::KeyshareCore;
pub use types::*;

// The oracle types callers exchange with the engine.
pub use keyshare_idemix::{ProofP, ProofPCommitment, PublicKey};
