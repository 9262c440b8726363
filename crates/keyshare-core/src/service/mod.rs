//! The keyshare engine implementation.

mod lifecycle;
mod proofs;
mod tokens;

use crate::{errors::*, types::*};
use keyshare_crypto::{PacketKey, PacketSealer};
use num_bigint::BigUint;
use std::collections::HashMap;
use std::sync::Mutex;

/// Issuer claim stamped into every token this engine signs.
pub(crate) const TOKEN_ISSUER: &str = "keyshare_server";

/// Subject claim of access tokens.
pub(crate) const ACCESS_TOKEN_SUBJECT: &str = "auth_tok";

/// Subject claim of proof response tokens.
pub(crate) const RESPONSE_TOKEN_SUBJECT: &str = "ProofP";

/// Access token lifetime in seconds (3 minutes).
pub(crate) const ACCESS_TOKEN_TTL: u64 = 180;

/// The keyshare server cryptographic engine.
///
/// Constructed once from its key material and trusted-key registry, then
/// shared by reference across request handlers. Everything except the
/// commitment store is immutable after construction, so concurrent readers
/// need no synchronization; the commitment store is guarded by a single
/// mutex whose critical sections are one map operation each.
pub struct KeyshareCore {
    pub(crate) signing_key: SigningKey,
    pub(crate) sealer: PacketSealer,
    pub(crate) trusted_keys: TrustedKeys,
    commitments: Mutex<HashMap<u64, BigUint>>,
}

impl KeyshareCore {
    /// Construct an engine.
    ///
    /// Consumes the RS256 signing key, the versioned packet key set with
    /// the version new seals use, and the registry of trusted issuer
    /// public keys. None of these can be changed afterwards.
    pub fn new(
        signing_key: SigningKey,
        packet_keys: Vec<PacketKey>,
        current_version: u8,
        trusted_keys: TrustedKeys,
    ) -> Result<Self> {
        let sealer = PacketSealer::new(packet_keys, current_version)?;
        Ok(Self {
            signing_key,
            sealer,
            trusted_keys,
            commitments: Mutex::new(HashMap::new()),
        })
    }

    /// The registry of trusted issuer public keys
    pub fn trusted_keys(&self) -> &TrustedKeys {
        &self.trusted_keys
    }

    /// The `kid` this engine stamps into token headers
    pub fn signing_key_id(&self) -> &str {
        self.signing_key.kid()
    }

    /// Retain a commit secret until the verifier's challenge arrives.
    pub(crate) fn store_commitment(&self, commit_id: u64, commit_secret: BigUint) {
        self.lock_commitments().insert(commit_id, commit_secret);
    }

    /// Atomically fetch and remove a commit secret. Single use: a second
    /// take of the same id returns `None`.
    pub(crate) fn take_commitment(&self, commit_id: u64) -> Option<BigUint> {
        self.lock_commitments().remove(&commit_id)
    }

    fn lock_commitments(&self) -> std::sync::MutexGuard<'_, HashMap<u64, BigUint>> {
        // A poisoned lock cannot leave the map inconsistent: the guarded
        // operations are single map calls.
        self.commitments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
