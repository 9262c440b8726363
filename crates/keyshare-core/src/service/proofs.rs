//! Proof-of-knowledge participation: commitment sampling and response
//! signing.

use super::{KeyshareCore, RESPONSE_TOKEN_SUBJECT, TOKEN_ISSUER};
use crate::{errors::*, types::*};
use keyshare_idemix::{keyshare_response, new_keyshare_commitments, ProofPCommitment, BASE_PARAMETERS};
use num_bigint::{BigInt, Sign};
use rand::RngCore;
use tracing::debug;

impl KeyshareCore {
    /// Sample keyshare commitments for the given issuer public keys.
    ///
    /// The whole request fails with [`CoreError::KeyNotFound`] if any key
    /// id is untrusted. The access token is verified even though the PIN
    /// was validated earlier: tokens time-bound authority. The returned
    /// commit id references the retained commit secret and is valid for
    /// exactly one response.
    pub fn generate_commitments(
        &self,
        ep: &EncryptedKeysharePacket,
        access_token: &str,
        key_ids: &[PublicKeyIdentifier],
    ) -> Result<(Vec<ProofPCommitment>, u64)> {
        let mut keys = Vec::with_capacity(key_ids.len());
        for key_id in key_ids {
            keys.push(self.trusted_keys.get(key_id)?);
        }

        let packet = self.verify_access(ep, access_token)?;
        let (commit_secret, commitments) =
            new_keyshare_commitments(&packet.secret(), &keys, &mut rand::thread_rng())?;

        let commit_id = self.fresh_commit_id()?;
        self.store_commitment(commit_id, commit_secret);
        debug!(commit_id, keys = key_ids.len(), "stored keyshare commitment");

        Ok((commitments, commit_id))
    }

    /// Consume a stored commitment and sign the response for a verifier
    /// challenge.
    ///
    /// The challenge bounds are enforced before any secret is touched.
    /// The commit record is removed whether or not the rest succeeds;
    /// replaying a commit id yields [`CoreError::UnknownCommit`], so a
    /// second, chosen challenge can never reuse the same randomness.
    pub fn generate_response(
        &self,
        ep: &EncryptedKeysharePacket,
        access_token: &str,
        commit_id: u64,
        challenge: &BigInt,
        key_id: &PublicKeyIdentifier,
    ) -> Result<String> {
        if challenge.sign() == Sign::Minus || challenge.bits() > u64::from(BASE_PARAMETERS.l_h) {
            return Err(CoreError::InvalidChallenge);
        }
        let key = self.trusted_keys.get(key_id)?;
        let packet = self.verify_access(ep, access_token)?;

        let commit_secret = self
            .take_commitment(commit_id)
            .ok_or(CoreError::UnknownCommit)?;
        debug!(commit_id, "consumed keyshare commitment");

        let proof = keyshare_response(
            &packet.secret(),
            &commit_secret,
            challenge.magnitude(),
            key,
        )?;
        let claims = ProofClaims {
            iss: TOKEN_ISSUER.to_string(),
            sub: RESPONSE_TOKEN_SUBJECT.to_string(),
            iat: current_timestamp(),
            proof_p: proof,
        };
        self.sign_claims(&claims)
    }

    fn fresh_commit_id(&self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        rand::thread_rng()
            .try_fill_bytes(&mut bytes)
            .map_err(CoreError::internal)?;
        Ok(u64::from_le_bytes(bytes))
    }
}
