//! Keyshare packet lifecycle: generation, PIN validation, PIN change.

use super::KeyshareCore;
use crate::{errors::*, types::*};
use keyshare_crypto::{constant_time_compare, pad_pin, KeysharePacket, PaddedPin, ID_SIZE};
use num_bigint::BigUint;
use rand::RngCore;
use tracing::info;

impl KeyshareCore {
    /// Generate a new keyshare secret, secured with the given PIN.
    ///
    /// Returns the sealed packet for the caller to persist.
    pub fn generate_keyshare_secret(&self, pin: &str) -> Result<EncryptedKeysharePacket> {
        let padded = pad_pin(pin)?;
        let secret = keyshare_idemix::new_keyshare_secret(&mut rand::thread_rng())?;
        let ep = self.seal_new_packet(&padded, &secret)?;
        info!("generated new keyshare packet");
        Ok(ep)
    }

    /// Build a packet around a caller-supplied keyshare secret.
    ///
    /// Exists for recovery and migration tooling only. A caller that can
    /// inject a known secret can later produce proofs for it with nothing
    /// but the PIN, so embedding applications must restrict this to an
    /// administrative capability.
    #[cfg(feature = "dangerous-build")]
    pub fn dangerous_build_keyshare_secret(
        &self,
        pin: &str,
        secret: &BigUint,
    ) -> Result<EncryptedKeysharePacket> {
        let padded = pad_pin(pin)?;
        self.seal_new_packet(&padded, secret)
    }

    /// Check a PIN against a sealed packet and mint an access token for
    /// subsequent operations on it.
    ///
    /// `user_id` is carried in the token claims for the embedding
    /// application; the engine attaches no meaning to it.
    pub fn validate_pin(
        &self,
        ep: &EncryptedKeysharePacket,
        pin: &str,
        user_id: &str,
    ) -> Result<String> {
        let padded = pad_pin(pin)?;
        let packet = self.sealer.unseal(ep.as_bytes())?;
        if !constant_time_compare(packet.pin(), padded.as_bytes()) {
            return Err(CoreError::InvalidPin);
        }
        self.issue_access_token(&packet, user_id)
    }

    /// Check whether a token currently grants access to the given packet.
    pub fn validate_jwt(&self, ep: &EncryptedKeysharePacket, token: &str) -> Result<()> {
        self.verify_access(ep, token).map(|_| ())
    }

    /// Change the PIN of a packet after validating the old one.
    ///
    /// The packet gets a fresh id and is re-sealed under the current key
    /// version, so every outstanding access token is invalidated.
    pub fn change_pin(
        &self,
        ep: &EncryptedKeysharePacket,
        old_pin: &str,
        new_pin: &str,
    ) -> Result<EncryptedKeysharePacket> {
        let old = pad_pin(old_pin)?;
        let new = pad_pin(new_pin)?;

        let mut packet = self.sealer.unseal(ep.as_bytes())?;
        if !constant_time_compare(packet.pin(), old.as_bytes()) {
            return Err(CoreError::InvalidPin);
        }

        packet.set_pin(&new);
        packet.set_id(self.fresh_packet_id()?);
        let sealed = self.sealer.seal(&packet)?;
        info!("changed pin, packet re-sealed with fresh id");
        Ok(EncryptedKeysharePacket::from(sealed))
    }

    fn seal_new_packet(
        &self,
        pin: &PaddedPin,
        secret: &BigUint,
    ) -> Result<EncryptedKeysharePacket> {
        let mut packet = KeysharePacket::default();
        packet.set_pin(pin);
        packet.set_secret(secret)?;
        packet.set_id(self.fresh_packet_id()?);
        let sealed = self.sealer.seal(&packet)?;
        Ok(EncryptedKeysharePacket::from(sealed))
    }

    fn fresh_packet_id(&self) -> Result<[u8; ID_SIZE]> {
        let mut id = [0u8; ID_SIZE];
        rand::thread_rng()
            .try_fill_bytes(&mut id)
            .map_err(CoreError::internal)?;
        Ok(id)
    }
}
