//! Authenticated sealing of keyshare packets under versioned storage keys.
//!
//! Sealed layout: `version (1) || nonce (24) || ciphertext + tag`. The
//! version byte selects the key at unseal time, so the key set can rotate
//! without re-sealing every stored packet; any mutation of a packet re-seals
//! it under the current version.

use crate::{constants::*, errors::*, packet::KeysharePacket};
use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;
use std::collections::HashMap;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A packet storage key tagged with its version byte.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PacketKey {
    version: u8,
    key: [u8; PACKET_KEY_SIZE],
}

impl PacketKey {
    /// Wrap raw key bytes under a version byte.
    ///
    /// # Security
    ///
    /// The input bytes are zeroized after copying into the PacketKey.
    pub fn new(version: u8, mut key: [u8; PACKET_KEY_SIZE]) -> Self {
        let wrapped = Self { version, key };
        key.zeroize();
        wrapped
    }

    /// The version byte this key seals and unseals
    pub fn version(&self) -> u8 {
        self.version
    }

    fn cipher(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new((&self.key).into())
    }
}

/// Seals and unseals keyshare packets under a fixed set of versioned keys.
///
/// The set is immutable after construction; old versions stay
/// decrypt-capable while [`PacketSealer::seal`] always uses the current one.
pub struct PacketSealer {
    keys: HashMap<u8, PacketKey>,
    current: u8,
}

impl PacketSealer {
    /// Build a sealer from a key set and the version to seal under.
    pub fn new(keys: Vec<PacketKey>, current: u8) -> Result<Self> {
        let mut map = HashMap::with_capacity(keys.len());
        for key in keys {
            let version = key.version();
            if map.insert(version, key).is_some() {
                return Err(CryptoError::DuplicateKeyVersion(version));
            }
        }
        if !map.contains_key(&current) {
            return Err(CryptoError::UnknownCurrentVersion(current));
        }
        Ok(Self { keys: map, current })
    }

    /// The version byte new seals are produced under
    pub fn current_version(&self) -> u8 {
        self.current
    }

    /// Seal a packet under the current key version.
    pub fn seal(&self, packet: &KeysharePacket) -> Result<Vec<u8>> {
        let key = self
            .keys
            .get(&self.current)
            .ok_or_else(|| CryptoError::EncryptionFailed("current key missing".to_string()))?;

        let mut nonce = [0u8; NONCE_SIZE];
        rand::thread_rng()
            .try_fill_bytes(&mut nonce)
            .map_err(|e| CryptoError::RandomGenerationFailed(e.to_string()))?;

        let aad = packet_aad(self.current);
        let payload = Payload {
            msg: packet.as_bytes(),
            aad: &aad,
        };
        let ciphertext = key
            .cipher()
            .encrypt(XNonce::from_slice(&nonce), payload)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        let mut sealed = Vec::with_capacity(SEALED_PACKET_SIZE);
        sealed.push(self.current);
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Unseal a packet, authenticating it against the version it names.
    ///
    /// Truncated input, an unknown version byte, and tag failure all return
    /// the same [`CryptoError::InvalidPacket`].
    pub fn unseal(&self, sealed: &[u8]) -> Result<KeysharePacket> {
        if sealed.len() != SEALED_PACKET_SIZE {
            return Err(CryptoError::InvalidPacket);
        }
        let version = sealed[0];
        let key = self.keys.get(&version).ok_or(CryptoError::InvalidPacket)?;

        let nonce = &sealed[1..1 + NONCE_SIZE];
        let aad = packet_aad(version);
        let payload = Payload {
            msg: &sealed[1 + NONCE_SIZE..],
            aad: &aad,
        };
        let mut plaintext = key
            .cipher()
            .decrypt(XNonce::from_slice(nonce), payload)
            .map_err(|_| CryptoError::InvalidPacket)?;

        let packet = KeysharePacket::from_bytes(&plaintext);
        plaintext.zeroize();
        packet
    }
}

fn packet_aad(version: u8) -> Vec<u8> {
    let mut aad = Vec::with_capacity(PACKET_AAD_PREFIX.len() + 1);
    aad.extend_from_slice(PACKET_AAD_PREFIX.as_bytes());
    aad.push(version);
    aad
}
