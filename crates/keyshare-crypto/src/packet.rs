//! The fixed-layout unencrypted keyshare packet.

use crate::{constants::*, errors::*, pin::PaddedPin};
use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A decrypted keyshare packet: `pin_hash || secret || id`.
///
/// Instances exist only transiently inside engine calls; the type zeroizes
/// itself on drop and the field accessors are the only mutation surface.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeysharePacket([u8; PACKET_SIZE]);

impl Default for KeysharePacket {
    fn default() -> Self {
        Self([0u8; PACKET_SIZE])
    }
}

impl KeysharePacket {
    /// Reconstruct a packet from decrypted bytes.
    ///
    /// The input must be exactly [`PACKET_SIZE`] bytes; anything else is
    /// rejected as [`CryptoError::InvalidPacket`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; PACKET_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidPacket)?;
        Ok(Self(raw))
    }

    /// The raw packet bytes, exactly as sealed
    pub fn as_bytes(&self) -> &[u8; PACKET_SIZE] {
        &self.0
    }

    /// The zero-padded PIN field
    pub fn pin(&self) -> &[u8] {
        &self.0[..PIN_SIZE]
    }

    /// Overwrite the PIN field
    pub fn set_pin(&mut self, pin: &PaddedPin) {
        self.0[..PIN_SIZE].copy_from_slice(pin.as_bytes());
    }

    /// The keyshare secret, decoded from its big-endian fixed-width field
    pub fn secret(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0[PIN_SIZE..PIN_SIZE + SECRET_SIZE])
    }

    /// Write the keyshare secret big-endian, left-padded with zero bytes.
    ///
    /// Fails with [`CryptoError::SecretTooLong`] when the integer does not
    /// fit the field.
    pub fn set_secret(&mut self, secret: &BigUint) -> Result<()> {
        let mut bytes = secret.to_bytes_be();
        if bytes.len() > SECRET_SIZE {
            bytes.zeroize();
            return Err(CryptoError::SecretTooLong);
        }
        let field = &mut self.0[PIN_SIZE..PIN_SIZE + SECRET_SIZE];
        field.fill(0);
        field[SECRET_SIZE - bytes.len()..].copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(())
    }

    /// The packet-instance id
    pub fn id(&self) -> &[u8] {
        &self.0[PIN_SIZE + SECRET_SIZE..]
    }

    /// Overwrite the packet-instance id
    pub fn set_id(&mut self, id: [u8; ID_SIZE]) {
        self.0[PIN_SIZE + SECRET_SIZE..].copy_from_slice(&id);
    }
}
