//! PIN padding and constant-time comparison.

use crate::{constants::*, errors::*};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A PIN padded to the fixed width stored inside a keyshare packet.
///
/// The padded value is what packet comparisons operate on. It MUST never be
/// logged or compared with non-constant-time operations.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PaddedPin([u8; PIN_SIZE]);

impl PaddedPin {
    /// Get a reference to the padded bytes
    pub fn as_bytes(&self) -> &[u8; PIN_SIZE] {
        &self.0
    }
}

/// Pad a PIN string to [`PIN_SIZE`] bytes, extending it with zero bytes.
///
/// Fails with [`CryptoError::PinTooLong`] when the UTF-8 encoding of the PIN
/// exceeds the field width.
pub fn pad_pin(pin: &str) -> Result<PaddedPin> {
    let data = pin.as_bytes();
    if data.len() > PIN_SIZE {
        return Err(CryptoError::PinTooLong);
    }
    let mut padded = [0u8; PIN_SIZE];
    padded[..data.len()].copy_from_slice(data);
    Ok(PaddedPin(padded))
}

/// Compare two byte slices in constant time.
///
/// This prevents timing attacks when comparing secrets like PIN hashes or
/// packet ids. Slices of different lengths compare unequal; the length
/// itself is not treated as secret.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
