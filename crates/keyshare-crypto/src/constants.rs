//! Sizes and domain strings of the keyshare packet formats.
//!
//! The sealed form is persisted by callers and must stay stable across
//! releases; none of these values may change without a new version byte.

/// Width of the zero-padded PIN field in bytes.
pub const PIN_SIZE: usize = 64;

/// Width of the big-endian keyshare secret field in bytes.
pub const SECRET_SIZE: usize = 64;

/// Width of the packet-instance id in bytes.
pub const ID_SIZE: usize = 32;

/// Total size of an unencrypted keyshare packet.
pub const PACKET_SIZE: usize = PIN_SIZE + SECRET_SIZE + ID_SIZE;

/// Size of a packet storage key in bytes (256 bits).
pub const PACKET_KEY_SIZE: usize = 32;

/// Size of XChaCha20-Poly1305 nonces in bytes (192 bits).
pub const NONCE_SIZE: usize = 24;

/// Size of XChaCha20-Poly1305 authentication tags in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// Total size of a sealed packet: `version || nonce || ciphertext || tag`.
pub const SEALED_PACKET_SIZE: usize = 1 + NONCE_SIZE + PACKET_SIZE + TAG_SIZE;

/// Domain separation prefix authenticated alongside every sealed packet.
/// Format: "keyshare:packet:v1" || key version byte
pub const PACKET_AAD_PREFIX: &str = "keyshare:packet:v1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_sizes_are_fixed() {
        assert_eq!(PACKET_SIZE, 160);
        assert_eq!(SEALED_PACKET_SIZE, 201);
    }
}
