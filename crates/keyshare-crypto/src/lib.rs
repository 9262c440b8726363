//! # keyshare-crypto
//!
//! At-rest primitives for the keyshare server: the fixed-layout keyshare
//! packet, PIN padding, and authenticated sealing of packets under versioned
//! storage keys.
//!
//! ## Security Properties
//!
//! - Decrypted packets and padded PINs are zeroized on drop
//! - All comparisons of secret material go through [`constant_time_compare`]
//! - Unsealing never reveals why a packet was rejected
//! - No unsafe code

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod errors;
pub mod packet;
pub mod pin;
pub mod sealing;

pub use constants::*;
pub use errors::CryptoError;
pub use packet::KeysharePacket;
pub use pin::{constant_time_compare, pad_pin, PaddedPin};
pub use sealing::{PacketKey, PacketSealer};
