//! Idemix issuer public keys.

use crate::{dec, errors::*};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// An Idemix issuer public key.
///
/// The keyshare operations only touch the modulus `n` and the first
/// attribute base `R[0]`; `Z`, `S` and the remaining bases are carried so a
/// full issuer key round-trips intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Modulus
    #[serde(rename = "N", with = "dec")]
    pub n: BigUint,
    /// Generator used for the CL signature
    #[serde(rename = "Z", with = "dec")]
    pub z: BigUint,
    /// Randomizer base
    #[serde(rename = "S", with = "dec")]
    pub s: BigUint,
    /// Attribute bases; `R[0]` is the secret-key base
    #[serde(rename = "R", with = "dec::vec")]
    pub r: Vec<BigUint>,
}

impl PublicKey {
    /// The base the credential secret key lives under.
    pub fn keyshare_base(&self) -> Result<&BigUint> {
        self.r.first().ok_or(IdemixError::MalformedKey)
    }
}
