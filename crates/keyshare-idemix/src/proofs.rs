//! Wire structures for the keyshare proof of knowledge.

use crate::dec;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Commitment pair published by the keyshare server for one issuer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPCommitment {
    /// `R[0]^secret mod n`
    #[serde(rename = "P", with = "dec")]
    pub p: BigUint,
    /// `R[0]^w mod n` for the commit randomness `w`
    #[serde(rename = "Pcommit", with = "dec")]
    pub p_commit: BigUint,
}

/// The server's contribution to a proof of knowledge of the combined
/// secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofP {
    /// `R[0]^secret mod n`
    #[serde(rename = "P", with = "dec")]
    pub p: BigUint,
    /// `w + c * secret`, unreduced
    #[serde(rename = "s_response", with = "dec")]
    pub s_response: BigUint,
}
