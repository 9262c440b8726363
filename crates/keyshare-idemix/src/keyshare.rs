//! The keyshare oracle operations.

use crate::{
    errors::*,
    keys::PublicKey,
    params::BASE_PARAMETERS,
    proofs::{ProofP, ProofPCommitment},
};
use num_bigint::BigUint;
use rand::RngCore;
use zeroize::Zeroize;

/// Draw a fresh server-side keyshare secret.
///
/// One bit shorter than `l_m`: the value is added to an equally sized
/// client share and the combined secret must still fit `l_m` bits.
pub fn new_keyshare_secret<R: RngCore>(rng: &mut R) -> Result<BigUint> {
    random_below_pow2(rng, BASE_PARAMETERS.l_m - 1)
}

/// Draw commit randomness and exponentiate it under every requested key.
///
/// Returns the commit randomness `w` (to be retained until the response)
/// and, per key, `P = R[0]^secret mod n` with `Pcommit = R[0]^w mod n`.
pub fn new_keyshare_commitments<R: RngCore>(
    secret: &BigUint,
    keys: &[&PublicKey],
    rng: &mut R,
) -> Result<(BigUint, Vec<ProofPCommitment>)> {
    let commit = random_below_pow2(rng, BASE_PARAMETERS.l_m_commit())?;

    let mut commitments = Vec::with_capacity(keys.len());
    for key in keys {
        let base = key.keyshare_base()?;
        commitments.push(ProofPCommitment {
            p: base.modpow(secret, &key.n),
            p_commit: base.modpow(&commit, &key.n),
        });
    }
    Ok((commit, commitments))
}

/// Compute the server response for a challenge received from the verifier.
///
/// The response exponent `w + c * secret` is deliberately left unreduced;
/// the statistical margin in the commit length hides the secret.
pub fn keyshare_response(
    secret: &BigUint,
    commit: &BigUint,
    challenge: &BigUint,
    key: &PublicKey,
) -> Result<ProofP> {
    let base = key.keyshare_base()?;
    Ok(ProofP {
        p: base.modpow(secret, &key.n),
        s_response: commit + challenge * secret,
    })
}

/// Uniform value below `2^bits`, read from the system CSPRNG.
fn random_below_pow2<R: RngCore>(rng: &mut R, bits: u32) -> Result<BigUint> {
    let nbytes = ((bits + 7) / 8) as usize;
    let mut buf = vec![0u8; nbytes];
    rng.try_fill_bytes(&mut buf)
        .map_err(|e| IdemixError::RandomGenerationFailed(e.to_string()))?;

    let excess = nbytes as u32 * 8 - bits;
    if excess > 0 {
        buf[0] &= 0xff >> excess;
    }
    let value = BigUint::from_bytes_be(&buf);
    buf.zeroize();
    Ok(value)
}
