//! Idemix system parameter sets.

/// Bit lengths of an Idemix parameter set.
///
/// Only the lengths the keyshare operations consult are carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemParameters {
    /// Modulus length
    pub l_n: u32,
    /// Attribute (and secret) length
    pub l_m: u32,
    /// Challenge hash length
    pub l_h: u32,
    /// Statistical zero-knowledge margin
    pub l_statzk: u32,
}

impl SystemParameters {
    /// Bit length of commit randomness for proving knowledge of an
    /// `l_m`-bit value: `l_m + l_h + l_statzk`.
    pub const fn l_m_commit(&self) -> u32 {
        self.l_m + self.l_h + self.l_statzk
    }
}

/// The 1024-bit parameter set.
///
/// Keyshare bounds (secret width, challenge width, commit randomness) are
/// taken from this set regardless of the issuer key size, so servers accept
/// the same challenges for every trusted key.
pub const BASE_PARAMETERS: SystemParameters = SystemParameters {
    l_n: 1024,
    l_m: 256,
    l_h: 256,
    l_statzk: 80,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_length_covers_secret_challenge_and_margin() {
        assert_eq!(BASE_PARAMETERS.l_m_commit(), 592);
        assert!(BASE_PARAMETERS.l_m_commit() > BASE_PARAMETERS.l_m + BASE_PARAMETERS.l_h);
    }
}
