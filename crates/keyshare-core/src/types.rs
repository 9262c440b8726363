//! Core data types of the keyshare engine.

use crate::errors::*;
use jsonwebtoken::{DecodingKey, EncodingKey};
use keyshare_idemix::{ProofP, PublicKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a trusted Idemix issuer public key: issuer identity plus
/// a key counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKeyIdentifier {
    /// Issuer identity
    pub issuer: String,
    /// Which of the issuer's keys, counted from zero
    pub counter: u32,
}

impl PublicKeyIdentifier {
    /// Name a key by issuer and counter.
    pub fn new(issuer: impl Into<String>, counter: u32) -> Self {
        Self {
            issuer: issuer.into(),
            counter,
        }
    }
}

impl fmt::Display for PublicKeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.issuer, self.counter)
    }
}

/// Read-only registry of trusted issuer public keys.
///
/// Populated at engine construction; lookups of unknown identifiers fail
/// with [`CoreError::KeyNotFound`].
#[derive(Debug, Clone, Default)]
pub struct TrustedKeys {
    keys: HashMap<PublicKeyIdentifier, PublicKey>,
}

impl TrustedKeys {
    /// Build a registry from identifier/key pairs.
    pub fn new(pairs: impl IntoIterator<Item = (PublicKeyIdentifier, PublicKey)>) -> Self {
        Self {
            keys: pairs.into_iter().collect(),
        }
    }

    /// Look up a trusted key.
    pub fn get(&self, id: &PublicKeyIdentifier) -> Result<&PublicKey> {
        self.keys.get(id).ok_or(CoreError::KeyNotFound)
    }

    /// Number of trusted keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<(PublicKeyIdentifier, PublicKey)> for TrustedKeys {
    fn from_iter<I: IntoIterator<Item = (PublicKeyIdentifier, PublicKey)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The engine's RS256 signing key pair plus the `kid` stamped into token
/// headers.
pub struct SigningKey {
    kid: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Build from PEM-encoded RSA private and public keys.
    pub fn from_rsa_pem(kid: impl Into<String>, private_pem: &[u8], public_pem: &[u8]) -> Result<Self> {
        let encoding = EncodingKey::from_rsa_pem(private_pem).map_err(CoreError::internal)?;
        let decoding = DecodingKey::from_rsa_pem(public_pem).map_err(CoreError::internal)?;
        Ok(Self {
            kid: kid.into(),
            encoding,
            decoding,
        })
    }

    /// The key identifier carried in token headers
    pub fn kid(&self) -> &str {
        &self.kid
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// An encrypted keyshare packet, exactly as handed to the persistence
/// layer. Opaque to callers; only the engine can open it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedKeysharePacket(Vec<u8>);

impl EncryptedKeysharePacket {
    /// The stored byte representation
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap into the stored bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for EncryptedKeysharePacket {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for EncryptedKeysharePacket {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Claims of an access token minted after a successful PIN check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer, always `keyshare_server`
    pub iss: String,
    /// Subject, always `auth_tok`
    pub sub: String,
    /// Issued at, Unix seconds
    pub iat: u64,
    /// Expiry, Unix seconds
    pub exp: u64,
    /// Caller-supplied user identifier
    pub user_id: String,
    /// Base64 of the packet id the token is bound to
    pub token_id: String,
}

/// Claims of a signed proof response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofClaims {
    /// Issuer, always `keyshare_server`
    pub iss: String,
    /// Subject, always `ProofP`
    pub sub: String,
    /// Issued at, Unix seconds
    pub iat: u64,
    /// The server's proof contribution
    #[serde(rename = "ProofP")]
    pub proof_p: ProofP,
}

/// Returns the current Unix timestamp in seconds.
///
/// # Panics
///
/// Panics if the system time is set before the Unix epoch.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time is before Unix epoch")
        .as_secs()
}
