//! Access and response token issuance and verification.

use super::{KeyshareCore, ACCESS_TOKEN_SUBJECT, ACCESS_TOKEN_TTL, TOKEN_ISSUER};
use crate::{errors::*, types::*};
use base64::{engine::general_purpose::STANDARD, Engine};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};
use keyshare_crypto::{constant_time_compare, KeysharePacket};
use serde::Serialize;

impl KeyshareCore {
    /// Mint an access token for a decrypted packet.
    ///
    /// The token carries the packet id, binding it to the exact packet
    /// instance: any id-changing operation invalidates it.
    pub(crate) fn issue_access_token(
        &self,
        packet: &KeysharePacket,
        user_id: &str,
    ) -> Result<String> {
        let now = current_timestamp();
        let claims = AccessTokenClaims {
            iss: TOKEN_ISSUER.to_string(),
            sub: ACCESS_TOKEN_SUBJECT.to_string(),
            iat: now,
            exp: now + ACCESS_TOKEN_TTL,
            user_id: user_id.to_string(),
            token_id: STANDARD.encode(packet.id()),
        };
        self.sign_claims(&claims)
    }

    /// Sign claims as a compact RS256 JWS with this engine's `kid`.
    pub(crate) fn sign_claims<T: Serialize>(&self, claims: &T) -> Result<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.signing_key.kid().to_string());
        encode(&header, claims, self.signing_key.encoding()).map_err(CoreError::internal)
    }

    /// Verify an access token against a sealed packet and return the
    /// decrypted packet on success.
    ///
    /// The algorithm is pinned to RS256 before any signature work, so
    /// `alg=none` and algorithm-confusion tokens die first. Every token
    /// defect collapses to [`CoreError::InvalidJwt`].
    ///
    /// Note: although this is an internal function, it is tested directly.
    pub(crate) fn verify_access(
        &self,
        ep: &EncryptedKeysharePacket,
        token: &str,
    ) -> Result<KeysharePacket> {
        let header = decode_header(token).map_err(|_| CoreError::InvalidJwt)?;
        if header.alg != Algorithm::RS256 {
            return Err(CoreError::InvalidJwt);
        }

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.sub = Some(ACCESS_TOKEN_SUBJECT.to_string());

        let data = decode::<AccessTokenClaims>(token, self.signing_key.decoding(), &validation)
            .map_err(|_| CoreError::InvalidJwt)?;
        let token_id = STANDARD
            .decode(&data.claims.token_id)
            .map_err(|_| CoreError::InvalidJwt)?;

        let packet = self.sealer.unseal(ep.as_bytes())?;
        if !constant_time_compare(packet.id(), &token_id) {
            return Err(CoreError::InvalidJwt);
        }
        Ok(packet)
    }
}
