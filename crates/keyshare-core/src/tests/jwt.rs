//! Access token verification tests, including the hostile cases.

use super::helpers::*;
use crate::*;
use base64::{engine::general_purpose::STANDARD, engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

fn packet_token_id(core: &KeyshareCore, ep: &EncryptedKeysharePacket) -> String {
    let packet = core.sealer.unseal(ep.as_bytes()).unwrap();
    STANDARD.encode(packet.id())
}

fn valid_claims(core: &KeyshareCore, ep: &EncryptedKeysharePacket) -> AccessTokenClaims {
    let now = current_timestamp();
    AccessTokenClaims {
        iss: "keyshare_server".to_string(),
        sub: "auth_tok".to_string(),
        iat: now,
        exp: now + 180,
        user_id: "user".to_string(),
        token_id: packet_token_id(core, ep),
    }
}

#[test]
fn test_fresh_token_verifies() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();
    let token = core.validate_pin(&ep, "1234", "user").unwrap();

    assert!(core.validate_jwt(&ep, &token).is_ok());

    let header = decode_segment(&token, 0);
    assert_eq!(header["alg"], "RS256");
    assert_eq!(header["kid"], TEST_KID);
}

#[test]
fn test_expired_token_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    let mut claims = valid_claims(&core, &ep);
    claims.iat = current_timestamp() - 300;
    claims.exp = current_timestamp() - 1;
    let token = core.sign_claims(&claims).unwrap();

    assert_eq!(core.validate_jwt(&ep, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_alg_none_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let claims = valid_claims(&core, &ep);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    let token = format!("{}.{}.", header, payload);

    assert_eq!(core.validate_jwt(&ep, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_hs256_confusion_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    // Classic algorithm-confusion attempt: HMAC keyed with the public key.
    let claims = valid_claims(&core, &ep);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(RSA_PUBLIC_PEM),
    )
    .unwrap();

    assert_eq!(core.validate_jwt(&ep, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_foreign_signature_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    let claims = valid_claims(&core, &ep);
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(TEST_KID.to_string());
    let token = encode(
        &header,
        &claims,
        &EncodingKey::from_rsa_pem(FOREIGN_PRIVATE_PEM).unwrap(),
    )
    .unwrap();

    assert_eq!(core.validate_jwt(&ep, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_wrong_subject_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    let mut claims = valid_claims(&core, &ep);
    claims.sub = "ProofP".to_string();
    let token = core.sign_claims(&claims).unwrap();

    assert_eq!(core.validate_jwt(&ep, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_missing_token_id_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    let now = current_timestamp();
    let claims = serde_json::json!({
        "iss": "keyshare_server",
        "sub": "auth_tok",
        "iat": now,
        "exp": now + 180,
        "user_id": "user",
    });
    let token = core.sign_claims(&claims).unwrap();

    assert_eq!(core.validate_jwt(&ep, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_malformed_token_id_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    let mut claims = valid_claims(&core, &ep);
    claims.token_id = "not base64!".to_string();
    let token = core.sign_claims(&claims).unwrap();

    assert_eq!(core.validate_jwt(&ep, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_token_bound_to_packet_instance() {
    let core = test_core();
    let ep_a = core.generate_keyshare_secret("1234").unwrap();
    let ep_b = core.generate_keyshare_secret("1234").unwrap();

    let token = core.validate_pin(&ep_a, "1234", "user").unwrap();
    assert!(core.validate_jwt(&ep_a, &token).is_ok());
    assert_eq!(core.validate_jwt(&ep_b, &token), Err(CoreError::InvalidJwt));
}

#[test]
fn test_garbage_tokens_rejected() {
    let core = test_core();
    let ep = core.generate_keyshare_secret("1234").unwrap();

    for token in ["", "garbage", "a.b", "a.b.c", "a.b.c.d"] {
        assert_eq!(core.validate_jwt(&ep, token), Err(CoreError::InvalidJwt));
    }
}
