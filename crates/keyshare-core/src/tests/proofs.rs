//! Commit/response protocol tests.

use super::helpers::*;
use crate::*;
use num_bigint::{BigInt, BigUint};

fn session(core: &KeyshareCore) -> (EncryptedKeysharePacket, String) {
    let ep = core.generate_keyshare_secret("1234").unwrap();
    let token = core.validate_pin(&ep, "1234", "user").unwrap();
    (ep, token)
}

fn claim_biguint(value: &serde_json::Value) -> BigUint {
    BigUint::parse_bytes(value.as_str().unwrap().as_bytes(), 10).unwrap()
}

#[test]
fn test_commit_response_round_trip_verifies() {
    let core = test_core();
    let (ep, token) = session(&core);

    let (commitments, commit_id) = core.generate_commitments(&ep, &token, &[k1()]).unwrap();
    assert_eq!(commitments.len(), 1);

    let response = core
        .generate_response(&ep, &token, commit_id, &BigInt::from(42), &k1())
        .unwrap();

    let header = decode_segment(&response, 0);
    assert_eq!(header["alg"], "RS256");
    assert_eq!(header["kid"], TEST_KID);

    let claims = decode_claims(&response);
    assert_eq!(claims["iss"], "keyshare_server");
    assert_eq!(claims["sub"], "ProofP");

    // R[0]^s_response == Pcommit * P^c (mod n)
    let key = trusted_key(5);
    let challenge = BigUint::from(42u8);
    let p = claim_biguint(&claims["ProofP"]["P"]);
    let s_response = claim_biguint(&claims["ProofP"]["s_response"]);
    assert_eq!(p, commitments[0].p);

    let lhs = key.r[0].modpow(&s_response, &key.n);
    let rhs = &commitments[0].p_commit * p.modpow(&challenge, &key.n) % &key.n;
    assert_eq!(lhs, rhs);
}

#[test]
fn test_commitments_for_multiple_keys() {
    let core = test_core();
    let (ep, token) = session(&core);

    let (commitments, commit_id) = core
        .generate_commitments(&ep, &token, &[k1(), k2()])
        .unwrap();
    assert_eq!(commitments.len(), 2);
    assert_ne!(commitments[0].p, commitments[1].p);

    assert!(core
        .generate_response(&ep, &token, commit_id, &BigInt::from(7), &k2())
        .is_ok());
}

#[test]
fn test_commit_is_single_use() {
    let core = test_core();
    let (ep, token) = session(&core);

    let (_, commit_id) = core.generate_commitments(&ep, &token, &[k1()]).unwrap();

    assert!(core
        .generate_response(&ep, &token, commit_id, &BigInt::from(42), &k1())
        .is_ok());
    assert_eq!(
        core.generate_response(&ep, &token, commit_id, &BigInt::from(42), &k1()),
        Err(CoreError::UnknownCommit)
    );
}

#[test]
fn test_unknown_commit_rejected() {
    let core = test_core();
    let (ep, token) = session(&core);
    assert_eq!(
        core.generate_response(&ep, &token, 12345, &BigInt::from(42), &k1()),
        Err(CoreError::UnknownCommit)
    );
}

#[test]
fn test_unknown_key_fails_whole_commit_request() {
    let core = test_core();
    let (ep, token) = session(&core);
    let unknown = PublicKeyIdentifier::new("acme-city", 9);

    assert!(matches!(
        core.generate_commitments(&ep, &token, &[k1(), unknown]),
        Err(CoreError::KeyNotFound)
    ));
}

#[test]
fn test_rejections_before_commit_lookup_leave_commit_intact() {
    let core = test_core();
    let (ep, token) = session(&core);
    let (_, commit_id) = core.generate_commitments(&ep, &token, &[k1()]).unwrap();

    // Oversize challenge: one bit beyond the parameter bound.
    let wide = BigInt::from(1) << 256;
    assert_eq!(
        core.generate_response(&ep, &token, commit_id, &wide, &k1()),
        Err(CoreError::InvalidChallenge)
    );

    // Negative challenge.
    assert_eq!(
        core.generate_response(&ep, &token, commit_id, &BigInt::from(-1), &k1()),
        Err(CoreError::InvalidChallenge)
    );

    // Unknown key.
    let unknown = PublicKeyIdentifier::new("acme-city", 9);
    assert_eq!(
        core.generate_response(&ep, &token, commit_id, &BigInt::from(42), &unknown),
        Err(CoreError::KeyNotFound)
    );

    // Bad token.
    assert_eq!(
        core.generate_response(&ep, "garbage", commit_id, &BigInt::from(42), &k1()),
        Err(CoreError::InvalidJwt)
    );

    // The commit survived all of the above.
    assert!(core
        .generate_response(&ep, &token, commit_id, &BigInt::from(42), &k1())
        .is_ok());
}

#[test]
fn test_widest_legal_challenge_accepted() {
    let core = test_core();
    let (ep, token) = session(&core);
    let (_, commit_id) = core.generate_commitments(&ep, &token, &[k1()]).unwrap();

    // Exactly 256 bits, the parameter bound.
    let widest = (BigInt::from(1) << 256) - 1;
    assert!(core
        .generate_response(&ep, &token, commit_id, &widest, &k1())
        .is_ok());
}

#[test]
fn test_zero_challenge_accepted() {
    let core = test_core();
    let (ep, token) = session(&core);
    let (commitments, commit_id) = core.generate_commitments(&ep, &token, &[k1()]).unwrap();

    let response = core
        .generate_response(&ep, &token, commit_id, &BigInt::from(0), &k1())
        .unwrap();

    // With c = 0 the response exponent is the bare commit randomness.
    let claims = decode_claims(&response);
    let key = trusted_key(5);
    let s_response = claim_biguint(&claims["ProofP"]["s_response"]);
    assert_eq!(key.r[0].modpow(&s_response, &key.n), commitments[0].p_commit);
}

#[test]
fn test_commitments_require_valid_token() {
    let core = test_core();
    let (ep, _) = session(&core);

    assert_eq!(
        core.generate_commitments(&ep, "garbage", &[k1()])
            .map(|_| ()),
        Err(CoreError::InvalidJwt)
    );
}

#[test]
fn test_stale_token_cannot_open_proof_session() {
    let core = test_core();
    let (ep, token) = session(&core);

    let ep2 = core.change_pin(&ep, "1234", "5678").unwrap();
    assert_eq!(
        core.generate_commitments(&ep2, &token, &[k1()]).map(|_| ()),
        Err(CoreError::InvalidJwt)
    );
}
