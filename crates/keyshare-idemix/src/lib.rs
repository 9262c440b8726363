//! # keyshare-idemix
//!
//! The slice of Idemix the keyshare server needs: issuer public keys, the
//! proof-of-knowledge wire structures, and the three keyshare operations
//! (secret sampling, commitment sampling, response computation).
//!
//! The engine treats these as opaque cryptographic oracles; everything else
//! of Idemix (issuance, disclosure proofs, revocation) lives with the
//! clients and verifiers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod dec;
pub mod errors;
pub mod keys;
pub mod keyshare;
pub mod params;
pub mod proofs;

pub use errors::IdemixError;
pub use keys::PublicKey;
pub use keyshare::{keyshare_response, new_keyshare_commitments, new_keyshare_secret};
pub use params::{SystemParameters, BASE_PARAMETERS};
pub use proofs::{ProofP, ProofPCommitment};
