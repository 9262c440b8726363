//! Engine test suite.

mod helpers;
mod jwt;
mod proofs;
