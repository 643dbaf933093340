//! Halite Crypto - BLS12-381 primitives for the Halite intent SDK.
//!
//! This crate provides:
//! - keypair generation and signing (min_pk: 48-byte public keys, 96-byte
//!   signatures, raw-message signing under the ledger's domain tag)
//! - signature and public key aggregation
//! - single, aggregate and multi-message verification

pub mod bls;
pub mod error;

pub use bls::{
    aggregate_public_keys, aggregate_signatures, verify, verify_aggregate, verify_multi,
    BlsKeypair,
};
pub use error::CryptoError;
