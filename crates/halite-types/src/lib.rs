//! Halite Types - core data model for the Halite intent SDK.
//!
//! This crate provides the values the rest of the SDK is built from:
//! - the token registry
//! - the Expression/Intent predicate algebra with its combinators
//! - instructions, transactions and the signed envelope
//! - BLS key/signature newtypes (48/96 byte, hex text form)
//! - the canonical wire codec the signing protocol derives messages from

pub mod codec;
pub mod error;
pub mod expr;
pub mod instruction;
pub mod intent;
pub mod signature;
pub mod token;
pub mod transaction;

pub use codec::Canonical;
pub use error::{ConstructionError, DecodeError};
pub use expr::{ArithOp, Expr, Flow};
pub use instruction::Instruction;
pub use intent::{Intent, Relation};
pub use signature::{BlsPublicKey, BlsSignature};
pub use token::Token;
pub use transaction::{Signed, Transaction};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ArithOp, BlsPublicKey, BlsSignature, Canonical, ConstructionError, DecodeError, Expr,
        Flow, Instruction, Intent, Relation, Signed, Token, Transaction,
    };
}
