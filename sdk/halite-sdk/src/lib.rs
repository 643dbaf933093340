//! Halite SDK - build, sign and encode Halite transactions.
//!
//! The SDK ties the core data model ([`halite_types`]) and the BLS
//! primitives ([`halite_crypto`]) together into the workflow an application
//! actually runs: express authorization rules as intents, assemble
//! instructions into a transaction, collect one or more signatures over it,
//! and wrap the result for submission.
//!
//! ```
//! use halite_sdk::prelude::*;
//!
//! # fn main() -> halite_sdk::Result<()> {
//! let alice = Wallet::generate()?;
//! let bob = Wallet::generate()?;
//!
//! // Alice pays Bob 10 USDC.
//! let payment = transfer(alice.public_key(), bob.public_key(), Token::Usdc, 10u64)?;
//! let signed = prepare_simple_tx(&alice, vec![payment])?;
//! assert!(verify(&signed));
//!
//! let encoded = encode_signed_tx(&signed);
//! assert_eq!(decode_signed_tx(&encoded)?, signed);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod instructions;
pub mod transport;
pub mod tx;
pub mod wallet;

pub use errors::{Result, SdkError};
pub use instructions::{swap, transfer};
pub use transport::{PhaseResult, Transport, TxResult};
pub use tx::{
    aggregate, decode_signed_tx, encode_signed_tx, prepare_simple_tx, sign, sign_partial,
    signing_message, verify, PartialSignature,
};
pub use wallet::{Signer, Wallet};

// The data model is the SDK's vocabulary; re-export it wholesale.
pub use halite_types::{
    ArithOp, BlsPublicKey, BlsSignature, Canonical, ConstructionError, DecodeError, Expr, Flow,
    Instruction, Intent, Relation, Signed, Token, Transaction,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::{Result, SdkError};
    pub use crate::instructions::{swap, transfer};
    pub use crate::transport::{PhaseResult, Transport, TxResult};
    pub use crate::tx::{
        aggregate, decode_signed_tx, encode_signed_tx, prepare_simple_tx, sign, sign_partial,
        signing_message, verify, PartialSignature,
    };
    pub use crate::wallet::{Signer, Wallet};
    pub use halite_types::prelude::*;
}
