use crate::error::ConstructionError;
use crate::instruction::Instruction;
use crate::signature::{BlsPublicKey, BlsSignature};

/// Ordered, non-empty instruction list forming a transaction payload.
///
/// Immutable after construction: the signing protocol derives the message
/// to sign from this value, so it must never change once handed over.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    instructions: Vec<Instruction>,
}

impl Transaction {
    /// Assemble a transaction. Rejects an empty instruction list; preserves
    /// instruction order exactly.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, ConstructionError> {
        if instructions.is_empty() {
            return Err(ConstructionError::EmptyTransaction);
        }
        Ok(Self { instructions })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// Signed transaction envelope: created once per submission attempt, never
/// mutated, consumed exactly once by the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct Signed {
    nonce: String,
    signature: BlsSignature,
    signee: Transaction,
    signers: Vec<BlsPublicKey>,
}

impl Signed {
    /// Wrap a payload with its signature and ordered signer set. The signer
    /// list must be non-empty and must keep the order used during
    /// aggregation.
    pub fn new(
        nonce: impl Into<String>,
        signature: BlsSignature,
        signee: Transaction,
        signers: Vec<BlsPublicKey>,
    ) -> Result<Self, ConstructionError> {
        if signers.is_empty() {
            return Err(ConstructionError::EmptySigners);
        }
        Ok(Self {
            nonce: nonce.into(),
            signature,
            signee,
            signers,
        })
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn signature(&self) -> &BlsSignature {
        &self.signature
    }

    pub fn signee(&self) -> &Transaction {
        &self.signee
    }

    pub fn signers(&self) -> &[BlsPublicKey] {
        &self.signers
    }
}
