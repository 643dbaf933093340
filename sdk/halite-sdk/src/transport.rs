//! Submission contract between the SDK and a ledger client.
//!
//! The SDK produces wire-ready envelopes; actually delivering them is the
//! caller's concern. Implementors of [`Transport`] (HTTP RPC clients, test
//! doubles) take the encoded envelope and return the ledger's two-phase
//! verdict.

use serde::{Deserialize, Serialize};

/// Outcome of one validation phase. Code `0` is acceptance; any other code
/// is a rejection explained by `log`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub code: u32,
    #[serde(default)]
    pub log: String,
}

/// Ledger verdict on a submitted transaction: stateless check first, then
/// execution against state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub check: PhaseResult,
    pub deliver: PhaseResult,
}

impl TxResult {
    /// True when both phases accepted the transaction.
    pub fn is_accepted(&self) -> bool {
        self.check.code == 0 && self.deliver.code == 0
    }
}

/// Delivery of an encoded signed transaction to a ledger.
///
/// A rejected transaction is a successful submission: the verdict lands in
/// the returned [`TxResult`]. `Err` is reserved for failures of delivery
/// itself.
pub trait Transport {
    type Error;

    fn submit(&self, encoded: &str) -> Result<TxResult, Self::Error>;
}
