use crate::error::ConstructionError;
use crate::intent::Intent;
use crate::signature::BlsPublicKey;
use crate::token::Token;
use serde_json::Number;
use std::collections::BTreeMap;

/// One ledger instruction. Order within a transaction is semantically
/// significant; the assembler never reorders or merges instructions.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// Move `funds` from `source` to `target`.
    ///
    /// Funds live in a token-ordered map, so equal transfers built with any
    /// insertion order encode identically.
    TransferFunds {
        source: BlsPublicKey,
        target: BlsPublicKey,
        funds: BTreeMap<Token, Number>,
    },
    /// Install `intent` as the predicate of `host`. A `None` intent clears
    /// any existing predicate, leaving the account unrestricted.
    SetIntent {
        host: BlsPublicKey,
        intent: Option<Intent>,
    },
}

impl Instruction {
    /// Fund transfer; every amount must be positive and the map non-empty.
    pub fn transfer_funds(
        source: BlsPublicKey,
        target: BlsPublicKey,
        funds: BTreeMap<Token, Number>,
    ) -> Result<Self, ConstructionError> {
        validate_funds(&funds)?;
        Ok(Instruction::TransferFunds {
            source,
            target,
            funds,
        })
    }

    /// Install a predicate on `host`.
    pub fn set_intent(host: BlsPublicKey, intent: Intent) -> Self {
        Instruction::SetIntent {
            host,
            intent: Some(intent),
        }
    }

    /// Clear any predicate installed on `host`.
    pub fn clear_intent(host: BlsPublicKey) -> Self {
        Instruction::SetIntent {
            host,
            intent: None,
        }
    }
}

pub(crate) fn validate_funds(funds: &BTreeMap<Token, Number>) -> Result<(), ConstructionError> {
    if funds.is_empty() {
        return Err(ConstructionError::EmptyFunds);
    }
    for (token, amount) in funds {
        if !number_is_positive(amount) {
            return Err(ConstructionError::NonPositiveAmount {
                token: token.name().to_string(),
            });
        }
    }
    Ok(())
}

fn number_is_positive(n: &Number) -> bool {
    if let Some(u) = n.as_u64() {
        u > 0
    } else if let Some(i) = n.as_i64() {
        i > 0
    } else {
        n.as_f64().map(|f| f > 0.0).unwrap_or(false)
    }
}
