//! Convenience builders for common instruction shapes.

use std::collections::BTreeMap;

use serde_json::Number;

use crate::errors::Result;
use halite_types::{BlsPublicKey, Instruction, Token};

/// Single-token transfer from `source` to `target`.
pub fn transfer(
    source: BlsPublicKey,
    target: BlsPublicKey,
    token: Token,
    amount: impl Into<Number>,
) -> Result<Instruction> {
    let mut funds = BTreeMap::new();
    funds.insert(token, amount.into());
    Ok(Instruction::transfer_funds(source, target, funds)?)
}

/// Matched pair of transfers realizing an agreed swap: `sender` gives
/// `give_amount` of `give_token` to `recipient`, who gives `take_amount` of
/// `take_token` back. Both legs land in one transaction so the exchange is
/// atomic.
pub fn swap(
    sender: BlsPublicKey,
    recipient: BlsPublicKey,
    give_token: Token,
    give_amount: impl Into<Number>,
    take_token: Token,
    take_amount: impl Into<Number>,
) -> Result<[Instruction; 2]> {
    let give = transfer(sender, recipient, give_token, give_amount)?;
    let take = transfer(recipient, sender, take_token, take_amount)?;
    Ok([give, take])
}

#[cfg(test)]
mod tests {
    use super::*;
    use halite_types::ConstructionError;

    fn key(byte: u8) -> BlsPublicKey {
        BlsPublicKey::from_bytes([byte; 48])
    }

    #[test]
    fn test_transfer_builds_single_token_funds() {
        let instruction = transfer(key(1), key(2), Token::Btc, 5u64).unwrap();
        match instruction {
            Instruction::TransferFunds { funds, .. } => {
                assert_eq!(funds.len(), 1);
                assert_eq!(funds.get(&Token::Btc), Some(&Number::from(5u64)));
            }
            other => panic!("unexpected instruction: {:?}", other),
        }
    }

    #[test]
    fn test_transfer_rejects_zero_amount() {
        assert!(matches!(
            transfer(key(1), key(2), Token::Btc, 0u64),
            Err(crate::errors::SdkError::Construction(
                ConstructionError::NonPositiveAmount { .. }
            ))
        ));
    }

    #[test]
    fn test_swap_legs_mirror_each_other() {
        let [give, take] = swap(key(1), key(2), Token::Btc, 1u64, Token::Usdc, 100u64).unwrap();
        match (give, take) {
            (
                Instruction::TransferFunds {
                    source: s1,
                    target: t1,
                    ..
                },
                Instruction::TransferFunds {
                    source: s2,
                    target: t2,
                    ..
                },
            ) => {
                assert_eq!(s1, t2);
                assert_eq!(t1, s2);
            }
            other => panic!("unexpected instructions: {:?}", other),
        }
    }
}
