//! The signing protocol: deriving the message to sign, producing single and
//! multi-party signed envelopes, verifying them, and wrapping them for the
//! wire.
//!
//! Every signer of a transaction signs the same bytes: the compact JSON of
//! the two-element array `[nonce, transaction]`, with the transaction in
//! canonical form. Multi-party authorization aggregates the per-signer
//! signatures into one and records the signer set in the order signatures
//! were collected.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{Result, SdkError};
use crate::wallet::Signer;
use halite_crypto::{aggregate_signatures, verify_aggregate};
use halite_types::{BlsPublicKey, BlsSignature, Canonical, Instruction, Signed, Transaction};

/// One party's contribution to a multi-party signature, produced by
/// [`sign_partial`] and consumed by [`aggregate`].
#[derive(Clone, Debug, PartialEq)]
pub struct PartialSignature {
    pub signer: BlsPublicKey,
    pub signature: BlsSignature,
}

/// Exact bytes a signer commits to for a given nonce and payload.
///
/// Compact JSON of `[nonce, transaction]` with the transaction encoded
/// canonically. Deterministic: equal inputs always yield equal bytes, which
/// is what lets independent parties sign without coordinating.
pub fn signing_message(nonce: &str, transaction: &Transaction) -> Vec<u8> {
    let payload = Value::Array(vec![
        Value::String(nonce.to_string()),
        transaction.to_value(),
    ]);
    // String-keyed Value trees cannot fail to serialize.
    serde_json::to_vec(&payload).expect("canonical value serializes")
}

/// Sign a transaction with a single signer, producing a complete envelope.
pub fn sign(signer: &dyn Signer, nonce: &str, transaction: Transaction) -> Result<Signed> {
    let message = signing_message(nonce, &transaction);
    let signature = signer.sign(&message)?;
    let signed = Signed::new(nonce, signature, transaction, vec![signer.public_key()])?;
    debug!(nonce, "transaction signed");
    Ok(signed)
}

/// Produce one party's signature over a shared (nonce, transaction) pair
/// without assembling an envelope. All parties must use the same nonce and
/// the same transaction value.
pub fn sign_partial(
    signer: &dyn Signer,
    nonce: &str,
    transaction: &Transaction,
) -> Result<PartialSignature> {
    let message = signing_message(nonce, transaction);
    let signature = signer.sign(&message)?;
    Ok(PartialSignature {
        signer: signer.public_key(),
        signature,
    })
}

/// Combine partial signatures into an N-of-N signed envelope.
///
/// The signer list of the resulting envelope preserves the order of `parts`;
/// verification is order-insensitive, but the recorded order is part of the
/// envelope's bytes.
pub fn aggregate(
    nonce: &str,
    transaction: Transaction,
    parts: &[PartialSignature],
) -> Result<Signed> {
    let signatures: Vec<BlsSignature> = parts.iter().map(|p| p.signature).collect();
    let combined = aggregate_signatures(&signatures)?;
    let signers: Vec<BlsPublicKey> = parts.iter().map(|p| p.signer).collect();
    let signed = Signed::new(nonce, combined, transaction, signers)?;
    debug!(nonce, signers = signed.signers().len(), "signatures aggregated");
    Ok(signed)
}

/// Check that an envelope's signature covers its own nonce and payload for
/// its recorded signer set. Never panics; any failure, including malformed
/// key or signature bytes, reports `false`.
pub fn verify(signed: &Signed) -> bool {
    let message = signing_message(signed.nonce(), signed.signee());
    match verify_aggregate(signed.signers(), &message, signed.signature()) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "signed transaction failed verification");
            false
        }
    }
}

/// Assemble, nonce and sign a transaction in one step. The nonce is a fresh
/// random UUID, so re-preparing the same instructions yields a distinct
/// envelope.
pub fn prepare_simple_tx(signer: &dyn Signer, instructions: Vec<Instruction>) -> Result<Signed> {
    let transaction = Transaction::new(instructions)?;
    let nonce = Uuid::new_v4().to_string();
    sign(signer, &nonce, transaction)
}

/// Wrap a signed envelope for submission: base64 over the lowercase hex of
/// its canonical JSON.
pub fn encode_signed_tx(signed: &Signed) -> String {
    let json = signed.encode_to_string();
    STANDARD.encode(hex::encode(json.as_bytes()))
}

/// Inverse of [`encode_signed_tx`]. Rejects malformed base64 or hex with
/// [`SdkError::Envelope`]; payload-level problems surface as decode errors.
pub fn decode_signed_tx(encoded: &str) -> Result<Signed> {
    let hex_bytes = STANDARD
        .decode(encoded)
        .map_err(|e| SdkError::Envelope(format!("Invalid base64: {}", e)))?;
    let json = hex::decode(&hex_bytes)
        .map_err(|e| SdkError::Envelope(format!("Invalid hex: {}", e)))?;
    Ok(Signed::decode(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Wallet;
    use halite_types::Token;
    use serde_json::Number;
    use std::collections::BTreeMap;

    fn wallet(seed: u8) -> Wallet {
        Wallet::from_seed(&[seed; 32]).unwrap()
    }

    fn transfer_tx(source: &Wallet, target: &Wallet) -> Transaction {
        let mut funds = BTreeMap::new();
        funds.insert(Token::Usdc, Number::from(100u64));
        let instruction =
            Instruction::transfer_funds(source.public_key(), target.public_key(), funds).unwrap();
        Transaction::new(vec![instruction]).unwrap()
    }

    #[test]
    fn test_signing_message_is_deterministic() {
        let a = wallet(1);
        let b = wallet(2);
        let tx = transfer_tx(&a, &b);

        assert_eq!(signing_message("n-1", &tx), signing_message("n-1", &tx));
        assert_ne!(signing_message("n-1", &tx), signing_message("n-2", &tx));
    }

    #[test]
    fn test_signing_message_shape() {
        let a = wallet(1);
        let b = wallet(2);
        let tx = transfer_tx(&a, &b);

        let message = signing_message("abc", &tx);
        let value: Value = serde_json::from_slice(&message).unwrap();
        let parts = value.as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], Value::String("abc".to_string()));
        assert_eq!(parts[1], tx.to_value());
    }

    #[test]
    fn test_sign_then_verify() {
        let a = wallet(1);
        let b = wallet(2);
        let signed = sign(&a, "nonce-1", transfer_tx(&a, &b)).unwrap();

        assert_eq!(signed.signers(), &[a.public_key()]);
        assert!(verify(&signed));
    }

    #[test]
    fn test_aggregate_preserves_signer_order() {
        let a = wallet(1);
        let b = wallet(2);
        let c = wallet(3);
        let tx = transfer_tx(&a, &b);

        let parts = vec![
            sign_partial(&c, "nonce", &tx).unwrap(),
            sign_partial(&a, "nonce", &tx).unwrap(),
            sign_partial(&b, "nonce", &tx).unwrap(),
        ];
        let signed = aggregate("nonce", tx, &parts).unwrap();
        assert_eq!(
            signed.signers(),
            &[c.public_key(), a.public_key(), b.public_key()]
        );
        assert!(verify(&signed));
    }

    #[test]
    fn test_aggregate_rejects_empty_parts() {
        let a = wallet(1);
        let b = wallet(2);
        assert!(aggregate("nonce", transfer_tx(&a, &b), &[]).is_err());
    }

    #[test]
    fn test_envelope_round_trip() {
        let a = wallet(1);
        let b = wallet(2);
        let signed = sign(&a, "nonce-1", transfer_tx(&a, &b)).unwrap();

        let encoded = encode_signed_tx(&signed);
        let decoded = decode_signed_tx(&encoded).unwrap();
        assert_eq!(decoded, signed);
        assert!(verify(&decoded));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_signed_tx("not base64!!!"),
            Err(SdkError::Envelope(_))
        ));
        // Valid base64, but the payload is not hex.
        let not_hex = STANDARD.encode("zz-not-hex");
        assert!(matches!(
            decode_signed_tx(&not_hex),
            Err(SdkError::Envelope(_))
        ));
    }
}
