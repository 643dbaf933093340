use crate::error::CryptoError;
use blst::min_pk::{AggregatePublicKey, AggregateSignature, PublicKey, SecretKey, Signature};
use halite_types::{BlsPublicKey, BlsSignature};
use rand::RngCore;
use tracing::debug;

/// Domain separation tag of the ledger's signing scheme (IETF BLS draft v4
/// basic scheme, min_pk). Messages are signed raw, with no pre-hashing.
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// BLS12-381 keypair used to authorize transactions.
pub struct BlsKeypair {
    secret_key: SecretKey,
}

impl BlsKeypair {
    /// Generate a new keypair from cryptographically secure randomness.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = rand::thread_rng();
        let mut ikm = [0u8; 32];
        rng.fill_bytes(&mut ikm);
        let secret_key = SecretKey::key_gen(&ikm, &[])
            .map_err(|e| CryptoError::KeyDerivationFailed(format!("{:?}", e)))?;
        Ok(Self { secret_key })
    }

    /// Derive a keypair from 32 bytes of input keying material.
    pub fn from_ikm(ikm: &[u8; 32]) -> Result<Self, CryptoError> {
        let secret_key =
            SecretKey::key_gen(ikm, &[]).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { secret_key })
    }

    /// Restore a keypair from serialized secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let secret_key =
            SecretKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { secret_key })
    }

    /// Public key in compressed form.
    pub fn public_key(&self) -> BlsPublicKey {
        BlsPublicKey::from_bytes(self.secret_key.sk_to_pk().to_bytes())
    }

    /// Sign raw message bytes.
    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        let signature = self.secret_key.sign(message, DST, &[]);
        BlsSignature::from_bytes(signature.to_bytes())
    }

    /// Serialized secret key bytes (CAUTION: sensitive).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret_key.serialize()
    }
}

/// Verify a single signature over raw message bytes.
pub fn verify(
    public_key: &BlsPublicKey,
    message: &[u8],
    signature: &BlsSignature,
) -> Result<(), CryptoError> {
    let pk = PublicKey::from_bytes(public_key.as_bytes())
        .map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = Signature::from_bytes(signature.as_bytes())
        .map_err(|_| CryptoError::InvalidSignature)?;

    let result = sig.verify(true, message, DST, &[], &pk, true);
    if result == blst::BLST_ERROR::BLST_SUCCESS {
        Ok(())
    } else {
        debug!(?result, "BLS signature verification failed");
        Err(CryptoError::VerificationFailed)
    }
}

/// Aggregate independently produced signatures into one compact signature.
pub fn aggregate_signatures(signatures: &[BlsSignature]) -> Result<BlsSignature, CryptoError> {
    if signatures.is_empty() {
        return Err(CryptoError::AggregationError(
            "Cannot aggregate empty signature list".to_string(),
        ));
    }

    let sigs: Vec<Signature> = signatures
        .iter()
        .map(|s| Signature::from_bytes(s.as_bytes()).map_err(|_| CryptoError::InvalidSignature))
        .collect::<Result<Vec<_>, _>>()?;

    let aggregate = AggregateSignature::aggregate(&sigs.iter().collect::<Vec<_>>(), true)
        .map_err(|e| CryptoError::AggregationError(format!("{:?}", e)))?;

    Ok(BlsSignature::from_bytes(
        aggregate.to_signature().to_bytes(),
    ))
}

/// Aggregate public keys into one; used for same-message verification.
pub fn aggregate_public_keys(public_keys: &[BlsPublicKey]) -> Result<BlsPublicKey, CryptoError> {
    if public_keys.is_empty() {
        return Err(CryptoError::AggregationError(
            "Cannot aggregate empty public key list".to_string(),
        ));
    }

    let pks: Vec<PublicKey> = public_keys
        .iter()
        .map(|pk| PublicKey::from_bytes(pk.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey))
        .collect::<Result<Vec<_>, _>>()?;

    let aggregate = AggregatePublicKey::aggregate(&pks.iter().collect::<Vec<_>>(), true)
        .map_err(|e| CryptoError::AggregationError(format!("{:?}", e)))?;

    Ok(BlsPublicKey::from_bytes(
        aggregate.to_public_key().to_bytes(),
    ))
}

/// Verify an aggregate signature where every signer signed the same message.
///
/// Fast path: aggregate the public keys once and verify a single pairing.
/// A one-element signer set degenerates to plain verification, so this is
/// also the verification entry point for single-signer envelopes.
pub fn verify_aggregate(
    public_keys: &[BlsPublicKey],
    message: &[u8],
    aggregate_signature: &BlsSignature,
) -> Result<(), CryptoError> {
    let agg_pk = aggregate_public_keys(public_keys)?;
    verify(&agg_pk, message, aggregate_signature)
}

/// Verify an aggregate signature where each signer signed its own message.
pub fn verify_multi(
    items: &[(BlsPublicKey, Vec<u8>)],
    aggregate_signature: &BlsSignature,
) -> Result<(), CryptoError> {
    let pks: Vec<PublicKey> = items
        .iter()
        .map(|(pk, _)| {
            PublicKey::from_bytes(pk.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let msgs: Vec<&[u8]> = items.iter().map(|(_, msg)| msg.as_slice()).collect();

    let sig = Signature::from_bytes(aggregate_signature.as_bytes())
        .map_err(|_| CryptoError::InvalidSignature)?;

    let pk_refs: Vec<&PublicKey> = pks.iter().collect();
    let result = sig.aggregate_verify(true, &msgs, DST, &pk_refs, true);
    if result == blst::BLST_ERROR::BLST_SUCCESS {
        Ok(())
    } else {
        debug!(?result, "BLS aggregate verification failed");
        Err(CryptoError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair(seed: u8) -> BlsKeypair {
        BlsKeypair::from_ikm(&[seed; 32]).unwrap()
    }

    #[test]
    fn test_keypair_generation() {
        let kp = BlsKeypair::generate().unwrap();
        assert!(!kp.public_key().is_zero());
    }

    #[test]
    fn test_secret_key_round_trip() {
        let kp = keypair(7);
        let restored = BlsKeypair::from_secret_bytes(&kp.to_bytes()).unwrap();
        assert_eq!(kp.public_key(), restored.public_key());
    }

    #[test]
    fn test_sign_and_verify() {
        let kp = keypair(1);
        let message = b"permit the swap";

        let signature = kp.sign(message);
        assert!(verify(&kp.public_key(), message, &signature).is_ok());

        assert_eq!(
            verify(&kp.public_key(), b"different message", &signature),
            Err(CryptoError::VerificationFailed)
        );
    }

    #[test]
    fn test_aggregate_same_message() {
        let keypairs: Vec<BlsKeypair> = (0..10).map(keypair).collect();
        let message = b"common message";

        let signatures: Vec<BlsSignature> = keypairs.iter().map(|kp| kp.sign(message)).collect();
        let aggregate = aggregate_signatures(&signatures).unwrap();

        let pks: Vec<BlsPublicKey> = keypairs.iter().map(|kp| kp.public_key()).collect();
        assert!(verify_aggregate(&pks, message, &aggregate).is_ok());
    }

    #[test]
    fn test_aggregate_fails_on_mixed_messages() {
        let a = keypair(1);
        let b = keypair(2);

        let signatures = [a.sign(b"message one"), b.sign(b"message two")];
        let aggregate = aggregate_signatures(&signatures).unwrap();

        // Verified as if both signed "message one": must fail closed.
        let pks = [a.public_key(), b.public_key()];
        assert_eq!(
            verify_aggregate(&pks, b"message one", &aggregate),
            Err(CryptoError::VerificationFailed)
        );
    }

    #[test]
    fn test_verify_multi_distinct_messages() {
        let keypairs: Vec<BlsKeypair> = (0..5).map(keypair).collect();
        let items: Vec<(BlsPublicKey, Vec<u8>)> = keypairs
            .iter()
            .enumerate()
            .map(|(i, kp)| (kp.public_key(), format!("message {}", i).into_bytes()))
            .collect();

        let signatures: Vec<BlsSignature> = items
            .iter()
            .enumerate()
            .map(|(i, (_, msg))| keypairs[i].sign(msg))
            .collect();
        let aggregate = aggregate_signatures(&signatures).unwrap();

        assert!(verify_multi(&items, &aggregate).is_ok());
    }

    #[test]
    fn test_empty_aggregate_fails() {
        assert!(aggregate_signatures(&[]).is_err());
        assert!(aggregate_public_keys(&[]).is_err());
    }
}
