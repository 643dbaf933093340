//! Key provider capability and the local keypair wallet.

use crate::errors::{Result, SdkError};
use halite_crypto::BlsKeypair;
use halite_types::{BlsPublicKey, BlsSignature};

/// Signing capability of one logical party.
///
/// The signing protocol treats implementors as opaque: it sees a public key
/// and a way to sign bytes, never private key material. External providers
/// (remote signers, hardware keys) implement this alongside [`Wallet`].
pub trait Signer {
    fn public_key(&self) -> BlsPublicKey;

    fn sign(&self, message: &[u8]) -> Result<BlsSignature>;
}

/// In-process wallet holding a BLS keypair.
pub struct Wallet {
    keypair: BlsKeypair,
}

impl Wallet {
    /// Create a new random wallet.
    pub fn generate() -> Result<Self> {
        let keypair = BlsKeypair::generate()?;
        Ok(Self { keypair })
    }

    /// Derive a wallet from 32 bytes of input keying material.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self> {
        let keypair = BlsKeypair::from_ikm(seed)?;
        Ok(Self { keypair })
    }

    /// Restore a wallet from serialized secret key bytes, the inverse of
    /// [`export_hex`](Wallet::export_hex).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let keypair = BlsKeypair::from_secret_bytes(bytes)?;
        Ok(Self { keypair })
    }

    /// Load a wallet from a hex string (a leading `0x` is tolerated).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim_start_matches("0x");
        let bytes =
            hex::decode(hex).map_err(|e| SdkError::Wallet(format!("Invalid hex: {}", e)))?;

        if bytes.len() != 32 {
            return Err(SdkError::Wallet("Invalid key length".to_string()));
        }

        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(&bytes);

        Self::from_bytes(&key_bytes)
    }

    /// Export the keying material as hex.
    pub fn export_hex(&self) -> String {
        format!("0x{}", hex::encode(self.keypair.to_bytes()))
    }
}

impl Signer for Wallet {
    fn public_key(&self) -> BlsPublicKey {
        self.keypair.public_key()
    }

    fn sign(&self, message: &[u8]) -> Result<BlsSignature> {
        Ok(self.keypair.sign(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_generation() {
        let wallet = Wallet::generate().unwrap();
        assert!(!wallet.public_key().is_zero());
    }

    #[test]
    fn test_wallet_from_bytes_is_deterministic() {
        let a = Wallet::from_bytes(&[9u8; 32]).unwrap();
        let b = Wallet::from_bytes(&[9u8; 32]).unwrap();
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_wallet_sign_verifies() {
        let wallet = Wallet::from_bytes(&[3u8; 32]).unwrap();
        let message = b"hello halite";
        let signature = wallet.sign(message).unwrap();
        assert!(halite_crypto::verify(&wallet.public_key(), message, &signature).is_ok());
    }

    #[test]
    fn test_wallet_from_hex_rejects_bad_input() {
        assert!(Wallet::from_hex("zzzz").is_err());
        assert!(Wallet::from_hex("0x0102").is_err());
    }
}
