use crate::error::ConstructionError;
use std::fmt;

/// BLS12-381 public key (48 bytes, min_pk compressed form).
///
/// Doubles as the account identifier on the ledger; the wire form is the
/// bare lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlsPublicKey([u8; 48]);

impl BlsPublicKey {
    pub const LEN: usize = 48;

    pub fn from_bytes(bytes: [u8; 48]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, ConstructionError> {
        if slice.len() != Self::LEN {
            return Err(ConstructionError::InvalidPublicKeyLength(slice.len()));
        }
        let mut bytes = [0u8; 48];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, ConstructionError> {
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl fmt::Debug for BlsPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlsPublicKey(0x{}...)", &hex::encode(&self.0[..8]))
    }
}

impl fmt::LowerHex for BlsPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// BLS12-381 signature (96 bytes, compressed G2 point).
///
/// May represent either one party's signature or the aggregate of several
/// parties' signatures over the same message.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlsSignature([u8; 96]);

impl BlsSignature {
    pub const LEN: usize = 96;

    pub fn from_bytes(bytes: [u8; 96]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, ConstructionError> {
        if slice.len() != Self::LEN {
            return Err(ConstructionError::InvalidSignatureLength(slice.len()));
        }
        let mut bytes = [0u8; 96];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, ConstructionError> {
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; 96] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl fmt::Debug for BlsSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlsSignature(0x{}...)", &hex::encode(&self.0[..8]))
    }
}

impl fmt::LowerHex for BlsSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
