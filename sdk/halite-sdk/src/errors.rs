//! Error types for the SDK.

use thiserror::Error;

/// SDK result type.
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK errors.
///
/// Remote rejection of a submitted transaction is deliberately absent: the
/// ledger's verdict is a structured result value returned through the
/// transport contract, not an error of this SDK.
#[derive(Error, Debug, Clone)]
pub enum SdkError {
    /// A value violated a structural invariant at construction time
    #[error(transparent)]
    Construction(#[from] halite_types::ConstructionError),

    /// Wire bytes failed to decode
    #[error(transparent)]
    Decode(#[from] halite_types::DecodeError),

    /// A cryptographic operation failed
    #[error(transparent)]
    Crypto(#[from] halite_crypto::CryptoError),

    /// Network envelope wrapping/unwrapping failed
    #[error("Envelope error: {0}")]
    Envelope(String),

    /// Wallet error
    #[error("Wallet error: {0}")]
    Wallet(String),
}
