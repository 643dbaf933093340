use thiserror::Error;

/// A value violated a structural invariant at construction time.
///
/// Always local and synchronous; never deferred to encode time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("Token name must not be empty")]
    EmptyTokenName,

    #[error("Token name '{0}' is reserved by the registry")]
    ReservedTokenName(String),

    #[error("Literal must be a finite number")]
    NonFiniteLiteral,

    #[error("'{0}' requires at least one child intent")]
    EmptyChildren(&'static str),

    #[error("Threshold {threshold} exceeds child count {children}")]
    ThresholdOutOfRange { threshold: u64, children: usize },

    #[error("Finite intent requires a positive use count")]
    ZeroUses,

    #[error("Transfer requires at least one fund entry")]
    EmptyFunds,

    #[error("Transfer amount for {token} must be positive")]
    NonPositiveAmount { token: String },

    #[error("Transaction requires at least one instruction")]
    EmptyTransaction,

    #[error("Signed transaction requires at least one signer")]
    EmptySigners,

    #[error("Invalid public key length: expected 48, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error("Invalid signature length: expected 96, got {0}")]
    InvalidSignatureLength(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for ConstructionError {
    fn from(e: hex::FromHexError) -> Self {
        ConstructionError::InvalidHex(e.to_string())
    }
}

/// Wire bytes failed to decode into a well-formed value.
///
/// Decoding never coerces: an unknown discriminant, a missing or mistyped
/// field, or a post-parse invariant violation all reject the whole payload.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Unknown tag '{tag}' for {kind}")]
    UnknownTag { kind: &'static str, tag: String },

    #[error("Missing field '{field}' in {kind}")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("Field '{field}' in {kind}: expected {expected}")]
    TypeMismatch {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Duplicate fund entry for token {0}")]
    DuplicateFundToken(String),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}
