use crate::error::ConstructionError;
use crate::expr::Expr;
use crate::signature::BlsPublicKey;

/// Comparison relation inside a restriction predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    /// Wire name of this relation.
    pub fn name(&self) -> &'static str {
        match self {
            Relation::Eq => "EQ",
            Relation::Lt => "LT",
            Relation::Le => "LE",
            Relation::Gt => "GT",
            Relation::Ge => "GE",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "EQ" => Some(Relation::Eq),
            "LT" => Some(Relation::Lt),
            "LE" => Some(Relation::Le),
            "GT" => Some(Relation::Gt),
            "GE" => Some(Relation::Ge),
            _ => None,
        }
    }
}

/// Predicate tree installed on an account and evaluated by the ledger to
/// permit or deny a transaction.
///
/// Trees are immutable once built. The SDK only guarantees structure; the
/// evaluation semantics live on the ledger.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Every child must be satisfied.
    All { children: Vec<Intent> },
    /// At least `threshold` children must be satisfied. Threshold 0 is
    /// vacuously true; a threshold above the child count is rejected at
    /// construction.
    Any {
        threshold: u64,
        children: Vec<Intent>,
    },
    /// `lhs relation rhs` over two value expressions.
    Restriction {
        lhs: Expr,
        relation: Relation,
        rhs: Expr,
    },
    /// Inner intent usable at most `uses` times; the remaining-use counter
    /// is tracked by the ledger, not by this SDK.
    Finite { uses: u64, inner: Box<Intent> },
    /// Inner intent gated by time: valid only after `expiry` when
    /// `available_after` is set, only before it otherwise.
    Temporary {
        expiry: u64,
        available_after: bool,
        inner: Box<Intent>,
    },
    /// Requires a valid signature from `signer` over the enclosing
    /// transaction.
    Signature { signer: BlsPublicKey },
    /// Requires every relevant flow's counterparty to equal `counterparty`.
    Counterparty { counterparty: BlsPublicKey },
}

impl Intent {
    /// Conjunction of all `children`.
    pub fn all(children: Vec<Intent>) -> Result<Self, ConstructionError> {
        if children.is_empty() {
            return Err(ConstructionError::EmptyChildren("All"));
        }
        Ok(Intent::All { children })
    }

    /// Threshold disjunction: at least `threshold` of `children`.
    pub fn any(threshold: u64, children: Vec<Intent>) -> Result<Self, ConstructionError> {
        if children.is_empty() {
            return Err(ConstructionError::EmptyChildren("Any"));
        }
        if threshold > children.len() as u64 {
            return Err(ConstructionError::ThresholdOutOfRange {
                threshold,
                children: children.len(),
            });
        }
        Ok(Intent::Any {
            threshold,
            children,
        })
    }

    pub fn restriction(lhs: Expr, relation: Relation, rhs: Expr) -> Self {
        Intent::Restriction { lhs, relation, rhs }
    }

    pub fn finite(uses: u64, inner: Intent) -> Result<Self, ConstructionError> {
        if uses == 0 {
            return Err(ConstructionError::ZeroUses);
        }
        Ok(Intent::Finite {
            uses,
            inner: Box::new(inner),
        })
    }

    pub fn temporary(expiry: u64, available_after: bool, inner: Intent) -> Self {
        Intent::Temporary {
            expiry,
            available_after,
            inner: Box::new(inner),
        }
    }

    pub fn signature(signer: BlsPublicKey) -> Self {
        Intent::Signature { signer }
    }

    pub fn counterparty(counterparty: BlsPublicKey) -> Self {
        Intent::Counterparty { counterparty }
    }

    /// Logical AND: `All([self, other])`. No flattening of nested `All`
    /// nodes — downstream evaluation is structural, so tree shape is kept
    /// exactly as authored.
    pub fn and(self, other: Intent) -> Intent {
        Intent::All {
            children: vec![self, other],
        }
    }

    /// Logical OR: `Any(1, [self, other])`.
    pub fn or(self, other: Intent) -> Intent {
        Intent::Any {
            threshold: 1,
            children: vec![self, other],
        }
    }
}
