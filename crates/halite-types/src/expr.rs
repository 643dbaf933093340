use crate::error::ConstructionError;
use crate::intent::{Intent, Relation};
use crate::token::Token;
use serde_json::Number;

/// Binary arithmetic operator usable inside expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Div,
    Mul,
    Sub,
}

impl ArithOp {
    /// Wire name of this operator.
    pub fn name(&self) -> &'static str {
        match self {
            ArithOp::Add => "Add",
            ArithOp::Div => "Div",
            ArithOp::Mul => "Mul",
            ArithOp::Sub => "Sub",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "Add" => Some(ArithOp::Add),
            "Div" => Some(ArithOp::Div),
            "Mul" => Some(ArithOp::Mul),
            "Sub" => Some(ArithOp::Sub),
            _ => None,
        }
    }
}

/// One token flow touched by the transaction under evaluation.
///
/// `target` optionally pins the counterparty side of the flow; `None`
/// matches any counterparty.
#[derive(Clone, Debug, PartialEq)]
pub struct Flow {
    pub target: Option<Box<Expr>>,
    pub token: Token,
}

impl Flow {
    /// Flow of `token` with no counterparty constraint.
    pub fn of(token: Token) -> Self {
        Self {
            target: None,
            token,
        }
    }

    /// Flow of `token` pinned to the counterparty named by `target`.
    pub fn targeting(target: Expr, token: Token) -> Self {
        Self {
            target: Some(Box::new(target)),
            token,
        }
    }
}

/// Value-producing expression, evaluated by the ledger inside a
/// [`Restriction`](crate::intent::Intent::Restriction).
///
/// Trees are strict (no sharing, no cycles) and immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Constant number. Integer and fractional literals are distinct wire
    /// values; the codec never normalizes one into the other.
    Lit { value: Number },
    /// Balance of `token` held by the account hosting the intent.
    Balance { token: Token },
    /// Amount of the flow's token entering the account.
    Receive { flow: Flow },
    /// Amount of the flow's token leaving the account.
    Send { flow: Flow },
    /// Binary arithmetic over two sub-expressions.
    Arithmetic {
        lhs: Box<Expr>,
        op: ArithOp,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Integer literal.
    pub fn lit(value: impl Into<Number>) -> Self {
        Expr::Lit {
            value: value.into(),
        }
    }

    /// Fractional literal. Rejects NaN and infinities, which have no wire
    /// representation.
    pub fn lit_float(value: f64) -> Result<Self, ConstructionError> {
        Number::from_f64(value)
            .map(|value| Expr::Lit { value })
            .ok_or(ConstructionError::NonFiniteLiteral)
    }

    pub fn balance(token: Token) -> Self {
        Expr::Balance { token }
    }

    /// Amount of `token` entering the account, from any counterparty.
    pub fn receive(token: Token) -> Self {
        Expr::Receive {
            flow: Flow::of(token),
        }
    }

    /// Amount of `token` leaving the account, to any counterparty.
    pub fn send(token: Token) -> Self {
        Expr::Send {
            flow: Flow::of(token),
        }
    }

    /// Amount of `token` entering the account from the given counterparty.
    pub fn receive_from(target: Expr, token: Token) -> Self {
        Expr::Receive {
            flow: Flow::targeting(target, token),
        }
    }

    /// Amount of `token` leaving the account to the given counterparty.
    pub fn send_to(target: Expr, token: Token) -> Self {
        Expr::Send {
            flow: Flow::targeting(target, token),
        }
    }

    pub fn arithmetic(lhs: Expr, op: ArithOp, rhs: Expr) -> Self {
        Expr::Arithmetic {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    // Arithmetic sugar. Pure value constructors: operands are consumed,
    // never mutated, and tree shape is preserved exactly as authored.

    pub fn add(self, rhs: Expr) -> Self {
        Expr::arithmetic(self, ArithOp::Add, rhs)
    }

    pub fn sub(self, rhs: Expr) -> Self {
        Expr::arithmetic(self, ArithOp::Sub, rhs)
    }

    pub fn mul(self, rhs: Expr) -> Self {
        Expr::arithmetic(self, ArithOp::Mul, rhs)
    }

    pub fn div(self, rhs: Expr) -> Self {
        Expr::arithmetic(self, ArithOp::Div, rhs)
    }

    // Comparison sugar, yielding restriction predicates.

    pub fn lt(self, rhs: Expr) -> Intent {
        Intent::restriction(self, Relation::Lt, rhs)
    }

    pub fn le(self, rhs: Expr) -> Intent {
        Intent::restriction(self, Relation::Le, rhs)
    }

    /// Equality restriction. Named `equals` so it does not shadow
    /// [`PartialEq::eq`].
    pub fn equals(self, rhs: Expr) -> Intent {
        Intent::restriction(self, Relation::Eq, rhs)
    }

    pub fn ge(self, rhs: Expr) -> Intent {
        Intent::restriction(self, Relation::Ge, rhs)
    }

    pub fn gt(self, rhs: Expr) -> Intent {
        Intent::restriction(self, Relation::Gt, rhs)
    }
}
