//! Canonical wire codec for the Halite schema.
//!
//! Every codable type maps to a `serde_json::Value` tree whose objects carry
//! an explicit `"tag"` discriminant and whose keys are emitted in sorted
//! order with compact separators. `serde_json`'s default map is ordered by
//! key, so building through it and serializing compactly reproduces the
//! ledger schema's bytes exactly — the property multi-party signing depends
//! on: two independently built equal values encode byte-identically.
//!
//! Decoding is recursive descent on the discriminant. Unknown tags, missing
//! or mistyped fields, and post-parse invariant violations reject the whole
//! payload with a [`DecodeError`]; nothing is coerced or defaulted.
//!
//! The field tables below are the single source of truth for the schema
//! contract; tags and field names must not be renamed independently of it.

use crate::error::DecodeError;
use crate::expr::{ArithOp, Expr, Flow};
use crate::instruction::Instruction;
use crate::intent::{Intent, Relation};
use crate::signature::{BlsPublicKey, BlsSignature};
use crate::token::Token;
use crate::transaction::{Signed, Transaction};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Canonical encode/decode pair satisfying `decode(encode(x)) == x` for
/// every constructible `x`.
pub trait Canonical: Sized {
    /// Canonical JSON value of `self`.
    fn to_value(&self) -> Value;

    /// Inverse of [`to_value`](Canonical::to_value); rejects malformed or
    /// invariant-violating values.
    fn from_value(value: &Value) -> Result<Self, DecodeError>;

    /// Canonical bytes: compact JSON of the canonical value.
    fn encode(&self) -> Vec<u8> {
        // String-keyed Value trees cannot fail to serialize.
        serde_json::to_vec(&self.to_value()).expect("canonical value serializes")
    }

    /// Canonical bytes as a string, for logging and envelope assembly.
    fn encode_to_string(&self) -> String {
        serde_json::to_string(&self.to_value()).expect("canonical value serializes")
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        Self::from_value(&value)
    }
}

fn tagged(tag: &str, fields: Vec<(&'static str, Value)>) -> Value {
    let mut map = Map::new();
    map.insert("tag".to_string(), Value::String(tag.to_string()));
    for (name, value) in fields {
        map.insert(name.to_string(), value);
    }
    Value::Object(map)
}

fn untagged(fields: Vec<(&'static str, Value)>) -> Value {
    let mut map = Map::new();
    for (name, value) in fields {
        map.insert(name.to_string(), value);
    }
    Value::Object(map)
}

fn as_obj<'a>(value: &'a Value, kind: &'static str) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or(DecodeError::TypeMismatch {
        kind,
        field: "value",
        expected: "object",
    })
}

fn field<'a>(
    map: &'a Map<String, Value>,
    kind: &'static str,
    name: &'static str,
) -> Result<&'a Value, DecodeError> {
    map.get(name)
        .ok_or(DecodeError::MissingField { kind, field: name })
}

fn str_field<'a>(
    map: &'a Map<String, Value>,
    kind: &'static str,
    name: &'static str,
) -> Result<&'a str, DecodeError> {
    field(map, kind, name)?
        .as_str()
        .ok_or(DecodeError::TypeMismatch {
            kind,
            field: name,
            expected: "string",
        })
}

fn u64_field(
    map: &Map<String, Value>,
    kind: &'static str,
    name: &'static str,
) -> Result<u64, DecodeError> {
    field(map, kind, name)?
        .as_u64()
        .ok_or(DecodeError::TypeMismatch {
            kind,
            field: name,
            expected: "unsigned integer",
        })
}

fn bool_field(
    map: &Map<String, Value>,
    kind: &'static str,
    name: &'static str,
) -> Result<bool, DecodeError> {
    field(map, kind, name)?
        .as_bool()
        .ok_or(DecodeError::TypeMismatch {
            kind,
            field: name,
            expected: "boolean",
        })
}

fn array_field<'a>(
    map: &'a Map<String, Value>,
    kind: &'static str,
    name: &'static str,
) -> Result<&'a Vec<Value>, DecodeError> {
    field(map, kind, name)?
        .as_array()
        .ok_or(DecodeError::TypeMismatch {
            kind,
            field: name,
            expected: "array",
        })
}

fn number_field<'a>(
    map: &'a Map<String, Value>,
    kind: &'static str,
    name: &'static str,
) -> Result<&'a Number, DecodeError> {
    match field(map, kind, name)? {
        Value::Number(n) => Ok(n),
        _ => Err(DecodeError::TypeMismatch {
            kind,
            field: name,
            expected: "number",
        }),
    }
}

fn tag_of<'a>(map: &'a Map<String, Value>, kind: &'static str) -> Result<&'a str, DecodeError> {
    str_field(map, kind, "tag")
}

// --- Leaves -----------------------------------------------------------------

impl Canonical for Token {
    fn to_value(&self) -> Value {
        Value::String(self.name().to_string())
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let name = value.as_str().ok_or(DecodeError::TypeMismatch {
            kind: "Token",
            field: "value",
            expected: "string",
        })?;
        Ok(name.parse()?)
    }
}

impl Canonical for Relation {
    fn to_value(&self) -> Value {
        Value::String(self.name().to_string())
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let name = value.as_str().ok_or(DecodeError::TypeMismatch {
            kind: "Relation",
            field: "value",
            expected: "string",
        })?;
        Relation::from_name(name).ok_or_else(|| DecodeError::UnknownTag {
            kind: "Relation",
            tag: name.to_string(),
        })
    }
}

impl Canonical for ArithOp {
    fn to_value(&self) -> Value {
        Value::String(self.name().to_string())
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let name = value.as_str().ok_or(DecodeError::TypeMismatch {
            kind: "ArithOp",
            field: "value",
            expected: "string",
        })?;
        ArithOp::from_name(name).ok_or_else(|| DecodeError::UnknownTag {
            kind: "ArithOp",
            tag: name.to_string(),
        })
    }
}

impl Canonical for BlsPublicKey {
    fn to_value(&self) -> Value {
        Value::String(self.to_hex())
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let hex = value.as_str().ok_or(DecodeError::TypeMismatch {
            kind: "BlsPublicKey",
            field: "value",
            expected: "string",
        })?;
        Ok(BlsPublicKey::from_hex(hex)?)
    }
}

impl Canonical for BlsSignature {
    fn to_value(&self) -> Value {
        Value::String(self.to_hex())
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let hex = value.as_str().ok_or(DecodeError::TypeMismatch {
            kind: "BlsSignature",
            field: "value",
            expected: "string",
        })?;
        Ok(BlsSignature::from_hex(hex)?)
    }
}

// --- Expressions ------------------------------------------------------------

impl Canonical for Flow {
    fn to_value(&self) -> Value {
        let target = match &self.target {
            Some(expr) => expr.to_value(),
            None => Value::Null,
        };
        untagged(vec![("target", target), ("token", self.token.to_value())])
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let map = as_obj(value, "Flow")?;
        let target = match field(map, "Flow", "target")? {
            Value::Null => None,
            other => Some(Box::new(Expr::from_value(other)?)),
        };
        let token = Token::from_value(field(map, "Flow", "token")?)?;
        Ok(Flow { target, token })
    }
}

impl Canonical for Expr {
    fn to_value(&self) -> Value {
        match self {
            Expr::Lit { value } => {
                tagged("Lit", vec![("value", Value::Number(value.clone()))])
            }
            Expr::Balance { token } => tagged("Balance", vec![("token", token.to_value())]),
            Expr::Receive { flow } => tagged("Receive", vec![("flow", flow.to_value())]),
            Expr::Send { flow } => tagged("Send", vec![("flow", flow.to_value())]),
            Expr::Arithmetic { lhs, op, rhs } => tagged(
                "Arithmetic2",
                vec![
                    ("lhs", lhs.to_value()),
                    ("operation", op.to_value()),
                    ("rhs", rhs.to_value()),
                ],
            ),
        }
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let map = as_obj(value, "Expr")?;
        match tag_of(map, "Expr")? {
            "Lit" => Ok(Expr::Lit {
                value: number_field(map, "Lit", "value")?.clone(),
            }),
            "Balance" => Ok(Expr::Balance {
                token: Token::from_value(field(map, "Balance", "token")?)?,
            }),
            "Receive" => Ok(Expr::Receive {
                flow: Flow::from_value(field(map, "Receive", "flow")?)?,
            }),
            "Send" => Ok(Expr::Send {
                flow: Flow::from_value(field(map, "Send", "flow")?)?,
            }),
            "Arithmetic2" => Ok(Expr::Arithmetic {
                lhs: Box::new(Expr::from_value(field(map, "Arithmetic2", "lhs")?)?),
                op: ArithOp::from_value(field(map, "Arithmetic2", "operation")?)?,
                rhs: Box::new(Expr::from_value(field(map, "Arithmetic2", "rhs")?)?),
            }),
            other => Err(DecodeError::UnknownTag {
                kind: "Expr",
                tag: other.to_string(),
            }),
        }
    }
}

// --- Intents ----------------------------------------------------------------

impl Canonical for Intent {
    fn to_value(&self) -> Value {
        match self {
            Intent::All { children } => tagged(
                "All",
                vec![(
                    "children",
                    Value::Array(children.iter().map(Canonical::to_value).collect()),
                )],
            ),
            Intent::Any {
                threshold,
                children,
            } => tagged(
                "Any",
                vec![
                    (
                        "children",
                        Value::Array(children.iter().map(Canonical::to_value).collect()),
                    ),
                    ("threshold", Value::Number(Number::from(*threshold))),
                ],
            ),
            Intent::Restriction { lhs, relation, rhs } => tagged(
                "Restriction",
                vec![
                    ("lhs", lhs.to_value()),
                    ("relation", relation.to_value()),
                    ("rhs", rhs.to_value()),
                ],
            ),
            Intent::Finite { uses, inner } => tagged(
                "Finite",
                vec![
                    ("inner", inner.to_value()),
                    ("uses", Value::Number(Number::from(*uses))),
                ],
            ),
            Intent::Temporary {
                expiry,
                available_after,
                inner,
            } => tagged(
                "Temporary",
                vec![
                    ("availableAfter", Value::Bool(*available_after)),
                    ("duration", Value::Number(Number::from(*expiry))),
                    ("inner", inner.to_value()),
                ],
            ),
            Intent::Signature { signer } => {
                tagged("Signature", vec![("signer", signer.to_value())])
            }
            Intent::Counterparty { counterparty } => {
                tagged("Counterparty", vec![("counterparty", counterparty.to_value())])
            }
        }
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let map = as_obj(value, "Intent")?;
        match tag_of(map, "Intent")? {
            "All" => {
                let children = decode_children(map, "All")?;
                Ok(Intent::all(children)?)
            }
            "Any" => {
                let children = decode_children(map, "Any")?;
                let threshold = u64_field(map, "Any", "threshold")?;
                Ok(Intent::any(threshold, children)?)
            }
            "Restriction" => Ok(Intent::Restriction {
                lhs: Expr::from_value(field(map, "Restriction", "lhs")?)?,
                relation: Relation::from_value(field(map, "Restriction", "relation")?)?,
                rhs: Expr::from_value(field(map, "Restriction", "rhs")?)?,
            }),
            "Finite" => {
                let uses = u64_field(map, "Finite", "uses")?;
                let inner = Intent::from_value(field(map, "Finite", "inner")?)?;
                Ok(Intent::finite(uses, inner)?)
            }
            "Temporary" => Ok(Intent::temporary(
                u64_field(map, "Temporary", "duration")?,
                bool_field(map, "Temporary", "availableAfter")?,
                Intent::from_value(field(map, "Temporary", "inner")?)?,
            )),
            "Signature" => Ok(Intent::Signature {
                signer: BlsPublicKey::from_value(field(map, "Signature", "signer")?)?,
            }),
            "Counterparty" => Ok(Intent::Counterparty {
                counterparty: BlsPublicKey::from_value(field(
                    map,
                    "Counterparty",
                    "counterparty",
                )?)?,
            }),
            other => Err(DecodeError::UnknownTag {
                kind: "Intent",
                tag: other.to_string(),
            }),
        }
    }
}

fn decode_children(
    map: &Map<String, Value>,
    kind: &'static str,
) -> Result<Vec<Intent>, DecodeError> {
    array_field(map, kind, "children")?
        .iter()
        .map(Intent::from_value)
        .collect()
}

// --- Instructions and envelopes ---------------------------------------------

impl Canonical for Instruction {
    fn to_value(&self) -> Value {
        match self {
            Instruction::TransferFunds {
                source,
                target,
                funds,
            } => {
                let entries = funds
                    .iter()
                    .map(|(token, amount)| {
                        Value::Array(vec![token.to_value(), Value::Number(amount.clone())])
                    })
                    .collect();
                tagged(
                    "TransferFunds",
                    vec![
                        ("funds", Value::Array(entries)),
                        ("source", source.to_value()),
                        ("target", target.to_value()),
                    ],
                )
            }
            Instruction::SetIntent { host, intent } => {
                let intent = match intent {
                    Some(intent) => intent.to_value(),
                    None => Value::Null,
                };
                tagged(
                    "SetIntent",
                    vec![("host", host.to_value()), ("intent", intent)],
                )
            }
        }
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let map = as_obj(value, "Instruction")?;
        match tag_of(map, "Instruction")? {
            "TransferFunds" => {
                let source = BlsPublicKey::from_value(field(map, "TransferFunds", "source")?)?;
                let target = BlsPublicKey::from_value(field(map, "TransferFunds", "target")?)?;
                let funds = decode_funds(map)?;
                Ok(Instruction::transfer_funds(source, target, funds)?)
            }
            "SetIntent" => {
                let host = BlsPublicKey::from_value(field(map, "SetIntent", "host")?)?;
                let intent = match field(map, "SetIntent", "intent")? {
                    Value::Null => None,
                    other => Some(Intent::from_value(other)?),
                };
                Ok(Instruction::SetIntent { host, intent })
            }
            other => Err(DecodeError::UnknownTag {
                kind: "Instruction",
                tag: other.to_string(),
            }),
        }
    }
}

fn decode_funds(map: &Map<String, Value>) -> Result<BTreeMap<Token, Number>, DecodeError> {
    let entries = array_field(map, "TransferFunds", "funds")?;
    let mut funds = BTreeMap::new();
    for entry in entries {
        let pair = entry.as_array().filter(|p| p.len() == 2).ok_or(
            DecodeError::TypeMismatch {
                kind: "TransferFunds",
                field: "funds",
                expected: "array of [token, amount] pairs",
            },
        )?;
        let token = Token::from_value(&pair[0])?;
        let amount = match &pair[1] {
            Value::Number(n) => n.clone(),
            _ => {
                return Err(DecodeError::TypeMismatch {
                    kind: "TransferFunds",
                    field: "funds",
                    expected: "number amount",
                })
            }
        };
        if funds.insert(token.clone(), amount).is_some() {
            return Err(DecodeError::DuplicateFundToken(token.name().to_string()));
        }
    }
    Ok(funds)
}

impl Canonical for Transaction {
    fn to_value(&self) -> Value {
        untagged(vec![(
            "instructions",
            Value::Array(self.instructions().iter().map(Canonical::to_value).collect()),
        )])
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let map = as_obj(value, "Transaction")?;
        let instructions = array_field(map, "Transaction", "instructions")?
            .iter()
            .map(Instruction::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Transaction::new(instructions)?)
    }
}

impl Canonical for Signed {
    fn to_value(&self) -> Value {
        untagged(vec![
            ("nonce", Value::String(self.nonce().to_string())),
            ("signature", self.signature().to_value()),
            ("signee", self.signee().to_value()),
            (
                "signers",
                Value::Array(self.signers().iter().map(Canonical::to_value).collect()),
            ),
        ])
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let map = as_obj(value, "Signed")?;
        let nonce = str_field(map, "Signed", "nonce")?;
        let signature = BlsSignature::from_value(field(map, "Signed", "signature")?)?;
        let signee = Transaction::from_value(field(map, "Signed", "signee")?)?;
        let signers = array_field(map, "Signed", "signers")?
            .iter()
            .map(BlsPublicKey::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Signed::new(nonce, signature, signee, signers)?)
    }
}
