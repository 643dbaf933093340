//! Round-trip law: decode(encode(x)) == x for every constructible value.

use halite_types::prelude::*;
use proptest::prelude::*;
use serde_json::Number;
use std::collections::BTreeMap;

fn token_strategy() -> impl Strategy<Value = Token> {
    prop_oneof![
        Just(Token::Btc),
        Just(Token::Eth),
        Just(Token::Usdc),
        Just(Token::Usdt),
        Just(Token::Salt),
        // Lowercase names never collide with the uppercase registry.
        "[a-z]{3,8}".prop_map(|name| Token::custom(name).unwrap()),
    ]
}

fn number_strategy() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<u64>().prop_map(Number::from),
        any::<i64>().prop_map(Number::from),
        (-1.0e12f64..1.0e12).prop_map(|f| Number::from_f64(f).unwrap()),
    ]
}

fn positive_amount_strategy() -> impl Strategy<Value = Number> {
    prop_oneof![
        (1u64..u64::MAX).prop_map(Number::from),
        (1.0e-6f64..1.0e12).prop_map(|f| Number::from_f64(f).unwrap()),
    ]
}

fn public_key_strategy() -> impl Strategy<Value = BlsPublicKey> {
    prop::collection::vec(any::<u8>(), 48)
        .prop_map(|bytes| BlsPublicKey::from_slice(&bytes).unwrap())
}

fn signature_strategy() -> impl Strategy<Value = BlsSignature> {
    prop::collection::vec(any::<u8>(), 96)
        .prop_map(|bytes| BlsSignature::from_slice(&bytes).unwrap())
}

fn relation_strategy() -> impl Strategy<Value = Relation> {
    prop_oneof![
        Just(Relation::Eq),
        Just(Relation::Lt),
        Just(Relation::Le),
        Just(Relation::Gt),
        Just(Relation::Ge),
    ]
}

fn arith_op_strategy() -> impl Strategy<Value = ArithOp> {
    prop_oneof![
        Just(ArithOp::Add),
        Just(ArithOp::Div),
        Just(ArithOp::Mul),
        Just(ArithOp::Sub),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        number_strategy().prop_map(|value| Expr::Lit { value }),
        token_strategy().prop_map(Expr::balance),
        token_strategy().prop_map(Expr::receive),
        token_strategy().prop_map(Expr::send),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), arith_op_strategy(), inner.clone())
                .prop_map(|(lhs, op, rhs)| Expr::arithmetic(lhs, op, rhs)),
            (inner.clone(), token_strategy())
                .prop_map(|(target, token)| Expr::receive_from(target, token)),
            (inner, token_strategy()).prop_map(|(target, token)| Expr::send_to(target, token)),
        ]
    })
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    let leaf = prop_oneof![
        public_key_strategy().prop_map(Intent::signature),
        public_key_strategy().prop_map(Intent::counterparty),
        (expr_strategy(), relation_strategy(), expr_strategy())
            .prop_map(|(lhs, relation, rhs)| Intent::restriction(lhs, relation, rhs)),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4)
                .prop_map(|children| Intent::all(children).unwrap()),
            prop::collection::vec(inner.clone(), 1..4).prop_flat_map(|children| {
                let max = children.len() as u64;
                (0..=max, Just(children))
                    .prop_map(|(threshold, children)| Intent::any(threshold, children).unwrap())
            }),
            (1u64..1000, inner.clone())
                .prop_map(|(uses, child)| Intent::finite(uses, child).unwrap()),
            (any::<u64>(), any::<bool>(), inner).prop_map(|(expiry, after, child)| {
                Intent::temporary(expiry, after, child)
            }),
        ]
    })
}

fn instruction_strategy() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (
            public_key_strategy(),
            public_key_strategy(),
            prop::collection::btree_map(token_strategy(), positive_amount_strategy(), 1..4),
        )
            .prop_map(|(source, target, funds)| {
                Instruction::transfer_funds(source, target, funds).unwrap()
            }),
        (public_key_strategy(), prop::option::of(intent_strategy())).prop_map(
            |(host, intent)| match intent {
                Some(intent) => Instruction::set_intent(host, intent),
                None => Instruction::clear_intent(host),
            }
        ),
    ]
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    prop::collection::vec(instruction_strategy(), 1..4)
        .prop_map(|instructions| Transaction::new(instructions).unwrap())
}

fn signed_strategy() -> impl Strategy<Value = Signed> {
    (
        "[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}",
        signature_strategy(),
        transaction_strategy(),
        prop::collection::vec(public_key_strategy(), 1..4),
    )
        .prop_map(|(nonce, signature, signee, signers)| {
            Signed::new(nonce, signature, signee, signers).unwrap()
        })
}

proptest! {
    #[test]
    fn expr_round_trips(expr in expr_strategy()) {
        let decoded = Expr::decode(&expr.encode()).unwrap();
        prop_assert_eq!(decoded, expr);
    }

    #[test]
    fn intent_round_trips(intent in intent_strategy()) {
        let decoded = Intent::decode(&intent.encode()).unwrap();
        prop_assert_eq!(decoded, intent);
    }

    #[test]
    fn transaction_round_trips(tx in transaction_strategy()) {
        let decoded = Transaction::decode(&tx.encode()).unwrap();
        prop_assert_eq!(decoded, tx);
    }

    #[test]
    fn signed_round_trips(signed in signed_strategy()) {
        let decoded = Signed::decode(&signed.encode()).unwrap();
        prop_assert_eq!(decoded, signed);
    }

    #[test]
    fn encoding_is_deterministic(intent in intent_strategy()) {
        prop_assert_eq!(intent.encode(), intent.clone().encode());
    }
}

#[test]
fn transfer_funds_map_is_insertion_order_independent() {
    let key = |b: u8| BlsPublicKey::from_slice(&[b; 48]).unwrap();

    let mut forward = BTreeMap::new();
    forward.insert(Token::Btc, Number::from(1u64));
    forward.insert(Token::Usdc, Number::from(100u64));

    let mut backward = BTreeMap::new();
    backward.insert(Token::Usdc, Number::from(100u64));
    backward.insert(Token::Btc, Number::from(1u64));

    let a = Instruction::transfer_funds(key(1), key(2), forward).unwrap();
    let b = Instruction::transfer_funds(key(1), key(2), backward).unwrap();
    assert_eq!(a.encode(), b.encode());
}
