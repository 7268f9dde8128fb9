#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use seqgp::gp::{compute_sequence, distance, splice};
use seqgp::{Node, Op, Tree, Var};

/// One node of a tree in pre-order, decoded from raw bytes.
#[derive(Arbitrary, Debug)]
enum Token {
    Const(u8),
    N,
    Xp,
    Xpp,
    Add,
    Sub,
    Mul,
}

/// Structured input for tree editing.
#[derive(Arbitrary, Debug)]
struct EditInput {
    /// Pre-order tokens for the recipient.
    recipient: Vec<Token>,
    /// Pre-order tokens for the donor.
    donor: Vec<Token>,
    /// Edit point in the recipient (may be out of range).
    recipient_index: usize,
    /// Graft point in the donor (may be out of range).
    donor_index: usize,
    /// Recurrence seeds.
    seeds: (i64, i64),
    /// Sequence length.
    length: u8,
}

/// Decode a pre-order token stream, closing missing operands with `N`.
fn build(tokens: &mut std::slice::Iter<'_, Token>, depth: usize) -> Node {
    if depth > 32 {
        return Node::Var(Var::N);
    }
    match tokens.next() {
        Some(Token::Const(c)) => Node::Const(c % 10),
        Some(Token::N) | None => Node::Var(Var::N),
        Some(Token::Xp) => Node::Var(Var::Xp),
        Some(Token::Xpp) => Node::Var(Var::Xpp),
        Some(Token::Add) => binary(Op::Add, tokens, depth),
        Some(Token::Sub) => binary(Op::Sub, tokens, depth),
        Some(Token::Mul) => binary(Op::Mul, tokens, depth),
    }
}

fn binary(op: Op, tokens: &mut std::slice::Iter<'_, Token>, depth: usize) -> Node {
    let left = build(tokens, depth + 1);
    let right = build(tokens, depth + 1);
    Node::binary(op, left, right)
}

fuzz_target!(|input: EditInput| {
    let recipient = Tree::new(build(&mut input.recipient.iter(), 0));
    let donor = Tree::new(build(&mut input.donor.iter(), 0));

    match splice(&donor, input.donor_index, &recipient, input.recipient_index) {
        Ok(child) => {
            let grafted = donor.get(input.donor_index).map(Node::size).unwrap_or(0);
            let removed = recipient.get(input.recipient_index).map(Node::size).unwrap_or(0);
            assert_eq!(child.size(), recipient.size() - removed + grafted);
        }
        Err(_) => {
            assert!(
                input.donor_index >= donor.size() || input.recipient_index >= recipient.size()
            );
        }
    }

    let length = usize::from(input.length);
    let seq = compute_sequence(&recipient, length, input.seeds.0, input.seeds.1);
    assert_eq!(seq.len(), length);
    let d = distance(&seq, &seq).unwrap_or(f64::NAN);
    assert!(d.abs() < f64::EPSILON);
});
