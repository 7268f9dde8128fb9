//! Subtree crossover ("hybridisation").
//!
//! A child is built by copying a random subtree out of the donor and
//! splicing it into a copy of the recipient at a random position. Parents
//! are only borrowed, so the child never shares nodes with either of them.

use crate::error::SearchResult;
use crate::random::uniform_int;
use crate::tree::{Node, Tree};
use rand::Rng;

/// Cross `donor` into `recipient` at uniformly chosen positions.
///
/// If the recipient position is the root, the child is the donor subtree
/// alone.
///
/// # Errors
///
/// Propagates [`crate::SearchError::InvalidIndex`], which cannot occur for
/// indices drawn inside both trees.
pub fn hybridise<R: Rng>(donor: &Tree, recipient: &Tree, rng: &mut R) -> SearchResult<Tree> {
    let donor_index = uniform_int(rng, 0, donor.size() - 1);
    let recipient_index = uniform_int(rng, 0, recipient.size() - 1);
    splice(donor, donor_index, recipient, recipient_index)
}

/// Copy the donor subtree at `donor_index` into a copy of `recipient` at
/// `recipient_index`.
///
/// # Errors
///
/// Returns [`crate::SearchError::InvalidIndex`] if either index is outside
/// its tree.
pub fn splice(
    donor: &Tree,
    donor_index: usize,
    recipient: &Tree,
    recipient_index: usize,
) -> SearchResult<Tree> {
    let graft: Node = donor.get(donor_index)?.clone();
    if recipient_index == 0 {
        return Ok(Tree::new(graft));
    }
    let mut child = recipient.clone();
    child.mutate_at(recipient_index, || graft)?;
    Ok(child)
}
