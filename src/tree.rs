//! Expression trees over integer constants and recurrence variables.
//!
//! A tree is a strict binary structure: only [`Node::Binary`] branches, and
//! each branch exclusively owns its two children. Cloning a tree is a deep
//! copy, and dropping it releases every node.
//!
//! Nodes are addressed by pre-order index: the root is `0`, followed by the
//! whole left subtree, then the whole right subtree.

use crate::error::{SearchError, SearchResult};
use std::fmt;

/// Recurrence slot read by a variable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    /// Current index `n`.
    N,
    /// Previous value `x[n-1]`.
    Xp,
    /// Value before the previous one, `x[n-2]`.
    Xpp,
}

impl Var {
    /// Every variable, in `N`, `XP`, `XPP` order.
    pub const ALL: [Self; 3] = [Self::N, Self::Xp, Self::Xpp];

    /// Pick the bound value for this slot.
    #[must_use]
    pub const fn select(self, n: i64, xp: i64, xpp: i64) -> i64 {
        match self {
            Self::N => n,
            Self::Xp => xp,
            Self::Xpp => xpp,
        }
    }

    /// Printed tag.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::Xp => "XP",
            Self::Xpp => "XPP",
        }
    }
}

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
}

impl Op {
    /// Every operator.
    pub const ALL: [Self; 3] = [Self::Add, Self::Sub, Self::Mul];

    /// Apply the operator with wrapping integer arithmetic.
    #[must_use]
    pub const fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            Self::Add => a.wrapping_add(b),
            Self::Sub => a.wrapping_sub(b),
            Self::Mul => a.wrapping_mul(b),
        }
    }

    /// Printed symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
        }
    }
}

/// A single expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Integer literal; generated constants lie in `0..=9`.
    Const(u8),
    /// Reference to a recurrence slot.
    Var(Var),
    /// Operator applied to a left and right subtree.
    Binary(Op, Box<Node>, Box<Node>),
}

impl Node {
    /// Build an operator node from two owned children.
    #[must_use]
    pub fn binary(op: Op, left: Self, right: Self) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    /// Whether this node is a leaf.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Binary(..))
    }

    /// Evaluate the subtree for the given recurrence bindings.
    #[must_use]
    pub fn eval(&self, n: i64, xp: i64, xpp: i64) -> i64 {
        match self {
            Self::Const(c) => i64::from(*c),
            Self::Var(v) => v.select(n, xp, xpp),
            Self::Binary(op, left, right) => {
                op.apply(left.eval(n, xp, xpp), right.eval(n, xp, xpp))
            }
        }
    }

    /// Number of nodes in this subtree.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Const(_) | Self::Var(_) => 1,
            Self::Binary(_, left, right) => 1 + left.size() + right.size(),
        }
    }

    /// Longest root-to-leaf path, counting nodes (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Const(_) | Self::Var(_) => 1,
            Self::Binary(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Subtree at the given pre-order index, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Self> {
        if index == 0 {
            return Some(self);
        }
        match self {
            Self::Const(_) | Self::Var(_) => None,
            Self::Binary(_, left, right) => {
                let rest = index - 1;
                let left_size = left.size();
                if rest < left_size {
                    left.get(rest)
                } else {
                    right.get(rest - left_size)
                }
            }
        }
    }

    /// Mutable subtree at the given pre-order index, or `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Self> {
        if index == 0 {
            return Some(self);
        }
        match self {
            Self::Const(_) | Self::Var(_) => None,
            Self::Binary(_, left, right) => {
                let rest = index - 1;
                let left_size = left.size();
                if rest < left_size {
                    left.get_mut(rest)
                } else {
                    right.get_mut(rest - left_size)
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "{c}"),
            Self::Var(v) => f.write_str(v.symbol()),
            Self::Binary(op, left, right) => {
                write!(f, "( {} {left} {right} )", op.symbol())
            }
        }
    }
}

/// An owned expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Wrap a root node.
    #[must_use]
    pub const fn new(root: Node) -> Self {
        Self { root }
    }

    /// Borrow the root node.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Take the root node.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Total node count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Tree depth (a single leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Evaluate the whole tree.
    #[must_use]
    pub fn eval(&self, n: i64, xp: i64, xpp: i64) -> i64 {
        self.root.eval(n, xp, xpp)
    }

    /// Node at pre-order `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidIndex`] if `index >= self.size()`.
    pub fn get(&self, index: usize) -> SearchResult<&Node> {
        self.root.get(index).ok_or(SearchError::InvalidIndex {
            index,
            size: self.size(),
        })
    }

    /// Mutable node at pre-order `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidIndex`] if `index >= self.size()`.
    pub fn get_mut(&mut self, index: usize) -> SearchResult<&mut Node> {
        let size = self.size();
        self.root
            .get_mut(index)
            .ok_or(SearchError::InvalidIndex { index, size })
    }

    /// Replace the subtree at pre-order `index` with whatever `build`
    /// returns. Index `0` replaces the whole tree.
    ///
    /// `build` is only invoked when the index is valid.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidIndex`] if `index >= self.size()`; the
    /// tree is left untouched.
    pub fn mutate_at<F>(&mut self, index: usize, build: F) -> SearchResult<()>
    where
        F: FnOnce() -> Node,
    {
        if index == 0 {
            self.root = build();
            return Ok(());
        }
        let slot = self.get_mut(index)?;
        *slot = build();
        Ok(())
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
