//! Literals and node identifiers.
//!
//! This module provides the leaf type of NNF circuits and the newtype used to
//! address nodes stored in an [`NnfArena`][crate::arena::NnfArena].
use std::fmt;
use std::ops::Neg;

/// A literal: an occurrence of a variable, either positive (`x`) or negated (`~x`).
///
/// The variable name type `V` is chosen by the caller (strings, integers, ...).
/// Two literals are equal iff both their names and their polarities match.
///
/// # Examples
///
/// ```
/// use nnf_amc::types::Lit;
///
/// let a = Lit::pos("a");
/// assert!(a.is_positive());
/// assert_eq!(-a, Lit::neg("a"));
/// assert_eq!(format!("{}", Lit::neg("a")), "~a");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit<V> {
    name: V,
    polarity: bool,
}

impl<V> Lit<V> {
    /// Creates a literal with the given polarity (`true` for a positive occurrence).
    pub const fn new(name: V, polarity: bool) -> Self {
        Self { name, polarity }
    }

    /// Creates a positive literal.
    pub const fn pos(name: V) -> Self {
        Self::new(name, true)
    }

    /// Creates a negative literal.
    pub const fn neg(name: V) -> Self {
        Self::new(name, false)
    }

    /// Returns the variable name.
    pub fn name(&self) -> &V {
        &self.name
    }

    /// Consumes the literal, returning its variable name.
    pub fn into_name(self) -> V {
        self.name
    }

    /// Returns the polarity: `true` for positive, `false` for negative.
    pub const fn polarity(&self) -> bool {
        self.polarity
    }

    pub const fn is_positive(&self) -> bool {
        self.polarity
    }

    pub const fn is_negative(&self) -> bool {
        !self.polarity
    }

    /// Returns the complementary literal over the same variable.
    pub fn negate(self) -> Self {
        Self {
            name: self.name,
            polarity: !self.polarity,
        }
    }
}

// -Lit
impl<V> Neg for Lit<V> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<V: fmt::Display> fmt::Display for Lit<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.name)
        } else {
            write!(f, "~{}", self.name)
        }
    }
}

/// Index of a node inside an [`NnfArena`][crate::arena::NnfArena] (0-indexed).
///
/// # Invariants
///
/// - Inside a well-formed arena, every child id of a node is strictly
///   smaller than the id of the node itself (children come first).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw index as a `usize`.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_lit_creation() {
        let a = Lit::pos("a");
        let na = Lit::neg("a");
        assert_eq!(a.name(), &"a");
        assert!(a.is_positive());
        assert!(!a.is_negative());
        assert!(na.is_negative());
        assert!(!na.polarity());
        assert_ne!(a, na);
    }

    #[test]
    fn test_lit_negation() {
        let x = Lit::pos(7u32);
        assert_eq!(-x, Lit::neg(7));
        assert_eq!(-(-x), x);
        assert_eq!(x.negate().into_name(), 7);
    }

    #[test]
    fn test_lit_display() {
        assert_eq!(Lit::pos("x1").to_string(), "x1");
        assert_eq!(Lit::neg("x1").to_string(), "~x1");
    }

    #[test]
    fn test_node_id() {
        let id = NodeId::new(3);
        assert_eq!(id.index(), 3);
        assert_eq!(usize::from(id), 3);
        assert_eq!(NodeId::from(3), id);
        assert_eq!(id.to_string(), "@3");
        assert!(NodeId::new(1) < id);
    }
}
