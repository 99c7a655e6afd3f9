//! NNF circuits with shared sub-graphs.
//!
//! [`Nnf`] is the pointer-based representation: internal nodes hold their
//! children behind [`Rc`], so a sub-circuit can be referenced by several
//! parents without being copied. Nodes are immutable once built.
//!
//! ```
//! use std::rc::Rc;
//! use nnf_amc::nnf::Nnf;
//!
//! // (a | ~a) & b, with the decision on `a` shared between two parents.
//! let a: Rc<Nnf<&str>> = Rc::new(Nnf::or([Nnf::var("a"), Nnf::lit("a", false)]));
//! let f: Nnf<&str> = Nnf::and_shared([a.clone(), Rc::new(Nnf::var("b"))]);
//! let g: Nnf<&str> = Nnf::or_shared([a, Rc::new(Nnf::False)]);
//!
//! assert_eq!(f.to_string(), "((a | ~a) & b)");
//! assert_eq!(f.size(), 5);
//! assert_eq!(g.size(), 5);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::types::Lit;

/// A node of a circuit in negation normal form.
#[derive(Debug, Clone)]
pub enum Nnf<V> {
    True,
    False,
    Lit(Lit<V>),
    /// Conjunction. Empty conjunction is equivalent to [`Nnf::True`].
    And(Vec<Rc<Nnf<V>>>),
    /// Disjunction. Empty disjunction is equivalent to [`Nnf::False`].
    Or(Vec<Rc<Nnf<V>>>),
}

impl<V> Nnf<V> {
    /// Positive literal node.
    pub fn var(name: V) -> Self {
        Nnf::Lit(Lit::pos(name))
    }

    pub fn lit(name: V, polarity: bool) -> Self {
        Nnf::Lit(Lit::new(name, polarity))
    }

    /// Conjunction of the given children.
    pub fn and<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Nnf<V>>,
    {
        Nnf::And(children.into_iter().map(Rc::new).collect())
    }

    /// Disjunction of the given children.
    pub fn or<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Nnf<V>>,
    {
        Nnf::Or(children.into_iter().map(Rc::new).collect())
    }

    /// Conjunction of already shared children.
    pub fn and_shared<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Rc<Nnf<V>>>,
    {
        Nnf::And(children.into_iter().collect())
    }

    /// Disjunction of already shared children.
    pub fn or_shared<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Rc<Nnf<V>>>,
    {
        Nnf::Or(children.into_iter().collect())
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Nnf::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Nnf::False)
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Nnf::Lit(_))
    }

    /// Children of an internal node; leaves have none.
    pub fn children(&self) -> &[Rc<Nnf<V>>] {
        match self {
            Nnf::And(children) | Nnf::Or(children) => children.as_slice(),
            Nnf::True | Nnf::False | Nnf::Lit(_) => &[],
        }
    }

    /// Distinct nodes reachable from `self` (including `self`), in depth-first pre-order.
    ///
    /// Shared sub-graphs are visited once, identified by address.
    pub fn nodes(&self) -> Vec<&Nnf<V>> {
        let mut visited: HashSet<*const Nnf<V>> = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if !visited.insert(node as *const Nnf<V>) {
                continue;
            }
            order.push(node);
            // Reversed, so that the first child is popped first.
            for child in node.children().iter().rev() {
                stack.push(child.as_ref());
            }
        }

        order
    }

    /// Number of distinct nodes in the circuit.
    pub fn size(&self) -> usize {
        self.nodes().len()
    }

    /// Variables mentioned by any literal in the circuit.
    pub fn vars(&self) -> HashSet<&V>
    where
        V: Eq + Hash,
    {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                Nnf::Lit(lit) => Some(lit.name()),
                _ => None,
            })
            .collect()
    }
}

impl<V> From<Lit<V>> for Nnf<V> {
    fn from(lit: Lit<V>) -> Self {
        Nnf::Lit(lit)
    }
}

impl<V> From<bool> for Nnf<V> {
    fn from(value: bool) -> Self {
        if value {
            Nnf::True
        } else {
            Nnf::False
        }
    }
}

// Dropping a long chain of uniquely owned nodes would otherwise recurse once per level.
impl<V> Drop for Nnf<V> {
    fn drop(&mut self) {
        let mut stack = match self {
            Nnf::And(children) | Nnf::Or(children) => std::mem::take(children),
            Nnf::True | Nnf::False | Nnf::Lit(_) => return,
        };
        while let Some(child) = stack.pop() {
            if let Ok(mut node) = Rc::try_unwrap(child) {
                if let Nnf::And(children) | Nnf::Or(children) = &mut node {
                    stack.append(children);
                }
            }
        }
    }
}

enum Token<'a, V> {
    Node(&'a Nnf<V>),
    Text(&'static str),
}

impl<V: fmt::Display> fmt::Display for Nnf<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Token::Node(self)];

        while let Some(token) = stack.pop() {
            let node = match token {
                Token::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Token::Node(node) => node,
            };
            let (children, op, empty) = match node {
                Nnf::True => {
                    f.write_str("true")?;
                    continue;
                }
                Nnf::False => {
                    f.write_str("false")?;
                    continue;
                }
                Nnf::Lit(lit) => {
                    write!(f, "{}", lit)?;
                    continue;
                }
                Nnf::And(children) => (children, " & ", "And()"),
                Nnf::Or(children) => (children, " | ", "Or()"),
            };
            if children.is_empty() {
                f.write_str(empty)?;
                continue;
            }
            f.write_str("(")?;
            stack.push(Token::Text(")"));
            for (i, child) in children.iter().enumerate().rev() {
                stack.push(Token::Node(child.as_ref()));
                if i > 0 {
                    stack.push(Token::Text(op));
                }
            }
        }

        Ok(())
    }
}
