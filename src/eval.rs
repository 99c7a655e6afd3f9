//! Semiring evaluation of NNF circuits.
//!
//! The evaluator folds a circuit bottom-up into a single value of an
//! [`Algebra`]:
//!
//! | node        | value                                  |
//! |-------------|----------------------------------------|
//! | `true`      | `one`                                  |
//! | `false`     | `zero`                                 |
//! | literal `l` | `label(l)`                             |
//! | `Or(cs)`    | `zero + v(c1) + v(c2) + ...`           |
//! | `And(cs)`   | `one * v(c1) * v(c2) * ...`            |
//!
//! Children are combined left to right. Neither strategy recurses on the call
//! stack, so arbitrarily deep circuits are fine.

use std::fmt;

use log::debug;

use crate::algebra::Algebra;
use crate::arena::{Node, NnfArena};
use crate::error::Result;
use crate::nnf::Nnf;
use crate::types::NodeId;

/// How shared sub-circuits are treated during evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Strategy {
    /// Evaluate every distinct node once and reuse its value for all parents.
    #[default]
    Shared,
    /// Evaluate every occurrence of a node separately, as if the circuit were a tree.
    ///
    /// Exponential on heavily shared circuits; only useful for algebras whose
    /// `label` is not a pure function of the literal.
    Tree,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Shared => write!(f, "shared"),
            Strategy::Tree => write!(f, "tree"),
        }
    }
}

/// Configuration for circuit evaluation.
///
/// # Examples
///
/// ```
/// use nnf_amc::eval::{EvalConfig, Strategy};
///
/// let config = EvalConfig::default().with_strategy(Strategy::Tree);
/// assert_eq!(config.strategy, Strategy::Tree);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct EvalConfig {
    /// Treatment of shared nodes (default: [`Strategy::Shared`])
    pub strategy: Strategy,
}

impl EvalConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Evaluates a circuit under the given algebra.
///
/// A pointer-based circuit is always well-formed, so this cannot fail.
///
/// # Examples
///
/// ```
/// use nnf_amc::nnf::Nnf;
/// use nnf_amc::sat::BoolAlgebra;
///
/// let f: Nnf<&str> = Nnf::and([Nnf::var("a"), Nnf::lit("b", false)]);
/// assert!(nnf_amc::evaluate(&f, &BoolAlgebra));
/// assert!(!nnf_amc::evaluate(&Nnf::<&str>::or(Vec::<Nnf<&str>>::new()), &BoolAlgebra));
/// ```
pub fn evaluate<V, A>(nnf: &Nnf<V>, algebra: &A) -> A::Value
where
    V: Clone,
    A: Algebra<V>,
{
    evaluate_with(nnf, algebra, &EvalConfig::default())
}

pub fn evaluate_with<V, A>(nnf: &Nnf<V>, algebra: &A, config: &EvalConfig) -> A::Value
where
    V: Clone,
    A: Algebra<V>,
{
    let (arena, root) = NnfArena::from_nnf(nnf);
    arena.fold(root, algebra, config)
}

impl<V> NnfArena<V> {
    /// Evaluates the circuit rooted at `root` under the given algebra.
    ///
    /// Fails with [`MalformedNode`][crate::error::Error::MalformedNode] if `root`
    /// is not a node of this arena.
    pub fn evaluate<A>(&self, root: NodeId, algebra: &A) -> Result<A::Value>
    where
        A: Algebra<V>,
    {
        self.evaluate_with(root, algebra, &EvalConfig::default())
    }

    pub fn evaluate_with<A>(&self, root: NodeId, algebra: &A, config: &EvalConfig) -> Result<A::Value>
    where
        A: Algebra<V>,
    {
        self.check_root(root)?;
        Ok(self.fold(root, algebra, config))
    }

    /// Evaluation of a root already known to be in the arena.
    pub(crate) fn fold<A>(&self, root: NodeId, algebra: &A, config: &EvalConfig) -> A::Value
    where
        A: Algebra<V>,
    {
        match config.strategy {
            Strategy::Shared => self.fold_shared(root, algebra),
            Strategy::Tree => self.fold_tree(root, algebra),
        }
    }

    fn fold_shared<A>(&self, root: NodeId, algebra: &A) -> A::Value
    where
        A: Algebra<V>,
    {
        let order = self.reachable_from(root);
        debug!("fold_shared(root = {}): {} reachable nodes", root, order.len());

        // Number of parents still waiting for each node's value.
        let mut uses = vec![0usize; root.index() + 1];
        for &id in &order {
            for child in self.get(id).children() {
                uses[child.index()] += 1;
            }
        }

        let mut values: Vec<Option<A::Value>> = std::iter::repeat_with(|| None).take(root.index() + 1).collect();
        let mut take = |values: &mut Vec<Option<A::Value>>, id: NodeId| -> A::Value {
            uses[id.index()] -= 1;
            let value = if uses[id.index()] == 0 {
                values[id.index()].take()
            } else {
                values[id.index()].clone()
            };
            value.expect("children are evaluated before their parents")
        };

        for id in order {
            let value = match self.get(id) {
                Node::True => algebra.one(),
                Node::False => algebra.zero(),
                Node::Lit(lit) => algebra.label(lit),
                Node::Or(children) => children
                    .iter()
                    .fold(algebra.zero(), |acc, &c| algebra.add(acc, take(&mut values, c))),
                Node::And(children) => children
                    .iter()
                    .fold(algebra.one(), |acc, &c| algebra.mul(acc, take(&mut values, c))),
            };
            values[id.index()] = Some(value);
        }

        values[root.index()].take().expect("root is evaluated last")
    }

    fn fold_tree<A>(&self, root: NodeId, algebra: &A) -> A::Value
    where
        A: Algebra<V>,
    {
        debug!("fold_tree(root = {})", root);

        let mut frames: Vec<Frame<'_, A::Value>> = Vec::new();
        let mut next = Some(root);

        loop {
            // Descend: leaves produce a value, internal nodes open a frame.
            let mut value = next.take().and_then(|id| match self.get(id) {
                Node::True => Some(algebra.one()),
                Node::False => Some(algebra.zero()),
                Node::Lit(lit) => Some(algebra.label(lit)),
                Node::And(children) => {
                    frames.push(Frame::new(children, Op::Mul, algebra.one()));
                    None
                }
                Node::Or(children) => {
                    frames.push(Frame::new(children, Op::Add, algebra.zero()));
                    None
                }
            });

            // Ascend: fold the value into its parent until some frame has children left.
            loop {
                let Some(mut frame) = frames.pop() else {
                    return value.expect("root frame yields a value");
                };
                if let Some(v) = value.take() {
                    frame.acc = match frame.op {
                        Op::Add => algebra.add(frame.acc, v),
                        Op::Mul => algebra.mul(frame.acc, v),
                    };
                }
                if let Some(&child) = frame.children.get(frame.pos) {
                    frame.pos += 1;
                    frames.push(frame);
                    next = Some(child);
                    break;
                }
                value = Some(frame.acc);
            }
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum Op {
    Add,
    Mul,
}

struct Frame<'a, T> {
    children: &'a [NodeId],
    pos: usize,
    op: Op,
    acc: T,
}

impl<'a, T> Frame<'a, T> {
    fn new(children: &'a [NodeId], op: Op, acc: T) -> Self {
        Self {
            children,
            pos: 0,
            op,
            acc,
        }
    }
}
