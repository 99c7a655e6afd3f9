//! Weighted model probability and its gradient.
//!
//! Every variable `x` is independently true with probability `P(x)`. On a
//! deterministic decomposable circuit (d-DNNF) the probability of the circuit
//! is obtained by labelling `x` with `P(x)`, `~x` with `1 - P(x)`, and folding
//! with `(+, ×)`. Carrying a dual number instead of a plain `f64` yields, in
//! the same pass, the partial derivative with respect to `P(k)` for one
//! designated variable `k`.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, Mul};

use crate::algebra::Algebra;
use crate::arena::{Node, NnfArena};
use crate::error::{Error, Result};
use crate::eval::evaluate;
use crate::nnf::Nnf;
use crate::types::{Lit, NodeId};

/// A value together with its derivative with respect to one input.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Dual {
    pub value: f64,
    pub deriv: f64,
}

impl Dual {
    pub const ZERO: Dual = Dual::new(0.0, 0.0);
    pub const ONE: Dual = Dual::new(1.0, 0.0);

    pub const fn new(value: f64, deriv: f64) -> Self {
        Self { value, deriv }
    }

    /// A value that does not depend on the input.
    pub const fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }
}

impl Add for Dual {
    type Output = Dual;

    fn add(self, rhs: Dual) -> Dual {
        Dual::new(self.value + rhs.value, self.deriv + rhs.deriv)
    }
}

impl Mul for Dual {
    type Output = Dual;

    // Product rule.
    fn mul(self, rhs: Dual) -> Dual {
        Dual::new(
            self.value * rhs.value,
            self.value * rhs.deriv + self.deriv * rhs.value,
        )
    }
}

impl From<Dual> for (f64, f64) {
    fn from(d: Dual) -> Self {
        (d.value, d.deriv)
    }
}

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.value, self.deriv)
    }
}

/// Dual-number algebra over literal probabilities.
///
/// A positive literal `x` is labelled `(P(x), 1)` if `x` is the designated
/// variable and `(P(x), 0)` otherwise; a negative literal `~x` is labelled
/// `(1 - P(x), -1)` or `(1 - P(x), 0)`.
#[derive(Debug, Clone)]
pub struct GradAlgebra<'a, V> {
    probs: &'a HashMap<V, f64>,
    var: Option<&'a V>,
}

impl<'a, V> GradAlgebra<'a, V> {
    /// Algebra differentiating with respect to `var`, or nothing if `None`.
    pub(crate) fn new(probs: &'a HashMap<V, f64>, var: Option<&'a V>) -> Self {
        Self { probs, var }
    }
}

impl<'a, V> GradAlgebra<'a, V>
where
    V: Eq + Hash + fmt::Display,
{
    /// Algebra for evaluating `nnf`, differentiating with respect to `var`.
    ///
    /// Fails with [`Error::MissingProbability`] naming the first variable, in
    /// depth-first pre-order, that has no probability.
    pub fn for_nnf(nnf: &Nnf<V>, probs: &'a HashMap<V, f64>, var: Option<&'a V>) -> Result<Self> {
        let names = nnf.nodes().into_iter().filter_map(|node| match node {
            Nnf::Lit(lit) => Some(lit.name()),
            _ => None,
        });
        check_probs(names, probs)?;
        Ok(Self::new(probs, var))
    }

    /// Algebra for evaluating the arena circuit rooted at `root`.
    ///
    /// Missing variables are reported in increasing node order.
    pub fn for_arena(
        arena: &NnfArena<V>,
        root: NodeId,
        probs: &'a HashMap<V, f64>,
        var: Option<&'a V>,
    ) -> Result<Self> {
        let names = arena.reachable(root)?.into_iter().filter_map(|id| match arena.get(id) {
            Node::Lit(lit) => Some(lit.name()),
            _ => None,
        });
        check_probs(names, probs)?;
        Ok(Self::new(probs, var))
    }
}

impl<V: Eq + Hash> Algebra<V> for GradAlgebra<'_, V> {
    type Value = Dual;

    fn zero(&self) -> Dual {
        Dual::ZERO
    }

    fn one(&self) -> Dual {
        Dual::ONE
    }

    fn add(&self, a: Dual, b: Dual) -> Dual {
        a + b
    }

    fn mul(&self, a: Dual, b: Dual) -> Dual {
        a * b
    }

    /// # Panics
    ///
    /// Panics if the variable of `lit` has no probability.
    /// [`GradAlgebra::for_nnf`] and [`GradAlgebra::for_arena`] check this up front.
    fn label(&self, lit: &Lit<V>) -> Dual {
        let p = self.probs[lit.name()];
        let designated = self.var == Some(lit.name());
        if lit.is_positive() {
            Dual::new(p, if designated { 1.0 } else { 0.0 })
        } else {
            Dual::new(1.0 - p, if designated { -1.0 } else { 0.0 })
        }
    }
}

fn check_probs<'v, V>(vars: impl IntoIterator<Item = &'v V>, probs: &HashMap<V, f64>) -> Result<()>
where
    V: Eq + Hash + fmt::Display + 'v,
{
    match vars.into_iter().find(|name| !probs.contains_key(*name)) {
        Some(name) => Err(Error::MissingProbability { name: name.to_string() }),
        None => Ok(()),
    }
}

/// Computes the probability of a d-DNNF circuit and its derivative with respect to `P(var)`.
///
/// Fails with [`Error::MissingProbability`] if a variable of the circuit is absent from `probs`;
/// the first such variable in depth-first pre-order is reported.
/// With `var = None` the derivative is zero.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use nnf_amc::nnf::Nnf;
///
/// let f: Nnf<&str> = Nnf::and([Nnf::var("a"), Nnf::var("b")]);
/// let probs = HashMap::from([("a", 0.4), ("b", 0.5)]);
///
/// let d = nnf_amc::grad(&f, &probs, Some(&"a")).unwrap();
/// assert!((d.value - 0.2).abs() < 1e-12);
/// assert!((d.deriv - 0.5).abs() < 1e-12);
/// ```
pub fn grad<V>(nnf: &Nnf<V>, probs: &HashMap<V, f64>, var: Option<&V>) -> Result<Dual>
where
    V: Clone + Eq + Hash + fmt::Display,
{
    let algebra = GradAlgebra::for_nnf(nnf, probs, var)?;
    Ok(evaluate(nnf, &algebra))
}

/// Computes the probability of a d-DNNF circuit under independent variable probabilities.
pub fn probability<V>(nnf: &Nnf<V>, probs: &HashMap<V, f64>) -> Result<f64>
where
    V: Clone + Eq + Hash + fmt::Display,
{
    grad(nnf, probs, None).map(|d| d.value)
}

impl<V> NnfArena<V>
where
    V: Eq + Hash + fmt::Display,
{
    pub fn grad(&self, root: NodeId, probs: &HashMap<V, f64>, var: Option<&V>) -> Result<Dual> {
        let algebra = GradAlgebra::for_arena(self, root, probs, var)?;
        self.evaluate(root, &algebra)
    }

    pub fn probability(&self, root: NodeId, probs: &HashMap<V, f64>) -> Result<f64> {
        self.grad(root, probs, None).map(|d| d.value)
    }
}
