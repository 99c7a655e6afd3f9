//! Algebras for circuit evaluation.
//!
//! An [`Algebra`] gives meaning to the four NNF shapes: disjunction becomes
//! [`add`][Algebra::add], conjunction becomes [`mul`][Algebra::mul], the
//! constants become the neutral elements, and each literal is mapped to a
//! value by [`label`][Algebra::label].
//!
//! The evaluator folds children left to right, so `add` and `mul` only need to
//! be associative with [`zero`][Algebra::zero] and [`one`][Algebra::one] as
//! their identities. Whether the result *means* anything depends on the
//! circuit: e.g. counting models with `(+, ×)` is exact only on smooth
//! deterministic decomposable circuits.

use std::fmt;
use std::marker::PhantomData;

use crate::types::Lit;

pub trait Algebra<V> {
    type Value: Clone;

    /// Identity of [`add`][Algebra::add]; the value of `false` and of an empty disjunction.
    fn zero(&self) -> Self::Value;

    /// Identity of [`mul`][Algebra::mul]; the value of `true` and of an empty conjunction.
    fn one(&self) -> Self::Value;

    fn add(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    fn mul(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// Value of a literal occurrence.
    fn label(&self, lit: &Lit<V>) -> Self::Value;
}

impl<V, A: Algebra<V> + ?Sized> Algebra<V> for &A {
    type Value = A::Value;

    fn zero(&self) -> Self::Value {
        (**self).zero()
    }

    fn one(&self) -> Self::Value {
        (**self).one()
    }

    fn add(&self, a: Self::Value, b: Self::Value) -> Self::Value {
        (**self).add(a, b)
    }

    fn mul(&self, a: Self::Value, b: Self::Value) -> Self::Value {
        (**self).mul(a, b)
    }

    fn label(&self, lit: &Lit<V>) -> Self::Value {
        (**self).label(lit)
    }
}

/// An algebra assembled from closures.
///
/// # Examples
///
/// ```
/// use nnf_amc::algebra::FnAlgebra;
/// use nnf_amc::nnf::Nnf;
/// use nnf_amc::types::Lit;
///
/// // Minimal number of positive literals in a model (tropical semiring).
/// let min_true = FnAlgebra::new(
///     |a: u32, b: u32| a.min(b),
///     |a: u32, b: u32| a.saturating_add(b),
///     u32::MAX,
///     0,
///     |lit: &Lit<&str>| if lit.is_positive() { 1 } else { 0 },
/// );
///
/// let f: Nnf<&str> = Nnf::and([
///     Nnf::or([Nnf::var("a"), Nnf::lit("a", false)]),
///     Nnf::var("b"),
/// ]);
/// assert_eq!(nnf_amc::evaluate(&f, &min_true), 1);
/// ```
pub struct FnAlgebra<V, T, Add, Mul, Label> {
    add: Add,
    mul: Mul,
    zero: T,
    one: T,
    label: Label,
    _vars: PhantomData<fn(&Lit<V>)>,
}

impl<V, T, Add, Mul, Label> FnAlgebra<V, T, Add, Mul, Label>
where
    T: Clone,
    Add: Fn(T, T) -> T,
    Mul: Fn(T, T) -> T,
    Label: Fn(&Lit<V>) -> T,
{
    pub fn new(add: Add, mul: Mul, zero: T, one: T, label: Label) -> Self {
        Self {
            add,
            mul,
            zero,
            one,
            label,
            _vars: PhantomData,
        }
    }
}

impl<V, T, Add, Mul, Label> Algebra<V> for FnAlgebra<V, T, Add, Mul, Label>
where
    T: Clone,
    Add: Fn(T, T) -> T,
    Mul: Fn(T, T) -> T,
    Label: Fn(&Lit<V>) -> T,
{
    type Value = T;

    fn zero(&self) -> T {
        self.zero.clone()
    }

    fn one(&self) -> T {
        self.one.clone()
    }

    fn add(&self, a: T, b: T) -> T {
        (self.add)(a, b)
    }

    fn mul(&self, a: T, b: T) -> T {
        (self.mul)(a, b)
    }

    fn label(&self, lit: &Lit<V>) -> T {
        (self.label)(lit)
    }
}

impl<V, T: fmt::Debug, Add, Mul, Label> fmt::Debug for FnAlgebra<V, T, Add, Mul, Label> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAlgebra")
            .field("zero", &self.zero)
            .field("one", &self.one)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_fn_algebra() {
        let alg = FnAlgebra::new(
            |a: i64, b: i64| a + b,
            |a: i64, b: i64| a * b,
            0,
            1,
            |lit: &Lit<u32>| if lit.is_positive() { *lit.name() as i64 } else { -(*lit.name() as i64) },
        );
        assert_eq!(alg.zero(), 0);
        assert_eq!(alg.one(), 1);
        assert_eq!(alg.add(2, 3), 5);
        assert_eq!(alg.mul(2, 3), 6);
        assert_eq!(alg.label(&Lit::pos(4)), 4);
        assert_eq!(alg.label(&Lit::neg(4)), -4);
        assert_eq!(format!("{:?}", alg), "FnAlgebra { zero: 0, one: 1, .. }");
    }

    #[test]
    fn test_algebra_by_reference() {
        fn zero_of<A: Algebra<u32>>(alg: A) -> A::Value {
            alg.zero()
        }

        let alg = FnAlgebra::new(|a: u8, b: u8| a | b, |a: u8, b: u8| a & b, 0, 0xff, |_: &Lit<u32>| 1);
        assert_eq!(zero_of(&alg), 0);
        assert_eq!((&alg).one(), 0xff);
    }
}
