use num_bigint::BigUint;

use crate::algebra::Algebra;
use crate::arena::NnfArena;
use crate::error::Result;
use crate::eval::evaluate;
use crate::nnf::Nnf;
use crate::types::{Lit, NodeId};

/// Boolean algebra `(or, and, false, true)` with every literal labelled `true`.
///
/// Literals are not checked against each other, so the result is exact
/// satisfiability for decomposable circuits (DNNF), where no conjunction can
/// contain both `x` and `~x`. On other circuits `a & ~a` is reported satisfiable.
#[derive(Debug, Copy, Clone, Default)]
pub struct BoolAlgebra;

impl<V> Algebra<V> for BoolAlgebra {
    type Value = bool;

    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }

    fn add(&self, a: bool, b: bool) -> bool {
        a || b
    }

    fn mul(&self, a: bool, b: bool) -> bool {
        a && b
    }

    fn label(&self, _lit: &Lit<V>) -> bool {
        true
    }
}

/// Counting algebra `(+, ×, 0, 1)` over unbounded naturals, with every literal labelled `1`.
///
/// The result is the exact number of models only for smooth deterministic
/// decomposable circuits (sd-DNNF). On other circuits the number is
/// meaningless, and this is not detected.
#[derive(Debug, Copy, Clone, Default)]
pub struct CountAlgebra;

impl<V> Algebra<V> for CountAlgebra {
    type Value = BigUint;

    fn zero(&self) -> BigUint {
        BigUint::ZERO
    }

    fn one(&self) -> BigUint {
        BigUint::from(1u32)
    }

    fn add(&self, a: BigUint, b: BigUint) -> BigUint {
        a + b
    }

    fn mul(&self, a: BigUint, b: BigUint) -> BigUint {
        a * b
    }

    fn label(&self, _lit: &Lit<V>) -> BigUint {
        BigUint::from(1u32)
    }
}

/// Returns whether the circuit has a model.
pub fn sat<V: Clone>(nnf: &Nnf<V>) -> bool {
    evaluate(nnf, &BoolAlgebra)
}

/// Returns the number of models of a smooth deterministic decomposable circuit.
///
/// Counted over the variables the circuit mentions.
///
/// # Examples
///
/// ```
/// use nnf_amc::nnf::Nnf;
///
/// // (a & b) | (~a & b): smooth, deterministic and decomposable.
/// let f: Nnf<&str> = Nnf::or([
///     Nnf::and([Nnf::var("a"), Nnf::var("b")]),
///     Nnf::and([Nnf::lit("a", false), Nnf::var("b")]),
/// ]);
/// assert_eq!(nnf_amc::num_sat(&f).to_string(), "2");
/// ```
pub fn num_sat<V: Clone>(nnf: &Nnf<V>) -> BigUint {
    evaluate(nnf, &CountAlgebra)
}

impl<V> NnfArena<V> {
    pub fn sat(&self, root: NodeId) -> Result<bool> {
        self.evaluate(root, &BoolAlgebra)
    }

    pub fn num_sat(&self, root: NodeId) -> Result<BigUint> {
        self.evaluate(root, &CountAlgebra)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use num_bigint::ToBigUint;

    use super::*;

    use test_log::test;

    use crate::arena::Node;

    fn empty() -> Vec<Nnf<&'static str>> {
        Vec::new()
    }

    #[test]
    fn test_sat_constants() {
        assert!(sat(&Nnf::<&str>::True));
        assert!(!sat(&Nnf::<&str>::False));
        assert!(sat(&Nnf::and(empty())));
        assert!(!sat(&Nnf::or(empty())));
    }

    #[test]
    fn test_sat_conjunction_of_literals() {
        let f: Nnf<&str> = Nnf::and([Nnf::var("a"), Nnf::lit("b", false), Nnf::var("c")]);
        assert!(sat(&f));
    }

    #[test]
    fn test_sat_false_branch() {
        let f: Nnf<&str> = Nnf::and([Nnf::var("a"), Nnf::or([Nnf::False, Nnf::or(empty())])]);
        assert!(!sat(&f));

        let g: Nnf<&str> = Nnf::or([Nnf::False, Nnf::and([Nnf::var("a"), Nnf::True])]);
        assert!(sat(&g));
    }

    #[test]
    fn test_num_sat_terminal() {
        assert_eq!(num_sat(&Nnf::<&str>::True), 1.to_biguint().unwrap());
        assert_eq!(num_sat(&Nnf::<&str>::False), 0.to_biguint().unwrap());
        assert_eq!(num_sat(&Nnf::var("a")), 1.to_biguint().unwrap());
    }

    #[test]
    fn test_num_sat_decision() {
        // One variable, both values allowed.
        let f: Nnf<&str> = Nnf::and([Nnf::or([Nnf::var("a"), Nnf::lit("a", false)])]);
        assert_eq!(num_sat(&f), 2.to_biguint().unwrap());
    }

    #[test]
    fn test_num_sat_cube() {
        let f: Nnf<&str> = Nnf::and([Nnf::var("a"), Nnf::var("b")]);
        assert_eq!(num_sat(&f), 1.to_biguint().unwrap());
    }

    #[test]
    fn test_num_sat_clause() {
        // a | b as a smooth d-DNNF: (a & (b | ~b)) | (~a & b)
        let b_any: Rc<Nnf<&str>> = Rc::new(Nnf::or([Nnf::var("b"), Nnf::lit("b", false)]));
        let f: Nnf<&str> = Nnf::or([
            Nnf::and_shared([Rc::new(Nnf::var("a")), b_any]),
            Nnf::and([Nnf::lit("a", false), Nnf::var("b")]),
        ]);
        assert_eq!(num_sat(&f), 3.to_biguint().unwrap());
    }

    #[test]
    fn test_num_sat_large() {
        // 100 independent free variables: 2^100 models.
        let f: Nnf<u32> = Nnf::and((1..=100u32).map(|v| Nnf::or([Nnf::var(v), Nnf::lit(v, false)])));
        assert_eq!(num_sat(&f), BigUint::from(2u32).pow(100));
    }

    #[test]
    fn test_arena_sat_and_count() {
        let arena = NnfArena::from_nodes([
            Node::Lit(Lit::pos("a")),
            Node::Lit(Lit::neg("a")),
            Node::Or(vec![NodeId::new(0), NodeId::new(1)]),
            Node::And(vec![NodeId::new(0), NodeId::new(1)]),
        ])
        .unwrap();
        assert!(arena.sat(NodeId::new(2)).unwrap());
        assert_eq!(arena.num_sat(NodeId::new(2)).unwrap(), 2.to_biguint().unwrap());
        assert!(arena.sat(NodeId::new(4)).is_err());
    }
}
