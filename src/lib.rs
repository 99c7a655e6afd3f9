//! # nnf-amc: Algebraic model counting over NNF circuits
//!
//! **`nnf-amc`** evaluates propositional circuits in **Negation Normal Form (NNF)** by folding them into
//! values of an arbitrary algebra. One traversal answers many questions; only the algebra changes.
//!
//! ## What is NNF?
//!
//! An NNF circuit is a rooted DAG whose leaves are literals (`x` or `~x`) and constants, and whose
//! internal nodes are n-ary conjunctions and disjunctions. Compiled forms such as DNNF, d-DNNF and
//! sd-DNNF are NNF circuits with extra structural guarantees, and those guarantees decide which
//! algebras give meaningful answers:
//!
//! | query                      | algebra                  | exact on   |
//! |----------------------------|--------------------------|------------|
//! | [`sat()`]                  | `(or, and, false, true)` | DNNF       |
//! | [`num_sat`]                | `(+, ×, 0, 1)` on `BigUint` | sd-DNNF |
//! | [`grad()`], [`probability`] | `(+, ×)` on dual numbers | d-DNNF     |
//!
//! Checking these properties is up to the caller: the evaluator never inspects the circuit beyond
//! its shape.
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use nnf_amc::nnf::Nnf;
//!
//! // f = (a & b) | (~a & b)
//! let f: Nnf<&str> = Nnf::or([
//!     Nnf::and([Nnf::var("a"), Nnf::var("b")]),
//!     Nnf::and([Nnf::lit("a", false), Nnf::var("b")]),
//! ]);
//!
//! assert!(nnf_amc::sat(&f));
//! assert_eq!(nnf_amc::num_sat(&f).to_string(), "2");
//!
//! let probs = HashMap::from([("a", 0.5), ("b", 0.25)]);
//! let d = nnf_amc::grad(&f, &probs, Some(&"b")).unwrap();
//! assert!((d.value - 0.25).abs() < 1e-12);
//! assert!((d.deriv - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Core Components
//!
//! - **[`nnf`]** and **[`arena`]**: pointer-based and index-based circuits.
//! - **[`algebra`]**: the [`Algebra`][crate::algebra::Algebra] trait and closure-built algebras.
//! - **[`eval`]**: the evaluator and its configuration.
//! - **[`sat`][mod@sat]** and **[`grad`][mod@grad]**: the built-in algebras.

pub mod algebra;
pub mod arena;
pub mod error;
pub mod eval;
pub mod grad;
pub mod nnf;
pub mod sat;
pub mod types;

pub use eval::{evaluate, evaluate_with};
pub use grad::{grad, probability};
pub use sat::{num_sat, sat};
