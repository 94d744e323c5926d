//! A constraint-programming solver for spatially balanced Latin squares.
//!
//! An n×n Latin square is *spatially balanced* when, for every pair of
//! distinct symbols, the total positional distance between their
//! occurrences is the same whether measured across rows or across columns,
//! and identical for every pair.
//!
//! The crate is split into two layers:
//!
//! - [`solver`] — a problem-agnostic CSP backend: finite integer domains
//!   over persistent sets, propagators (all-different, reification,
//!   products, conditional values, linear sums, equality), a worklist
//!   propagation engine, and depth-first backtracking search with
//!   pluggable heuristics.
//! - [`model`] — the problem frontend: it builds the cell variables, the
//!   row/column permutation constraints and the balance network, and
//!   exposes [`model::solve`].
//!
//! # Example
//!
//! ```
//! use sbls::model::{solve, Method, Outcome, SolveOptions};
//!
//! let report = solve(&SolveOptions::new(1, Method::Simple)).unwrap();
//! assert!(matches!(report.outcome, Outcome::Solved(_)));
//! ```
pub mod error;
pub mod model;
pub mod solver;
