//! The problem-agnostic CSP backend: finite integer domains, propagators,
//! worklist propagation to fixpoint, and backtracking search.

pub mod constraint;
pub mod constraints;
pub mod domain;
pub mod heuristics;
pub mod propagation;
pub mod search;
pub mod stats;
pub mod work_list;

pub type VariableId = u32;
pub type ConstraintId = usize;
