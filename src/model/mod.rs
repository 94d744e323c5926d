//! The spatially-balanced-Latin-square frontend: model construction, the
//! public [`solve`] entry point, and solution extraction.

pub mod builder;
pub mod square;

use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::{
    error::{ConfigError, Result},
    solver::{
        constraint::{ConstraintDescriptor, Propagator},
        constraints::{
            all_different::{AllDifferentPropagator, Strength},
            cond_value::CondValuePropagator,
            equal::EqualPropagator,
            linear_sum::LinearSumPropagator,
            product::ProductPropagator,
            reified_eq::ReifiedEqPropagator,
        },
        domain::DomainStore,
        heuristics::{
            value::{MinValueFirst, ValueOrderingHeuristic},
            variable::{DomOverWeightedDegree, SelectFirst, VariableSelectionHeuristic},
        },
        search::{BacktrackingSearch, SearchBudget, SearchOutcome},
        stats::SearchStats,
        VariableId,
    },
};

use self::square::Square;

/// Resolution method, selecting heuristics and filtering strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// First-unbound variable selection with basic all-different filtering.
    Simple,
    /// Domain-over-weighted-degree selection, Hall-interval filtering and
    /// symmetry breaking.
    Advanced,
}

impl Method {
    fn all_different_strength(self) -> Strength {
        match self {
            Method::Simple => Strength::Basic,
            Method::Advanced => Strength::Hall,
        }
    }

    fn symmetry_breaking(self) -> bool {
        matches!(self, Method::Advanced)
    }
}

impl FromStr for Method {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Method::Simple),
            "advanced" => Ok(Method::Advanced),
            other => Err(ConfigError::UnknownMethod(other.to_string()).into()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Simple => write!(f, "simple"),
            Method::Advanced => write!(f, "advanced"),
        }
    }
}

/// A declarative constraint, turned into a runnable propagator by
/// [`ConstraintDef::build`].
#[derive(Debug, Clone)]
pub enum ConstraintDef {
    AllDifferent {
        vars: Vec<VariableId>,
        strength: Strength,
    },
    ReifiedEq {
        var: VariableId,
        value: i64,
        flag: VariableId,
    },
    Product {
        a: VariableId,
        b: VariableId,
        result: VariableId,
    },
    CondValue {
        active: VariableId,
        value: i64,
        out: VariableId,
    },
    LinearSum {
        terms: Vec<VariableId>,
        total: VariableId,
    },
    Equal {
        left: VariableId,
        right: VariableId,
    },
}

impl ConstraintDef {
    pub fn build(&self) -> Box<dyn Propagator> {
        match self {
            ConstraintDef::AllDifferent { vars, strength } => {
                Box::new(AllDifferentPropagator::new(vars.clone(), *strength))
            }
            ConstraintDef::ReifiedEq { var, value, flag } => {
                Box::new(ReifiedEqPropagator::new(*var, *value, *flag))
            }
            ConstraintDef::Product { a, b, result } => {
                Box::new(ProductPropagator::new(*a, *b, *result))
            }
            ConstraintDef::CondValue { active, value, out } => {
                Box::new(CondValuePropagator::new(*active, *value, *out))
            }
            ConstraintDef::LinearSum { terms, total } => {
                Box::new(LinearSumPropagator::new(terms.clone(), *total))
            }
            ConstraintDef::Equal { left, right } => Box::new(EqualPropagator::new(*left, *right)),
        }
    }
}

/// One problem instance: the initial domains, the posted constraints, and
/// the cell variable grid. Lives for the duration of a single [`solve`].
#[derive(Debug)]
pub struct Model {
    pub n: usize,
    pub cells: Vec<Vec<VariableId>>,
    pub store: DomainStore,
    pub constraints: Vec<ConstraintDef>,
}

impl Model {
    pub fn build_constraints(&self) -> Vec<Box<dyn Propagator>> {
        self.constraints.iter().map(ConstraintDef::build).collect()
    }
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub n: i64,
    pub method: Method,
    pub budget: SearchBudget,
}

impl SolveOptions {
    pub fn new(n: i64, method: Method) -> Self {
        Self {
            n,
            method,
            budget: SearchBudget::unlimited(),
        }
    }
}

/// Terminal outcome of a solve: an assignment, a proof of exhaustion, or a
/// spent budget. Never a partial assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Solved(Square),
    Unsatisfiable,
    TimedOut,
}

#[derive(Debug)]
pub struct SolveReport {
    pub outcome: Outcome,
    pub stats: SearchStats,
    pub descriptors: Vec<ConstraintDescriptor>,
}

/// Builds the model for `options.n` and searches for a spatially balanced
/// Latin square.
///
/// Configuration problems (negative size) are reported before any solving
/// is attempted; `Unsatisfiable` and `TimedOut` are ordinary outcomes.
pub fn solve(options: &SolveOptions) -> Result<SolveReport> {
    if options.n < 0 {
        return Err(ConfigError::InvalidSize(options.n).into());
    }
    let n = options.n as usize;

    let model = builder::build(n, options.method);
    let constraints = model.build_constraints();
    info!(
        n,
        variables = model.store.len(),
        constraints = constraints.len(),
        "problem instantiated"
    );

    let (variable_heuristic, value_heuristic): (
        Box<dyn VariableSelectionHeuristic>,
        Box<dyn ValueOrderingHeuristic>,
    ) = match options.method {
        Method::Simple => (Box::new(SelectFirst), Box::new(MinValueFirst)),
        Method::Advanced => (Box::new(DomOverWeightedDegree), Box::new(MinValueFirst)),
    };

    let search = BacktrackingSearch::new(variable_heuristic, value_heuristic)
        .with_budget(options.budget);
    let (outcome, stats) = search.solve(&constraints, model.store.clone());

    let outcome = match outcome {
        SearchOutcome::Solved(store) => Outcome::Solved(Square::from_store(&store, &model.cells)),
        SearchOutcome::Exhausted => Outcome::Unsatisfiable,
        SearchOutcome::TimedOut => Outcome::TimedOut,
    };
    info!(nodes = stats.nodes_visited, backtracks = stats.backtracks, "search finished");

    let descriptors = constraints
        .iter()
        .map(|constraint| constraint.descriptor())
        .collect();

    Ok(SolveReport {
        outcome,
        stats,
        descriptors,
    })
}
