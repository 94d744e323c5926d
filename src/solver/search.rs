use std::time::{Duration, Instant};

use tracing::debug;

use crate::solver::{
    constraint::Propagator,
    domain::{Domain, DomainStore},
    heuristics::{
        value::ValueOrderingHeuristic,
        variable::{SelectionContext, VariableSelectionHeuristic},
    },
    propagation::{ConstraintWeights, PropagationEngine},
    stats::SearchStats,
};

/// An optional cap on the search effort, checked between decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBudget {
    pub max_nodes: Option<u64>,
    pub max_duration: Option<Duration>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn node_limit(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
            max_duration: None,
        }
    }

    pub fn time_limit(max_duration: Duration) -> Self {
        Self {
            max_nodes: None,
            max_duration: Some(max_duration),
        }
    }
}

/// Terminal state of one search run.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Every variable bound, every constraint satisfied.
    Solved(DomainStore),
    /// The whole tree was explored without finding an assignment.
    Exhausted,
    /// The budget ran out before either of the above.
    TimedOut,
}

enum Descent {
    Found(DomainStore),
    Exhausted,
    TimedOut,
}

/// Depth-first chronological backtracking driven by pluggable variable and
/// value heuristics.
///
/// Each decision narrows a clone of the current store and runs propagation
/// to fixpoint; a contradiction abandons the clone, which restores every
/// domain to its pre-decision state.
pub struct BacktrackingSearch {
    variable_heuristic: Box<dyn VariableSelectionHeuristic>,
    value_heuristic: Box<dyn ValueOrderingHeuristic>,
    budget: SearchBudget,
}

impl BacktrackingSearch {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
            budget: SearchBudget::unlimited(),
        }
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn solve(
        &self,
        constraints: &[Box<dyn Propagator>],
        initial: DomainStore,
    ) -> (SearchOutcome, SearchStats) {
        let engine = PropagationEngine::new(constraints);
        let mut stats = SearchStats::default();
        let mut weights = ConstraintWeights::new(constraints.len());
        let deadline = self.budget.max_duration.map(|limit| Instant::now() + limit);

        let Some(root) = engine.fixpoint(constraints, initial, &mut stats, &mut weights) else {
            return (SearchOutcome::Exhausted, stats);
        };
        if root.is_complete() {
            return (SearchOutcome::Solved(root), stats);
        }

        let outcome = match self.descend(&engine, constraints, root, deadline, &mut stats, &mut weights)
        {
            Descent::Found(store) => SearchOutcome::Solved(store),
            Descent::Exhausted => SearchOutcome::Exhausted,
            Descent::TimedOut => SearchOutcome::TimedOut,
        };
        (outcome, stats)
    }

    fn over_budget(&self, deadline: Option<Instant>, stats: &SearchStats) -> bool {
        if let Some(max_nodes) = self.budget.max_nodes {
            if stats.nodes_visited > max_nodes {
                return true;
            }
        }
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        false
    }

    fn descend(
        &self,
        engine: &PropagationEngine,
        constraints: &[Box<dyn Propagator>],
        store: DomainStore,
        deadline: Option<Instant>,
        stats: &mut SearchStats,
        weights: &mut ConstraintWeights,
    ) -> Descent {
        stats.nodes_visited += 1;
        if self.over_budget(deadline, stats) {
            debug!(nodes = stats.nodes_visited, "search budget exhausted");
            return Descent::TimedOut;
        }
        if store.is_complete() {
            return Descent::Found(store);
        }

        let selected = {
            let context = SelectionContext {
                weights,
                constraints_of: engine.dependency_graph(),
            };
            self.variable_heuristic.select_variable(&store, &context)
        };
        let Some(variable) = selected else {
            return Descent::Found(store);
        };

        let domain = store.domain(variable).clone();
        for value in self.value_heuristic.order_values(variable, &domain) {
            debug!(variable, value, "branching");
            // The parent store is the checkpoint; only the clone is narrowed.
            let guess = store.update(variable, Domain::singleton(value));
            if let Some(fixed) = engine.fixpoint(constraints, guess, stats, weights) {
                match self.descend(engine, constraints, fixed, deadline, stats, weights) {
                    Descent::Exhausted => {}
                    other => return other,
                }
            }
            stats.backtracks += 1;
        }

        Descent::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{
        constraints::all_different::{AllDifferentPropagator, Strength},
        heuristics::{value::MinValueFirst, variable::SelectFirst},
    };

    fn store_of(domains: &[(u32, Domain)]) -> DomainStore {
        let mut store = DomainStore::new();
        for (variable, domain) in domains {
            store.insert(*variable, domain.clone());
        }
        store
    }

    fn first_unbound_search() -> BacktrackingSearch {
        BacktrackingSearch::new(Box::new(SelectFirst), Box::new(MinValueFirst))
    }

    #[test]
    fn solves_a_small_permutation_problem() {
        let constraints: Vec<Box<dyn Propagator>> = vec![Box::new(AllDifferentPropagator::new(
            vec![0, 1, 2],
            Strength::Basic,
        ))];
        let store = store_of(&[
            (0, Domain::range(0, 2)),
            (1, Domain::range(0, 2)),
            (2, Domain::range(0, 2)),
        ]);

        let (outcome, _stats) = first_unbound_search().solve(&constraints, store);
        let SearchOutcome::Solved(solution) = outcome else {
            panic!("expected a solution");
        };
        let values: Vec<i64> = (0..3)
            .map(|v| solution.domain(v).singleton_value().unwrap())
            .collect();
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
        // Smallest-value-first with first-unbound selection is deterministic.
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn exhausts_an_unsatisfiable_problem() {
        let constraints: Vec<Box<dyn Propagator>> = vec![Box::new(AllDifferentPropagator::new(
            vec![0, 1, 2],
            Strength::Basic,
        ))];
        let store = store_of(&[
            (0, Domain::range(0, 1)),
            (1, Domain::range(0, 1)),
            (2, Domain::range(0, 1)),
        ]);

        let (outcome, _stats) = first_unbound_search().solve(&constraints, store);
        assert!(matches!(outcome, SearchOutcome::Exhausted));
    }

    #[test]
    fn node_budget_cuts_the_search_short() {
        // Two independent binary alldiffs: no propagation at the root, so
        // at least one decision is needed.
        let constraints: Vec<Box<dyn Propagator>> = vec![
            Box::new(AllDifferentPropagator::new(vec![0, 1], Strength::Basic)),
            Box::new(AllDifferentPropagator::new(vec![2, 3], Strength::Basic)),
        ];
        let store = store_of(&[
            (0, Domain::range(0, 1)),
            (1, Domain::range(0, 1)),
            (2, Domain::range(0, 1)),
            (3, Domain::range(0, 1)),
        ]);

        let search = first_unbound_search().with_budget(SearchBudget::node_limit(0));
        let (outcome, stats) = search.solve(&constraints, store);
        assert!(matches!(outcome, SearchOutcome::TimedOut));
        assert_eq!(stats.nodes_visited, 1);
    }

    #[test]
    fn failed_search_leaves_the_initial_store_intact() {
        let constraints: Vec<Box<dyn Propagator>> = vec![Box::new(AllDifferentPropagator::new(
            vec![0, 1, 2],
            Strength::Basic,
        ))];
        let store = store_of(&[
            (0, Domain::range(0, 1)),
            (1, Domain::range(0, 1)),
            (2, Domain::range(0, 1)),
        ]);
        let snapshot = store.clone();

        let (outcome, _stats) = first_unbound_search().solve(&constraints, store.clone());
        assert!(matches!(outcome, SearchOutcome::Exhausted));
        assert_eq!(store, snapshot);
    }
}
