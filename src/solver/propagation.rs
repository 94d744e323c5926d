use std::{collections::HashMap, time::Instant};

use tracing::debug;

use crate::solver::{
    constraint::Propagator, domain::DomainStore, stats::SearchStats, work_list::WorkList,
    ConstraintId, VariableId,
};

/// Failure counts per constraint, accumulated across the whole search.
///
/// Every time a revise call wipes a domain out, the responsible constraint's
/// weight is bumped; the weighted-degree variable heuristic reads these to
/// focus branching on contended variables.
#[derive(Debug, Clone)]
pub struct ConstraintWeights {
    weights: Vec<u64>,
}

impl ConstraintWeights {
    pub fn new(constraint_count: usize) -> Self {
        Self {
            weights: vec![0; constraint_count],
        }
    }

    pub fn bump(&mut self, constraint: ConstraintId) {
        self.weights[constraint] += 1;
    }

    pub fn weight(&self, constraint: ConstraintId) -> u64 {
        self.weights[constraint]
    }
}

/// Runs constraint filtering to fixpoint over a deduplicating worklist.
///
/// The dependency graph maps each variable to the constraints watching it;
/// whenever a revision narrows a domain, every dependent (variable,
/// constraint) arc is re-enqueued until no revision changes anything.
pub struct PropagationEngine {
    dependency_graph: HashMap<VariableId, Vec<ConstraintId>>,
}

impl PropagationEngine {
    pub fn new(constraints: &[Box<dyn Propagator>]) -> Self {
        let mut dependency_graph: HashMap<VariableId, Vec<ConstraintId>> = HashMap::new();
        for (id, constraint) in constraints.iter().enumerate() {
            for &variable in constraint.variables() {
                dependency_graph.entry(variable).or_default().push(id);
            }
        }
        Self { dependency_graph }
    }

    pub fn dependency_graph(&self) -> &HashMap<VariableId, Vec<ConstraintId>> {
        &self.dependency_graph
    }

    /// Propagates until no domain changes (returning the fixpoint store) or
    /// some domain empties (returning `None`).
    pub fn fixpoint(
        &self,
        constraints: &[Box<dyn Propagator>],
        initial: DomainStore,
        stats: &mut SearchStats,
        weights: &mut ConstraintWeights,
    ) -> Option<DomainStore> {
        let mut store = initial;

        let mut worklist = WorkList::new();
        for (id, constraint) in constraints.iter().enumerate() {
            for &variable in constraint.variables() {
                worklist.push(constraint.priority(), variable, id);
            }
        }

        while let Some((target, id)) = worklist.pop() {
            let constraint = &constraints[id];

            let started = Instant::now();
            stats.constraint_stats.entry(id).or_default().revisions += 1;
            let revised = constraint.revise(target, &store);
            stats
                .constraint_stats
                .entry(id)
                .or_default()
                .time_spent_micros += started.elapsed().as_micros() as u64;

            let Some(next) = revised else {
                continue;
            };

            let mut narrowed_variables = Vec::new();
            for &variable in constraint.variables() {
                let before = store.domain(variable).len();
                let after = next.domain(variable).len();
                if after == 0 {
                    stats.constraint_stats.entry(id).or_default().failures += 1;
                    weights.bump(id);
                    debug!(constraint = id, variable, "domain wiped out");
                    return None;
                }
                if after < before {
                    narrowed_variables.push(variable);
                }
            }
            if narrowed_variables.is_empty() {
                continue;
            }

            stats.constraint_stats.entry(id).or_default().prunings += 1;
            store = next;

            for variable in narrowed_variables {
                let Some(dependents) = self.dependency_graph.get(&variable) else {
                    continue;
                };
                for &dependent in dependents {
                    for &neighbour in constraints[dependent].variables() {
                        if neighbour != variable {
                            worklist.push(constraints[dependent].priority(), neighbour, dependent);
                        }
                    }
                }
            }
        }

        debug!("propagation reached fixpoint");
        Some(store)
    }
}
