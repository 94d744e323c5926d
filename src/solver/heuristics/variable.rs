//! Strategies for selecting which variable to branch on next.

use std::collections::HashMap;

use crate::solver::{
    domain::DomainStore, propagation::ConstraintWeights, ConstraintId, VariableId,
};

/// Search-state handed to variable heuristics alongside the store: the
/// accumulated constraint failure weights and the variable-to-constraints
/// dependency map.
pub struct SelectionContext<'a> {
    pub weights: &'a ConstraintWeights,
    pub constraints_of: &'a HashMap<VariableId, Vec<ConstraintId>>,
}

/// A strategy for choosing the next unbound variable.
///
/// Implementations must be deterministic: ties are broken on the variable
/// id so that identical inputs always produce identical searches.
pub trait VariableSelectionHeuristic {
    /// Selects the next variable to branch on, or `None` when every
    /// variable is bound.
    fn select_variable(
        &self,
        store: &DomainStore,
        context: &SelectionContext<'_>,
    ) -> Option<VariableId>;
}

/// Selects the unbound variable with the lowest id.
///
/// The baseline strategy: with cell variables allocated first, this walks
/// the square in declaration order.
pub struct SelectFirst;

impl VariableSelectionHeuristic for SelectFirst {
    fn select_variable(
        &self,
        store: &DomainStore,
        _context: &SelectionContext<'_>,
    ) -> Option<VariableId> {
        store.unbound().map(|(variable, _)| variable).min()
    }
}

/// Domain-over-weighted-degree: favours variables with small domains that
/// participate in frequently-failing constraints.
///
/// The score is |dom(v)| / (1 + Σ weight(c)) over the constraints watching
/// v; comparison is done by cross-multiplication to stay in integers.
pub struct DomOverWeightedDegree;

impl VariableSelectionHeuristic for DomOverWeightedDegree {
    fn select_variable(
        &self,
        store: &DomainStore,
        context: &SelectionContext<'_>,
    ) -> Option<VariableId> {
        let mut best: Option<(u64, u64, VariableId)> = None;

        for (variable, domain) in store.unbound() {
            let weight = 1 + context
                .constraints_of
                .get(&variable)
                .map(|constraints| {
                    constraints
                        .iter()
                        .map(|&constraint| context.weights.weight(constraint))
                        .sum::<u64>()
                })
                .unwrap_or(0);
            let size = domain.len() as u64;

            let better = match best {
                None => true,
                Some((best_size, best_weight, best_variable)) => {
                    let lhs = size * best_weight;
                    let rhs = best_size * weight;
                    lhs < rhs || (lhs == rhs && variable < best_variable)
                }
            };
            if better {
                best = Some((size, weight, variable));
            }
        }

        best.map(|(_, _, variable)| variable)
    }
}
