//! A sum relationship: `Σ(terms) = total`, with bounds propagation in both
//! directions.

use crate::solver::{
    constraint::{ConstraintDescriptor, ConstraintPriority, Propagator},
    domain::DomainStore,
    VariableId,
};

/// Enforces `terms[0] + terms[1] + ... == total`.
#[derive(Debug, Clone)]
pub struct LinearSumPropagator {
    terms: Vec<VariableId>,
    total: VariableId,
    vars: Vec<VariableId>,
}

impl LinearSumPropagator {
    pub fn new(terms: Vec<VariableId>, total: VariableId) -> Self {
        let mut vars = terms.clone();
        vars.push(total);
        Self { terms, total, vars }
    }
}

impl Propagator for LinearSumPropagator {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "LinearSum".to_string(),
            description: format!("?{} == sum of {} terms", self.total, self.terms.len()),
        }
    }

    fn priority(&self) -> ConstraintPriority {
        ConstraintPriority::Low
    }

    fn revise(&self, target: VariableId, store: &DomainStore) -> Option<DomainStore> {
        let is_term = self.terms.contains(&target);
        let is_total = target == self.total;
        if !is_term && !is_total {
            return None;
        }

        let target_domain = store.domain(target);

        let narrowed = if is_total {
            // min(total) >= Σ min(term), max(total) <= Σ max(term).
            let mut lo = 0i64;
            let mut hi = 0i64;
            for &term in &self.terms {
                let domain = store.domain(term);
                let (Some(min), Some(max)) = (domain.min(), domain.max()) else {
                    return None;
                };
                lo += min;
                hi += max;
            }
            target_domain.narrow_to_range(lo, hi)
        } else {
            // target >= min(total) - Σ max(others),
            // target <= max(total) - Σ min(others).
            let total_domain = store.domain(self.total);
            let (Some(total_min), Some(total_max)) = (total_domain.min(), total_domain.max())
            else {
                return None;
            };

            let mut others_min = 0i64;
            let mut others_max = 0i64;
            for &term in &self.terms {
                if term == target {
                    continue;
                }
                let domain = store.domain(term);
                let (Some(min), Some(max)) = (domain.min(), domain.max()) else {
                    return None;
                };
                others_min += min;
                others_max += max;
            }

            target_domain.narrow_to_range(total_min - others_max, total_max - others_min)
        };

        if narrowed.len() < target_domain.len() {
            Some(store.update(target, narrowed))
        } else {
            None
        }
    }
}
