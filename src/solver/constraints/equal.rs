use crate::solver::{
    constraint::{ConstraintDescriptor, ConstraintPriority, Propagator},
    domain::DomainStore,
    VariableId,
};

/// Enforces equality between two variables (`left == right`).
///
/// A revise call prunes the target variable's domain to the intersection
/// of the two domains.
#[derive(Debug, Clone)]
pub struct EqualPropagator {
    vars: [VariableId; 2],
}

impl EqualPropagator {
    pub fn new(left: VariableId, right: VariableId) -> Self {
        Self {
            vars: [left, right],
        }
    }
}

impl Propagator for EqualPropagator {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "Equal".to_string(),
            description: format!("?{} == ?{}", self.vars[0], self.vars[1]),
        }
    }

    fn priority(&self) -> ConstraintPriority {
        ConstraintPriority::High
    }

    fn revise(&self, target: VariableId, store: &DomainStore) -> Option<DomainStore> {
        let other = if target == self.vars[0] {
            self.vars[1]
        } else {
            self.vars[0]
        };

        let target_domain = store.domain(target);
        let other_domain = store.domain(other);

        let narrowed = target_domain.intersect(other_domain);
        if narrowed.len() < target_domain.len() {
            Some(store.update(target, narrowed))
        } else {
            None
        }
    }
}
