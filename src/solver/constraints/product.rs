//! Boolean conjunction as a product: `a * b = result` over {0, 1}.

use crate::solver::{
    constraint::{ConstraintDescriptor, ConstraintPriority, Propagator},
    constraints::bind_value,
    domain::DomainStore,
    VariableId,
};

/// Enforces `result = a AND b` for three {0, 1} variables.
#[derive(Debug, Clone)]
pub struct ProductPropagator {
    a: VariableId,
    b: VariableId,
    result: VariableId,
    vars: [VariableId; 3],
}

impl ProductPropagator {
    pub fn new(a: VariableId, b: VariableId, result: VariableId) -> Self {
        Self {
            a,
            b,
            result,
            vars: [a, b, result],
        }
    }
}

impl Propagator for ProductPropagator {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "Product".to_string(),
            description: format!("?{} == ?{} * ?{}", self.result, self.a, self.b),
        }
    }

    fn priority(&self) -> ConstraintPriority {
        ConstraintPriority::High
    }

    fn revise(&self, _target: VariableId, store: &DomainStore) -> Option<DomainStore> {
        let a_value = store.domain(self.a).singleton_value();
        let b_value = store.domain(self.b).singleton_value();
        let result_value = store.domain(self.result).singleton_value();

        let mut next = store.clone();
        let mut changed = false;

        if a_value == Some(0) || b_value == Some(0) {
            next = bind_value(next, &mut changed, self.result, 0);
        } else if a_value == Some(1) && b_value == Some(1) {
            next = bind_value(next, &mut changed, self.result, 1);
        }

        match result_value {
            Some(1) => {
                next = bind_value(next, &mut changed, self.a, 1);
                next = bind_value(next, &mut changed, self.b, 1);
            }
            Some(0) => {
                if a_value == Some(1) {
                    next = bind_value(next, &mut changed, self.b, 0);
                }
                if b_value == Some(1) {
                    next = bind_value(next, &mut changed, self.a, 0);
                }
            }
            _ => {}
        }

        changed.then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::domain::Domain;

    fn store_of(domains: &[(VariableId, Domain)]) -> DomainStore {
        let mut store = DomainStore::new();
        for (variable, domain) in domains {
            store.insert(*variable, domain.clone());
        }
        store
    }

    #[test]
    fn zero_input_forces_zero_result() {
        let constraint = ProductPropagator::new(0, 1, 2);
        let store = store_of(&[
            (0, Domain::singleton(0)),
            (1, Domain::boolean()),
            (2, Domain::boolean()),
        ]);

        let revised = constraint.revise(2, &store).unwrap();
        assert_eq!(revised.domain(2).singleton_value(), Some(0));
    }

    #[test]
    fn two_true_inputs_force_true_result() {
        let constraint = ProductPropagator::new(0, 1, 2);
        let store = store_of(&[
            (0, Domain::singleton(1)),
            (1, Domain::singleton(1)),
            (2, Domain::boolean()),
        ]);

        let revised = constraint.revise(2, &store).unwrap();
        assert_eq!(revised.domain(2).singleton_value(), Some(1));
    }

    #[test]
    fn true_result_forces_both_inputs() {
        let constraint = ProductPropagator::new(0, 1, 2);
        let store = store_of(&[
            (0, Domain::boolean()),
            (1, Domain::boolean()),
            (2, Domain::singleton(1)),
        ]);

        let revised = constraint.revise(0, &store).unwrap();
        assert_eq!(revised.domain(0).singleton_value(), Some(1));
        assert_eq!(revised.domain(1).singleton_value(), Some(1));
    }

    #[test]
    fn false_result_with_one_true_input_falsifies_the_other() {
        let constraint = ProductPropagator::new(0, 1, 2);
        let store = store_of(&[
            (0, Domain::singleton(1)),
            (1, Domain::boolean()),
            (2, Domain::singleton(0)),
        ]);

        let revised = constraint.revise(1, &store).unwrap();
        assert_eq!(revised.domain(1).singleton_value(), Some(0));
    }

    #[test]
    fn undecided_inputs_leave_everything_alone() {
        let constraint = ProductPropagator::new(0, 1, 2);
        let store = store_of(&[
            (0, Domain::boolean()),
            (1, Domain::boolean()),
            (2, Domain::boolean()),
        ]);

        assert!(constraint.revise(0, &store).is_none());
    }
}
