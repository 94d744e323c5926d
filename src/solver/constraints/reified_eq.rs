//! Reifies an equality against a constant: `flag = 1 <==> var = value`.

use crate::solver::{
    constraint::{ConstraintDescriptor, ConstraintPriority, Propagator},
    domain::DomainStore,
    VariableId,
};

/// Enforces `flag = 1 <==> var = value`, where `flag` ranges over {0, 1}.
#[derive(Debug, Clone)]
pub struct ReifiedEqPropagator {
    var: VariableId,
    value: i64,
    flag: VariableId,
    vars: [VariableId; 2],
}

impl ReifiedEqPropagator {
    pub fn new(var: VariableId, value: i64, flag: VariableId) -> Self {
        Self {
            var,
            value,
            flag,
            vars: [var, flag],
        }
    }
}

impl Propagator for ReifiedEqPropagator {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "ReifiedEq".to_string(),
            description: format!("?{} <==> (?{} == {})", self.flag, self.var, self.value),
        }
    }

    fn priority(&self) -> ConstraintPriority {
        ConstraintPriority::High
    }

    fn revise(&self, _target: VariableId, store: &DomainStore) -> Option<DomainStore> {
        let var_domain = store.domain(self.var);
        let flag_domain = store.domain(self.flag);

        let mut next = store.clone();
        let mut changed = false;

        // flag -> var
        match flag_domain.singleton_value() {
            Some(1) => {
                let narrowed = var_domain.narrow_to_value(self.value);
                if narrowed.len() < var_domain.len() {
                    next = next.update(self.var, narrowed);
                    changed = true;
                }
            }
            Some(0) => {
                if var_domain.contains(self.value) {
                    next = next.update(self.var, var_domain.remove(self.value));
                    changed = true;
                }
            }
            _ => {}
        }

        // var -> flag
        if !var_domain.contains(self.value) {
            if flag_domain.contains(1) {
                next = next.update(self.flag, flag_domain.remove(1));
                changed = true;
            }
        } else if var_domain.is_singleton() && flag_domain.contains(0) {
            next = next.update(self.flag, flag_domain.remove(0));
            changed = true;
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
    fn true_flag_binds_the_variable() {
        let constraint = ReifiedEqPropagator::new(0, 2, 1);
        let store = store_of(&[(0, Domain::range(0, 3)), (1, Domain::singleton(1))]);

        let revised = constraint.revise(0, &store).unwrap();
        assert_eq!(revised.domain(0).singleton_value(), Some(2));
    }

    #[test]
    fn false_flag_removes_the_value() {
        let constraint = ReifiedEqPropagator::new(0, 2, 1);
        let store = store_of(&[(0, Domain::range(0, 3)), (1, Domain::singleton(0))]);

        let revised = constraint.revise(0, &store).unwrap();
        assert!(!revised.domain(0).contains(2));
        assert_eq!(revised.domain(0).len(), 3);
    }

    #[test]
    fn bound_variable_fixes_the_flag() {
        let constraint = ReifiedEqPropagator::new(0, 2, 1);
        let store = store_of(&[(0, Domain::singleton(2)), (1, Domain::boolean())]);

        let revised = constraint.revise(1, &store).unwrap();
        assert_eq!(revised.domain(1).singleton_value(), Some(1));
    }

    #[test]
    fn absent_value_falsifies_the_flag() {
        let constraint = ReifiedEqPropagator::new(0, 5, 1);
        let store = store_of(&[(0, Domain::range(0, 3)), (1, Domain::boolean())]);

        let revised = constraint.revise(1, &store).unwrap();
        assert_eq!(revised.domain(1).singleton_value(), Some(0));
    }

    #[test]
    fn incompatible_bindings_wipe_a_domain() {
        // flag says "equal" but the variable is bound elsewhere.
        let constraint = ReifiedEqPropagator::new(0, 2, 1);
        let store = store_of(&[(0, Domain::singleton(3)), (1, Domain::singleton(1))]);

        let revised = constraint.revise(0, &store).unwrap();
        assert!(revised.domain(0).is_empty() || revised.domain(1).is_empty());
    }

    #[test]
    fn no_change_returns_none() {
        let constraint = ReifiedEqPropagator::new(0, 2, 1);
        let store = store_of(&[(0, Domain::range(0, 3)), (1, Domain::boolean())]);

        assert!(constraint.revise(0, &store).is_none());
    }
}
