//! A guarded assignment: `active = 1 => out = value`, `active = 0 => out = 0`.

use crate::solver::{
    constraint::{ConstraintDescriptor, ConstraintPriority, Propagator},
    constraints::bind_value,
    domain::DomainStore,
    VariableId,
};

/// Enforces `out = if active { value } else { 0 }` for an {0, 1} guard.
#[derive(Debug, Clone)]
pub struct CondValuePropagator {
    active: VariableId,
    value: i64,
    out: VariableId,
    vars: [VariableId; 2],
}

impl CondValuePropagator {
    pub fn new(active: VariableId, value: i64, out: VariableId) -> Self {
        Self {
            active,
            value,
            out,
            vars: [active, out],
        }
    }
}

impl Propagator for CondValuePropagator {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "CondValue".to_string(),
            description: format!("?{} == if ?{} {{ {} }} else {{ 0 }}", self.out, self.active, self.value),
        }
    }

    fn priority(&self) -> ConstraintPriority {
        ConstraintPriority::High
    }

    fn revise(&self, _target: VariableId, store: &DomainStore) -> Option<DomainStore> {
        let active_domain = store.domain(self.active);
        let out_domain = store.domain(self.out);

        let mut next = store.clone();
        let mut changed = false;

        // active -> out
        match active_domain.singleton_value() {
            Some(1) => next = bind_value(next, &mut changed, self.out, self.value),
            Some(0) => next = bind_value(next, &mut changed, self.out, 0),
            _ => {
                // Whatever the guard ends up as, out takes one of two values.
                let narrowed = out_domain.retain(|v| v == 0 || v == self.value);
                if narrowed.len() < out_domain.len() {
                    next = next.update(self.out, narrowed);
                    changed = true;
                }
            }
        }

        // out -> active
        if !out_domain.contains(self.value) && active_domain.contains(1) {
            next = next.update(self.active, next.domain(self.active).remove(1));
            changed = true;
        }
        if !out_domain.contains(0) && active_domain.contains(0) {
            next = next.update(self.active, next.domain(self.active).remove(0));
            changed = true;
        }

        changed.then_some(next)
    }
}
