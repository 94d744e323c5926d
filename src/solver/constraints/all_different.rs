use im::OrdSet;

use crate::solver::{
    constraint::{ConstraintDescriptor, Propagator},
    domain::{Domain, DomainStore},
    VariableId,
};

/// Filtering strength for [`AllDifferentPropagator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// Prune values already taken by bound peers.
    Basic,
    /// Additionally detect Hall intervals: value ranges exactly filled by
    /// the variables whose domains fit inside them.
    Hall,
}

/// Requires every variable in the group to take a distinct value.
///
/// Both strengths start with a pigeonhole check over the group's candidate
/// values, so k variables sharing k-1 values are refuted without any
/// branching.
#[derive(Debug, Clone)]
pub struct AllDifferentPropagator {
    vars: Vec<VariableId>,
    strength: Strength,
}

impl AllDifferentPropagator {
    pub fn new(vars: Vec<VariableId>, strength: Strength) -> Self {
        Self { vars, strength }
    }

    fn hall_filter(&self, target: VariableId, store: &DomainStore, mut current: Domain) -> Domain {
        let mut lower_bounds = Vec::new();
        let mut upper_bounds = Vec::new();
        for &variable in &self.vars {
            if variable == target {
                continue;
            }
            let domain = store.domain(variable);
            let (Some(min), Some(max)) = (domain.min(), domain.max()) else {
                return Domain::empty();
            };
            lower_bounds.push(min);
            upper_bounds.push(max);
        }
        lower_bounds.sort_unstable();
        lower_bounds.dedup();
        upper_bounds.sort_unstable();
        upper_bounds.dedup();

        for &lo in &lower_bounds {
            for &hi in &upper_bounds {
                if lo > hi {
                    continue;
                }
                let width = (hi - lo + 1) as usize;
                let mut inside = 0usize;
                for &variable in &self.vars {
                    if variable == target {
                        continue;
                    }
                    let domain = store.domain(variable);
                    if let (Some(min), Some(max)) = (domain.min(), domain.max()) {
                        if min >= lo && max <= hi {
                            inside += 1;
                        }
                    }
                }
                if inside > width {
                    return Domain::empty();
                }
                if inside == width {
                    // The interval is saturated; the target must look elsewhere.
                    current = current.retain(|value| value < lo || value > hi);
                    if current.is_empty() {
                        return current;
                    }
                }
            }
        }
        current
    }
}

impl Propagator for AllDifferentPropagator {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let vars_str = self
            .vars
            .iter()
            .map(|v| format!("?{}", v))
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "AllDifferent".to_string(),
            description: format!("AllDifferent({})", vars_str),
        }
    }

    fn revise(&self, target: VariableId, store: &DomainStore) -> Option<DomainStore> {
        let target_domain = store.domain(target);

        // Pigeonhole check over the whole group.
        let mut candidates: OrdSet<i64> = OrdSet::new();
        for &variable in &self.vars {
            for value in store.domain(variable).iter() {
                candidates.insert(value);
            }
        }
        if self.vars.len() > candidates.len() {
            return Some(store.update(target, Domain::empty()));
        }

        // Values already claimed by bound peers.
        let mut taken: OrdSet<i64> = OrdSet::new();
        for &variable in &self.vars {
            if variable != target {
                if let Some(value) = store.domain(variable).singleton_value() {
                    taken.insert(value);
                }
            }
        }
        let mut narrowed = target_domain.retain(|value| !taken.contains(&value));

        if self.strength == Strength::Hall && !narrowed.is_empty() {
            narrowed = self.hall_filter(target, store, narrowed);
        }

        if narrowed.len() < target_domain.len() {
            Some(store.update(target, narrowed))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store_of(domains: &[(VariableId, Domain)]) -> DomainStore {
        let mut store = DomainStore::new();
        for (variable, domain) in domains {
            store.insert(*variable, domain.clone());
        }
        store
    }

    #[test]
    fn revise_prunes_singleton_value_from_peers() {
        let constraint = AllDifferentPropagator::new(vec![0, 1, 2], Strength::Basic);
        let store = store_of(&[
            (0, Domain::of([1, 2])),
            (1, Domain::singleton(1)),
            (2, Domain::of([1, 3])),
        ]);

        let revised = constraint.revise(0, &store).unwrap();
        assert_eq!(revised.domain(0).singleton_value(), Some(2));
    }

    #[test]
    fn revise_does_nothing_if_no_singletons() {
        let constraint = AllDifferentPropagator::new(vec![0, 1], Strength::Basic);
        let store = store_of(&[(0, Domain::of([1, 2])), (1, Domain::of([1, 2]))]);

        assert!(constraint.revise(0, &store).is_none());
    }

    #[test]
    fn revise_prunes_multiple_claimed_values() {
        let constraint = AllDifferentPropagator::new(vec![0, 1, 2], Strength::Basic);
        let store = store_of(&[
            (0, Domain::of([1, 2, 3])),
            (1, Domain::singleton(1)),
            (2, Domain::singleton(2)),
        ]);

        let revised = constraint.revise(0, &store).unwrap();
        assert_eq!(revised.domain(0).singleton_value(), Some(3));
    }

    #[test]
    fn pigeonhole_is_refuted_without_branching() {
        // Three variables, two candidate values: no singleton exists yet,
        // but the group can never be completed.
        let constraint = AllDifferentPropagator::new(vec![0, 1, 2], Strength::Basic);
        let store = store_of(&[
            (0, Domain::of([0, 1])),
            (1, Domain::of([0, 1])),
            (2, Domain::of([0, 1])),
        ]);

        let revised = constraint.revise(0, &store).unwrap();
        assert!(revised.domain(0).is_empty());
    }

    #[test]
    fn hall_interval_squeezes_outside_variable() {
        // Variables 0 and 1 jointly saturate {1, 2}, so variable 2 loses
        // both values.
        let constraint = AllDifferentPropagator::new(vec![0, 1, 2], Strength::Hall);
        let store = store_of(&[
            (0, Domain::of([1, 2])),
            (1, Domain::of([1, 2])),
            (2, Domain::of([1, 2, 3])),
        ]);

        let revised = constraint.revise(2, &store).unwrap();
        assert_eq!(revised.domain(2).singleton_value(), Some(3));
    }

    #[test]
    fn basic_strength_misses_the_hall_interval() {
        let constraint = AllDifferentPropagator::new(vec![0, 1, 2], Strength::Basic);
        let store = store_of(&[
            (0, Domain::of([1, 2])),
            (1, Domain::of([1, 2])),
            (2, Domain::of([1, 2, 3])),
        ]);

        assert!(constraint.revise(2, &store).is_none());
    }

    #[test]
    fn hall_overflow_is_a_contradiction() {
        // Three peers crammed into the two-value interval {1, 2}.
        let constraint = AllDifferentPropagator::new(vec![0, 1, 2, 3], Strength::Hall);
        let store = store_of(&[
            (0, Domain::of([1, 2])),
            (1, Domain::of([1, 2])),
            (2, Domain::of([1, 2])),
            (3, Domain::of([0, 1, 2, 3])),
        ]);

        let revised = constraint.revise(3, &store).unwrap();
        assert!(revised.domain(3).is_empty());
    }
}
