use im::{HashMap, OrdSet};

use crate::solver::VariableId;

/// The finite domain of one variable: an ordered set of candidate integers.
///
/// Booleans are modelled as domains over {0, 1}. All narrowing operations
/// return a new `Domain`; the persistent backing set makes this cheap.
/// An empty result is the propagation-failure signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain(OrdSet<i64>);

impl Domain {
    pub fn new(values: OrdSet<i64>) -> Self {
        Self(values)
    }

    pub fn empty() -> Self {
        Self(OrdSet::new())
    }

    pub fn singleton(value: i64) -> Self {
        Self(OrdSet::unit(value))
    }

    /// The inclusive range `lo..=hi`.
    pub fn range(lo: i64, hi: i64) -> Self {
        Self((lo..=hi).collect())
    }

    /// The {0, 1} domain used for indicator variables.
    pub fn boolean() -> Self {
        Self::range(0, 1)
    }

    pub fn of(values: impl IntoIterator<Item = i64>) -> Self {
        Self(values.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.0.len() == 1
    }

    /// If the domain holds exactly one value, returns it.
    pub fn singleton_value(&self) -> Option<i64> {
        if self.is_singleton() {
            self.0.get_min().copied()
        } else {
            None
        }
    }

    pub fn min(&self) -> Option<i64> {
        self.0.get_min().copied()
    }

    pub fn max(&self) -> Option<i64> {
        self.0.get_max().copied()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.0.contains(&value)
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn remove(&self, value: i64) -> Self {
        Self(self.0.without(&value))
    }

    pub fn retain(&self, keep: impl Fn(i64) -> bool) -> Self {
        Self(self.0.iter().copied().filter(|&v| keep(v)).collect())
    }

    /// Narrows to `{value}`, or to the empty domain if `value` is absent.
    pub fn narrow_to_value(&self, value: i64) -> Self {
        if self.contains(value) {
            Self::singleton(value)
        } else {
            Self::empty()
        }
    }

    pub fn narrow_to_range(&self, lo: i64, hi: i64) -> Self {
        self.retain(|v| v >= lo && v <= hi)
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self(self.0.clone().intersection(other.0.clone()))
    }
}

/// The domains of every variable in a problem instance.
///
/// Built on persistent maps, so a clone is O(1) and shares structure with
/// its parent. The search engine clones the store before each decision;
/// that clone is the trail checkpoint, and discarding a speculative store
/// on backtrack restores every domain exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: HashMap<VariableId, Domain>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self {
            domains: HashMap::new(),
        }
    }

    /// Registers a variable while building a model.
    pub fn insert(&mut self, variable: VariableId, domain: Domain) {
        self.domains.insert(variable, domain);
    }

    /// The current domain of `variable`.
    ///
    /// Panics on an unregistered variable: every propagator only ever
    /// names variables the model registered.
    pub fn domain(&self, variable: VariableId) -> &Domain {
        &self.domains[&variable]
    }

    /// A new store with `variable` narrowed to `domain`.
    pub fn update(&self, variable: VariableId, domain: Domain) -> Self {
        Self {
            domains: self.domains.update(variable, domain),
        }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn is_bound(&self, variable: VariableId) -> bool {
        self.domain(variable).is_singleton()
    }

    pub fn bounds(&self, variable: VariableId) -> Option<(i64, i64)> {
        let domain = self.domain(variable);
        Some((domain.min()?, domain.max()?))
    }

    pub fn contains(&self, variable: VariableId, value: i64) -> bool {
        self.domain(variable).contains(value)
    }

    /// True when every variable's domain is a singleton.
    pub fn is_complete(&self) -> bool {
        self.domains.values().all(Domain::is_singleton)
    }

    /// Variables whose domains still hold more than one value.
    pub fn unbound(&self) -> impl Iterator<Item = (VariableId, &Domain)> + '_ {
        self.domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .map(|(variable, domain)| (*variable, domain))
    }
}

impl Default for DomainStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn narrow_to_value_keeps_present_value() {
        let domain = Domain::range(0, 4);
        let narrowed = domain.narrow_to_value(2);
        assert_eq!(narrowed.singleton_value(), Some(2));
    }

    #[test]
    fn narrow_to_value_empties_on_absent_value() {
        let domain = Domain::of([1, 3]);
        assert!(domain.narrow_to_value(2).is_empty());
    }

    #[test]
    fn remove_and_bounds() {
        let domain = Domain::range(0, 3).remove(0);
        assert_eq!(domain.min(), Some(1));
        assert_eq!(domain.max(), Some(3));
        assert!(!domain.contains(0));
    }

    #[test]
    fn store_update_is_persistent() {
        let mut store = DomainStore::new();
        store.insert(0, Domain::range(0, 2));
        let narrowed = store.update(0, Domain::singleton(1));

        assert_eq!(store.domain(0).len(), 3);
        assert_eq!(narrowed.domain(0).singleton_value(), Some(1));
    }

    #[test]
    fn store_completeness_and_unbound() {
        let mut store = DomainStore::new();
        store.insert(0, Domain::singleton(1));
        store.insert(1, Domain::range(0, 1));

        assert!(!store.is_complete());
        let unbound: Vec<_> = store.unbound().map(|(v, _)| v).collect();
        assert_eq!(unbound, vec![1]);

        let bound = store.update(1, Domain::singleton(0));
        assert!(bound.is_complete());
    }

    proptest! {
        #[test]
        fn narrow_to_range_is_a_subset(values in proptest::collection::btree_set(-50i64..50, 0..20), lo in -50i64..50, hi in -50i64..50) {
            let domain = Domain::of(values.iter().copied());
            let narrowed = domain.narrow_to_range(lo, hi);
            for value in narrowed.iter() {
                prop_assert!(value >= lo && value <= hi);
                prop_assert!(domain.contains(value));
            }
        }
    }
}
