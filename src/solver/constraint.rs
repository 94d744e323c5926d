use crate::solver::{domain::DomainStore, VariableId};

#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// Scheduling class for the propagation worklist. Cheaper filters run at a
/// higher priority so expensive ones see already-narrowed domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConstraintPriority {
    Low,
    Normal,
    High,
}

/// A posted constraint's filtering routine.
///
/// Propagators are immutable once built and only ever narrow domains: a
/// `revise` call either returns a store in which one or more of the
/// constraint's variables lost values (an emptied domain signals failure to
/// the engine), or `None` when nothing could be pruned.
pub trait Propagator: std::fmt::Debug {
    fn variables(&self) -> &[VariableId];

    fn descriptor(&self) -> ConstraintDescriptor;

    fn priority(&self) -> ConstraintPriority {
        ConstraintPriority::Normal
    }

    fn revise(&self, target: VariableId, store: &DomainStore) -> Option<DomainStore>;
}
