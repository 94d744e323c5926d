pub mod all_different;
pub mod cond_value;
pub mod equal;
pub mod linear_sum;
pub mod product;
pub mod reified_eq;

use crate::solver::{domain::DomainStore, VariableId};

/// Narrows `variable` to `{value}` in `store`, setting `changed` when the
/// domain shrank. Reads the domain from the store being built, so
/// successive bindings within one revise call compose.
pub(crate) fn bind_value(
    store: DomainStore,
    changed: &mut bool,
    variable: VariableId,
    value: i64,
) -> DomainStore {
    let current = store.domain(variable);
    let narrowed = current.narrow_to_value(value);
    if narrowed.len() < current.len() {
        *changed = true;
        store.update(variable, narrowed)
    } else {
        store
    }
}
