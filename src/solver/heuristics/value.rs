//! Strategies for ordering the values tried for a branching variable.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::solver::{domain::Domain, VariableId};

/// A strategy for the order in which a variable's candidate values are
/// tried.
pub trait ValueOrderingHeuristic {
    fn order_values(&self, variable: VariableId, domain: &Domain) -> Vec<i64>;
}

/// Tries the smallest remaining value first.
pub struct MinValueFirst;

impl ValueOrderingHeuristic for MinValueFirst {
    fn order_values(&self, _variable: VariableId, domain: &Domain) -> Vec<i64> {
        domain.iter().collect()
    }
}

/// Tries values in a seeded pseudo-random order.
///
/// The shuffle is keyed on (seed, variable), so a given seed always yields
/// the same search.
pub struct ShuffledValues {
    seed: u64,
}

impl ShuffledValues {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl ValueOrderingHeuristic for ShuffledValues {
    fn order_values(&self, variable: VariableId, domain: &Domain) -> Vec<i64> {
        let mut values: Vec<i64> = domain.iter().collect();
        let stream = self.seed ^ u64::from(variable).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        let mut rng = ChaCha8Rng::seed_from_u64(stream);
        values.shuffle(&mut rng);
        values
    }
}
