//! Constructs the constraint network for one problem instance.

use std::collections::HashMap;

use crate::solver::{
    constraints::all_different::Strength,
    domain::{Domain, DomainStore},
    VariableId,
};

use super::{ConstraintDef, Method, Model};

struct ModelBuilder {
    next_variable: VariableId,
    store: DomainStore,
    constraints: Vec<ConstraintDef>,
    // One indicator per (cell, symbol), shared by every term that needs it.
    indicators: HashMap<(VariableId, i64), VariableId>,
}

impl ModelBuilder {
    fn new() -> Self {
        Self {
            next_variable: 0,
            store: DomainStore::new(),
            constraints: Vec::new(),
            indicators: HashMap::new(),
        }
    }

    fn new_variable(&mut self, domain: Domain) -> VariableId {
        let id = self.next_variable;
        self.next_variable += 1;
        self.store.insert(id, domain);
        id
    }

    fn post(&mut self, definition: ConstraintDef) {
        self.constraints.push(definition);
    }

    /// The {0, 1} variable reifying `cell = symbol`.
    fn indicator(&mut self, cell: VariableId, symbol: i64) -> VariableId {
        if let Some(&flag) = self.indicators.get(&(cell, symbol)) {
            return flag;
        }
        let flag = self.new_variable(Domain::boolean());
        self.post(ConstraintDef::ReifiedEq {
            var: cell,
            value: symbol,
            flag,
        });
        self.indicators.insert((cell, symbol), flag);
        flag
    }

    /// A variable carrying `distance` when both indicators hold, else 0.
    fn distance_term(
        &mut self,
        first: VariableId,
        second: VariableId,
        distance: i64,
    ) -> VariableId {
        let both = self.new_variable(Domain::boolean());
        self.post(ConstraintDef::Product {
            a: first,
            b: second,
            result: both,
        });
        let contribution = self.new_variable(Domain::of([0, distance]));
        self.post(ConstraintDef::CondValue {
            active: both,
            value: distance,
            out: contribution,
        });
        contribution
    }
}

/// Builds the full model for an n×n instance: cell variables with row and
/// column permutation constraints, the spatial-balance network, and (for
/// the advanced method) symmetry breaking.
///
/// Cells are allocated first, row-major, so id order walks the square.
pub fn build(n: usize, method: Method) -> Model {
    let mut m = ModelBuilder::new();
    let symbols = n as i64;

    let cells: Vec<Vec<VariableId>> = (0..n)
        .map(|_| {
            (0..n)
                .map(|_| m.new_variable(Domain::range(0, symbols - 1)))
                .collect()
        })
        .collect();

    let strength = method.all_different_strength();
    for row in &cells {
        m.post(ConstraintDef::AllDifferent {
            vars: row.clone(),
            strength,
        });
    }
    for j in 0..n {
        let column = (0..n).map(|i| cells[i][j]).collect();
        m.post(ConstraintDef::AllDifferent {
            vars: column,
            strength,
        });
    }

    post_spatial_balance(&mut m, &cells, n);

    if method.symmetry_breaking() {
        // Transposing a balanced square yields another one, so pin the
        // first row to the first column.
        for i in 0..n {
            m.post(ConstraintDef::Equal {
                left: cells[0][i],
                right: cells[i][0],
            });
        }
    }

    Model {
        n,
        cells,
        store: m.store,
        constraints: m.constraints,
    }
}

/// Posts the spatial-balance network: for every ordered pair of distinct
/// symbols, the summed positional distance across rows equals the one
/// across columns, and a single constant emerges across all pairs through
/// an equality chain on the row sums.
fn post_spatial_balance(m: &mut ModelBuilder, cells: &[Vec<VariableId>], n: usize) {
    let max_distance_sum = (n * n * (n - 1)) as i64;
    let mut pair_sums: Vec<VariableId> = Vec::new();

    for e1 in 0..n as i64 {
        for e2 in 0..n as i64 {
            if e1 == e2 {
                continue;
            }

            let line_sum = m.new_variable(Domain::range(0, max_distance_sum));
            let mut line_terms = Vec::new();
            for i in 0..n {
                for j1 in 0..n {
                    for j2 in 0..n {
                        if j1 == j2 {
                            continue;
                        }
                        let distance = (j1 as i64 - j2 as i64).abs();
                        let e1_here = m.indicator(cells[i][j1], e1);
                        let e2_there = m.indicator(cells[i][j2], e2);
                        line_terms.push(m.distance_term(e1_here, e2_there, distance));
                    }
                }
            }
            m.post(ConstraintDef::LinearSum {
                terms: line_terms,
                total: line_sum,
            });

            let column_sum = m.new_variable(Domain::range(0, max_distance_sum));
            let mut column_terms = Vec::new();
            for j in 0..n {
                for i1 in 0..n {
                    for i2 in 0..n {
                        if i1 == i2 {
                            continue;
                        }
                        let distance = (i1 as i64 - i2 as i64).abs();
                        let e1_here = m.indicator(cells[i1][j], e1);
                        let e2_there = m.indicator(cells[i2][j], e2);
                        column_terms.push(m.distance_term(e1_here, e2_there, distance));
                    }
                }
            }
            m.post(ConstraintDef::LinearSum {
                terms: column_terms,
                total: column_sum,
            });

            m.post(ConstraintDef::Equal {
                left: line_sum,
                right: column_sum,
            });
            pair_sums.push(line_sum);
        }
    }

    // The row sums are pairwise equal to the first, and each equals its
    // column sum, so one global balance constant emerges.
    for &later in pair_sums.iter().skip(1) {
        m.post(ConstraintDef::Equal {
            left: pair_sums[0],
            right: later,
        });
    }
}
