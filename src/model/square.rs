//! Solved squares: extraction from a complete store and verification of
//! the Latin and spatial-balance properties.

use serde::Serialize;

use crate::solver::{domain::DomainStore, VariableId};

/// A fully assigned n×n square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Square {
    rows: Vec<Vec<i64>>,
}

impl Square {
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    /// Reads every cell out of a complete store.
    pub fn from_store(store: &DomainStore, cells: &[Vec<VariableId>]) -> Self {
        let rows = cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&cell| {
                        store
                            .domain(cell)
                            .singleton_value()
                            .expect("a solved store binds every cell")
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn order(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    pub fn value(&self, row: usize, column: usize) -> i64 {
        self.rows[row][column]
    }

    /// True when every row and every column is a permutation of 0..n.
    pub fn is_latin(&self) -> bool {
        let n = self.order();
        for row in &self.rows {
            if !is_permutation(row, n) {
                return false;
            }
        }
        for j in 0..n {
            let column: Vec<i64> = self.rows.iter().map(|row| row[j]).collect();
            if !is_permutation(&column, n) {
                return false;
            }
        }
        true
    }

    /// True when, for every ordered pair of distinct symbols, the summed
    /// positional distance across rows equals the one across columns, and
    /// this value is the same for every pair.
    pub fn is_spatially_balanced(&self) -> bool {
        let n = self.order() as i64;
        let mut expected: Option<i64> = None;

        for e1 in 0..n {
            for e2 in 0..n {
                if e1 == e2 {
                    continue;
                }
                let Some(line_sum) = self.line_distance_sum(e1, e2) else {
                    return false;
                };
                let Some(column_sum) = self.column_distance_sum(e1, e2) else {
                    return false;
                };
                if line_sum != column_sum {
                    return false;
                }
                match expected {
                    None => expected = Some(line_sum),
                    Some(value) if value != line_sum => return false,
                    Some(_) => {}
                }
            }
        }
        true
    }

    fn line_distance_sum(&self, e1: i64, e2: i64) -> Option<i64> {
        let mut sum = 0;
        for row in &self.rows {
            sum += distance_between(row, e1, e2)?;
        }
        Some(sum)
    }

    fn column_distance_sum(&self, e1: i64, e2: i64) -> Option<i64> {
        let mut sum = 0;
        for j in 0..self.order() {
            let column: Vec<i64> = self.rows.iter().map(|row| row[j]).collect();
            sum += distance_between(&column, e1, e2)?;
        }
        Some(sum)
    }
}

fn is_permutation(values: &[i64], n: usize) -> bool {
    values.len() == n && (0..n as i64).all(|symbol| values.contains(&symbol))
}

/// Positional distance between two symbols in one line, `None` when either
/// is missing.
fn distance_between(values: &[i64], e1: i64, e2: i64) -> Option<i64> {
    let p1 = values.iter().position(|&v| v == e1)?;
    let p2 = values.iter().position(|&v| v == e2)?;
    Some((p1 as i64 - p2 as i64).abs())
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let line = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
