//! Feasibility-penalized objective.
//!
//! A selection that fits both limits scores its total value. Any selection
//! that exceeds either limit scores [`INFEASIBLE_FITNESS`], regardless of
//! how far it overshoots. Since values are non-negative, every feasible
//! selection (including the empty one, at 0) outranks every infeasible one.

use super::catalog::{Capacity, Catalog};
use crate::error::{Error, Result};

/// Fitness of any selection exceeding a capacity limit.
pub const INFEASIBLE_FITNESS: f64 = -1.0;

/// Sums over a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Load {
    pub weight: f64,
    pub volume: f64,
    pub value: f64,
}

impl Load {
    /// Sums the attributes of the selected items.
    ///
    /// `genes` must have the catalog's length (see [`checked_fitness`]).
    pub fn of(catalog: &Catalog, genes: &[bool]) -> Self {
        debug_assert_eq!(catalog.len(), genes.len());
        catalog
            .iter()
            .zip(genes)
            .filter(|(_, selected)| **selected)
            .fold(Load::default(), |acc, (item, _)| Load {
                weight: acc.weight + item.weight,
                volume: acc.volume + item.volume,
                value: acc.value + item.value,
            })
    }

    pub fn fits(&self, capacity: &Capacity) -> bool {
        capacity.admits(self.weight, self.volume)
    }
}

/// Fitness of a selection: its value if it fits, otherwise the sentinel.
pub fn fitness(catalog: &Catalog, capacity: &Capacity, genes: &[bool]) -> f64 {
    let load = Load::of(catalog, genes);
    if load.fits(capacity) {
        load.value
    } else {
        INFEASIBLE_FITNESS
    }
}

/// Like [`fitness`], but rejects a selection of the wrong length.
pub fn checked_fitness(catalog: &Catalog, capacity: &Capacity, genes: &[bool]) -> Result<f64> {
    if genes.len() != catalog.len() {
        return Err(Error::LengthMismatch {
            expected: catalog.len(),
            actual: genes.len(),
        });
    }
    Ok(fitness(catalog, capacity, genes))
}
