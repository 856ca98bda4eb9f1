//! Result extraction.
//!
//! Projects a selection back onto the catalog. Metrics are always summed
//! from the selected items themselves, never taken from a cached fitness,
//! so the infeasibility sentinel cannot leak into reported totals.

use super::catalog::{Capacity, Catalog, Item};
use crate::error::{Error, Result};

/// Count and totals of a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub count: usize,
    pub total_weight: f64,
    pub total_volume: f64,
    pub total_value: f64,
}

impl Metrics {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        items.into_iter().fold(Metrics::default(), |acc, item| Metrics {
            count: acc.count + 1,
            total_weight: acc.total_weight + item.weight,
            total_volume: acc.total_volume + item.volume,
            total_value: acc.total_value + item.value,
        })
    }
}

/// A concrete load: the selected items in catalog order plus their totals.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    indices: Vec<usize>,
    items: Vec<Item>,
    metrics: Metrics,
}

impl Solution {
    /// Extracts the items whose gene is set.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`] if `genes` and `catalog` differ in length.
    pub fn extract(catalog: &Catalog, genes: &[bool]) -> Result<Self> {
        if genes.len() != catalog.len() {
            return Err(Error::LengthMismatch {
                expected: catalog.len(),
                actual: genes.len(),
            });
        }

        let (indices, items): (Vec<usize>, Vec<Item>) = catalog
            .iter()
            .zip(genes)
            .enumerate()
            .filter(|(_, (_, selected))| **selected)
            .map(|(index, (item, _))| (index, *item))
            .unzip();
        let metrics = Metrics::from_items(&items);

        Ok(Self {
            indices,
            items,
            metrics,
        })
    }

    /// The empty load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog indices of the selected items, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Selected items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the load respects both limits.
    pub fn fits(&self, capacity: &Capacity) -> bool {
        capacity.admits(self.metrics.total_weight, self.metrics.total_volume)
    }
}
