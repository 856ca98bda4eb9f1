//! Item catalog and capacity limits.

use super::solution::Metrics;
use crate::error::{Error, Result};

/// A loadable item. Its identity is its position in the [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub weight: f64,
    pub volume: f64,
    pub value: f64,
}

impl Item {
    pub fn new(weight: f64, volume: f64, value: f64) -> Self {
        Self {
            weight,
            volume,
            value,
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        for (field, value) in [
            ("weight", self.weight),
            ("volume", self.volume),
            ("value", self.value),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidItem {
                    index,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl From<(f64, f64, f64)> for Item {
    fn from((weight, volume, value): (f64, f64, f64)) -> Self {
        Self::new(weight, volume, value)
    }
}

/// Immutable, validated list of items.
///
/// Every attribute is finite and non-negative. A catalog is never edited
/// after construction; loading new data means building a new catalog.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Validates and wraps `items`.
    ///
    /// # Errors
    /// [`Error::InvalidItem`] for the first item with a negative or
    /// non-finite attribute.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        for (index, item) in items.iter().enumerate() {
            item.validate(index)?;
        }
        Ok(Self { items })
    }

    /// Builds a catalog from `(weight, volume, value)` triples.
    pub fn from_triples<I>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        Self::new(triples.into_iter().map(Item::from).collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Count and sums over the whole catalog.
    pub fn totals(&self) -> Metrics {
        Metrics::from_items(&self.items)
    }
}

impl TryFrom<Vec<Item>> for Catalog {
    type Error = Error;

    fn try_from(items: Vec<Item>) -> Result<Self> {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Maximum total weight and volume of a load.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capacity {
    max_weight: f64,
    max_volume: f64,
}

impl Capacity {
    /// # Errors
    /// [`Error::InvalidCapacity`] if either limit is negative or non-finite.
    pub fn new(max_weight: f64, max_volume: f64) -> Result<Self> {
        for (field, value) in [("max_weight", max_weight), ("max_volume", max_volume)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidCapacity { field, value });
            }
        }
        Ok(Self {
            max_weight,
            max_volume,
        })
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn max_volume(&self) -> f64 {
        self.max_volume
    }

    /// Whether a load of this weight and volume respects both limits.
    pub fn admits(&self, weight: f64, volume: f64) -> bool {
        weight <= self.max_weight && volume <= self.max_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::from_triples([(2.0, 3.0, 10.0), (4.0, 1.0, 20.0)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(1), Some(&Item::new(4.0, 1.0, 20.0)));
        assert_eq!(catalog.get(2), None);
        assert_eq!(catalog.iter().count(), 2);
    }

    #[test]
    fn test_catalog_totals() {
        let catalog =
            Catalog::from_triples([(2.0, 3.0, 10.0), (4.0, 1.0, 20.0), (3.0, 2.0, 15.0)]).unwrap();
        let totals = catalog.totals();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total_weight, 9.0);
        assert_eq!(totals.total_volume, 6.0);
        assert_eq!(totals.total_value, 45.0);
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.totals().count, 0);
    }

    #[test]
    fn test_rejects_negative_attribute() {
        let err = Catalog::from_triples([(1.0, 1.0, 1.0), (1.0, -0.5, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidItem {
                index: 1,
                field: "volume",
                value: -0.5
            }
        );
    }

    #[test]
    fn test_rejects_non_finite_attribute() {
        let err = Catalog::try_from(vec![Item::new(f64::INFINITY, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidItem {
                index: 0,
                field: "weight",
                ..
            }
        ));

        let err = Catalog::from_triples([(0.0, 0.0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, Error::InvalidItem { field: "value", .. }));
    }

    #[test]
    fn test_capacity_validation() {
        assert!(Capacity::new(0.0, 0.0).is_ok());
        assert_eq!(
            Capacity::new(-1.0, 5.0).unwrap_err(),
            Error::InvalidCapacity {
                field: "max_weight",
                value: -1.0
            }
        );
        assert!(matches!(
            Capacity::new(5.0, f64::NAN).unwrap_err(),
            Error::InvalidCapacity {
                field: "max_volume",
                ..
            }
        ));
    }

    #[test]
    fn test_capacity_admits_boundary() {
        let capacity = Capacity::new(5.0, 4.0).unwrap();
        assert!(capacity.admits(5.0, 4.0));
        assert!(!capacity.admits(5.0 + 1e-9, 4.0));
        assert!(!capacity.admits(5.0, 4.1));
    }
}
