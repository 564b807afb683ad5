//! Multi-coder segmentation datasets.
//!
//! A [`Dataset`] maps each coder to the items it segmented. Engines mostly
//! want the transpose (for each item, every coder's segmentation), which
//! [`Dataset::items`] builds after checking the dataset's shape.

use crate::segmentation::Segmentation;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque coder identifier.
pub type CoderId = String;

/// Opaque item identifier.
pub type ItemId = String;

/// Coder → item → segmentation.
///
/// Ordered maps keep evaluation order (and so every decimal sum) stable
/// between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    coders: BTreeMap<CoderId, BTreeMap<ItemId, Segmentation>>,
}

/// Every coder's segmentation of one item, in position form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Item identifier.
    pub id: ItemId,
    /// Units in the item (shared by all coders).
    pub unit_count: usize,
    /// Coder → positions.
    pub codings: BTreeMap<CoderId, Vec<usize>>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one coder's segmentation of one item.
    pub fn insert(
        &mut self,
        coder: impl Into<CoderId>,
        item: impl Into<ItemId>,
        segmentation: Segmentation,
    ) -> Option<Segmentation> {
        self.coders
            .entry(coder.into())
            .or_default()
            .insert(item.into(), segmentation)
    }

    /// Builder form of [`insert`](Self::insert) for mass sequences.
    #[must_use]
    pub fn with_masses(
        mut self,
        coder: impl Into<CoderId>,
        item: impl Into<ItemId>,
        masses: impl Into<Vec<usize>>,
    ) -> Self {
        self.insert(coder, item, Segmentation::masses(masses));
        self
    }

    /// Builder form of [`insert`](Self::insert) for position sequences.
    #[must_use]
    pub fn with_positions(
        mut self,
        coder: impl Into<CoderId>,
        item: impl Into<ItemId>,
        positions: impl Into<Vec<usize>>,
    ) -> Self {
        self.insert(coder, item, Segmentation::positions(positions));
        self
    }

    /// Coder identifiers, in order.
    pub fn coders(&self) -> impl Iterator<Item = &str> {
        self.coders.keys().map(String::as_str)
    }

    /// Number of coders.
    #[must_use]
    pub fn coder_count(&self) -> usize {
        self.coders.len()
    }

    /// Items annotated by the first coder (0 for an empty dataset).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.coders.values().next().map_or(0, BTreeMap::len)
    }

    /// One coder's segmentation of one item.
    #[must_use]
    pub fn get(&self, coder: &str, item: &str) -> Option<&Segmentation> {
        self.coders.get(coder).and_then(|items| items.get(item))
    }

    /// Is the dataset empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coders.is_empty()
    }

    /// Check that every coder annotated the same number of items.
    ///
    /// Returns that number.
    pub fn validate_item_counts(&self) -> Result<usize> {
        let expected = self.item_count();
        if self.coders.values().any(|items| items.len() != expected) {
            return Err(Error::dataset_shape("Unequal number of items contained."));
        }
        Ok(expected)
    }

    /// Transpose into per-item codings, normalised to positions.
    ///
    /// # Errors
    ///
    /// - `DatasetShape` if item counts differ or a coder lacks an item
    ///   another coder annotated
    /// - `MalformedSegmentation` for zero masses or empty segmentations
    /// - `SegmentationLengthMismatch` if coders disagree on an item's length
    pub fn items(&self) -> Result<Vec<Item>> {
        self.validate_item_counts()?;
        let Some(first) = self.coders.values().next() else {
            return Ok(Vec::new());
        };

        let mut items = Vec::with_capacity(first.len());
        for item_id in first.keys() {
            let mut codings = BTreeMap::new();
            let mut unit_count = None;
            for (coder, coder_items) in &self.coders {
                let segmentation = coder_items.get(item_id).ok_or_else(|| {
                    Error::dataset_shape(format!(
                        "coder '{}' has no segmentation for item '{}'",
                        coder, item_id
                    ))
                })?;
                segmentation.validate()?;
                let units = segmentation.unit_count();
                match unit_count {
                    None => unit_count = Some(units),
                    Some(expected) if expected != units => {
                        return Err(Error::length_mismatch(format!(
                            "item '{}': coder '{}' covers {} units, expected {}",
                            item_id, coder, units, expected
                        )));
                    }
                    Some(_) => {}
                }
                codings.insert(coder.clone(), segmentation.to_positions()?);
            }
            items.push(Item {
                id: item_id.clone(),
                unit_count: unit_count.unwrap_or(0),
                codings,
            });
        }

        log::trace!(
            "transposed dataset: {} coders, {} items",
            self.coder_count(),
            items.len()
        );
        Ok(items)
    }
}

impl FromIterator<(CoderId, ItemId, Segmentation)> for Dataset {
    fn from_iter<T: IntoIterator<Item = (CoderId, ItemId, Segmentation)>>(iter: T) -> Self {
        let mut dataset = Self::new();
        for (coder, item, segmentation) in iter {
            dataset.insert(coder, item, segmentation);
        }
        dataset
    }
}
