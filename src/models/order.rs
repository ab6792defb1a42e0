//! Order and aisle models.
//!
//! Both are sparse item → quantity maps. An order states what a customer
//! needs; an aisle states what a storage location holds. Items are plain
//! indices into `[0, n_items)` of the owning instance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A customer order: demanded quantity per item.
///
/// Absent items have zero demand. Stored quantities are expected to be
/// positive; the instance constructor rejects zero entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order {
    /// Item index → demanded units.
    pub items: BTreeMap<usize, u32>,
}

/// A storage aisle: available quantity per item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aisle {
    /// Item index → stocked units.
    pub items: BTreeMap<usize, u32>,
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds demand for an item (accumulates if already present).
    pub fn with_item(mut self, item: usize, quantity: u32) -> Self {
        let entry = self.items.entry(item).or_insert(0);
        *entry = entry.saturating_add(quantity);
        self
    }

    /// Demanded units of `item` (0 if absent).
    #[inline]
    pub fn quantity(&self, item: usize) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Total demanded units across all items.
    pub fn units(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }

    /// Number of distinct items (order lines).
    pub fn line_count(&self) -> usize {
        self.items.len()
    }
}

impl Aisle {
    /// Creates an empty aisle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds stock for an item (accumulates if already present).
    pub fn with_item(mut self, item: usize, quantity: u32) -> Self {
        let entry = self.items.entry(item).or_insert(0);
        *entry = entry.saturating_add(quantity);
        self
    }

    /// Stocked units of `item` (0 if absent).
    #[inline]
    pub fn quantity(&self, item: usize) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Total stocked units across all items.
    pub fn units(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }
}

impl FromIterator<(usize, u32)> for Order {
    fn from_iter<I: IntoIterator<Item = (usize, u32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |order, (item, qty)| order.with_item(item, qty))
    }
}

impl FromIterator<(usize, u32)> for Aisle {
    fn from_iter<I: IntoIterator<Item = (usize, u32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |aisle, (item, qty)| aisle.with_item(item, qty))
    }
}
