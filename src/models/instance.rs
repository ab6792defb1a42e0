//! Problem instance model.
//!
//! An instance bundles the orders, the aisles, the size of the item
//! universe, and the wave-size band. It is validated once on construction
//! and read-only afterwards; every downstream component borrows it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Aisle, Order};
use crate::validation::{validate_instance, ValidationError};

/// Instance construction failure.
///
/// Carries every integrity issue found. This indicates broken input data,
/// not a solver condition, so it is surfaced as an error rather than as an
/// empty solution.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid instance: {}", summarize(.errors))]
pub struct InstanceError {
    /// All detected issues.
    pub errors: Vec<ValidationError>,
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A wave picking instance.
///
/// # Invariants
/// - `wave_size_lb <= wave_size_ub`
/// - every item referenced by an order or aisle lies in `[0, n_items)`
/// - every stored quantity is positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstanceData", into = "InstanceData")]
pub struct Instance {
    orders: Vec<Order>,
    aisles: Vec<Aisle>,
    n_items: usize,
    wave_size_lb: u64,
    wave_size_ub: u64,
    order_units: Vec<u64>,
}

/// Unvalidated wire form of [`Instance`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstanceData {
    orders: Vec<Order>,
    aisles: Vec<Aisle>,
    n_items: usize,
    wave_size_lb: u64,
    wave_size_ub: u64,
}

impl Instance {
    /// Creates a validated instance.
    ///
    /// # Errors
    /// Returns [`InstanceError`] listing every violated invariant.
    ///
    /// # Example
    /// ```
    /// use u_wave::models::{Aisle, Instance, Order};
    ///
    /// let orders = vec![Order::new().with_item(0, 3).with_item(1, 2)];
    /// let aisles = vec![Aisle::new().with_item(0, 5).with_item(1, 5)];
    /// let instance = Instance::new(orders, aisles, 2, 4, 6).unwrap();
    /// assert_eq!(instance.order_units(0), Some(5));
    /// ```
    pub fn new(
        orders: Vec<Order>,
        aisles: Vec<Aisle>,
        n_items: usize,
        wave_size_lb: u64,
        wave_size_ub: u64,
    ) -> Result<Self, InstanceError> {
        validate_instance(&orders, &aisles, n_items, wave_size_lb, wave_size_ub)
            .map_err(|errors| InstanceError { errors })?;

        let order_units = orders.iter().map(Order::units).collect();
        Ok(Self {
            orders,
            aisles,
            n_items,
            wave_size_lb,
            wave_size_ub,
            order_units,
        })
    }

    /// All orders, indexed by order index.
    #[inline]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// All aisles, indexed by aisle index.
    #[inline]
    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    /// Size of the item universe.
    #[inline]
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Wave-size lower bound (inclusive).
    #[inline]
    pub fn wave_size_lb(&self) -> u64 {
        self.wave_size_lb
    }

    /// Wave-size upper bound (inclusive).
    #[inline]
    pub fn wave_size_ub(&self) -> u64 {
        self.wave_size_ub
    }

    /// Number of orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of aisles.
    #[inline]
    pub fn aisle_count(&self) -> usize {
        self.aisles.len()
    }

    /// Total units demanded by order `order` (cached), or `None` if there
    /// is no such order.
    #[inline]
    pub fn order_units(&self, order: usize) -> Option<u64> {
        self.order_units.get(order).copied()
    }

    /// Total units demanded across every order.
    pub fn total_demand(&self) -> u64 {
        self.order_units.iter().sum()
    }

    /// Total units stocked across every aisle.
    pub fn total_supply(&self) -> u64 {
        self.aisles.iter().map(Aisle::units).sum()
    }
}

impl TryFrom<InstanceData> for Instance {
    type Error = InstanceError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        Self::new(
            data.orders,
            data.aisles,
            data.n_items,
            data.wave_size_lb,
            data.wave_size_ub,
        )
    }
}

impl From<Instance> for InstanceData {
    fn from(instance: Instance) -> Self {
        Self {
            orders: instance.orders,
            aisles: instance.aisles,
            n_items: instance.n_items,
            wave_size_lb: instance.wave_size_lb,
            wave_size_ub: instance.wave_size_ub,
        }
    }
}
