//! Seeded random instance generation.
//!
//! Produces small-to-large synthetic instances for benchmarking backends
//! and for property-style tests. The same seed always yields the same
//! instance.
//!
//! # Shape
//!
//! - Each order has `1..=max_order_lines` lines and each aisle has
//!   `1..=max_aisle_lines` lines, items drawn uniformly from `[0, n_items)`
//! - Line quantities are drawn from `1..=max_quantity`
//! - With total demand `D`, the wave band is
//!   `[max(1, ⌈D · lb_fraction⌉), max(LB, ⌈D · ub_fraction⌉)]`

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::{Aisle, Instance, InstanceError, Order};

/// Random instance generator.
///
/// # Example
/// ```
/// use u_wave::generator::InstanceGenerator;
///
/// let instance = InstanceGenerator::new()
///     .with_orders(30)
///     .with_aisles(8)
///     .with_items(12)
///     .with_seed(7)
///     .generate()
///     .unwrap();
/// assert_eq!(instance.order_count(), 30);
/// assert!(instance.wave_size_lb() <= instance.wave_size_ub());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceGenerator {
    n_orders: usize,
    n_aisles: usize,
    n_items: usize,
    max_order_lines: usize,
    max_aisle_lines: usize,
    max_quantity: u32,
    lb_fraction: f64,
    ub_fraction: f64,
    seed: u64,
}

impl Default for InstanceGenerator {
    fn default() -> Self {
        Self {
            n_orders: 20,
            n_aisles: 10,
            n_items: 15,
            max_order_lines: 3,
            max_aisle_lines: 5,
            max_quantity: 5,
            lb_fraction: 0.1,
            ub_fraction: 0.5,
            seed: 42,
        }
    }
}

impl InstanceGenerator {
    /// Creates a generator with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of orders.
    pub fn with_orders(mut self, n: usize) -> Self {
        self.n_orders = n;
        self
    }

    /// Sets the number of aisles.
    pub fn with_aisles(mut self, n: usize) -> Self {
        self.n_aisles = n;
        self
    }

    /// Sets the item universe size.
    pub fn with_items(mut self, n: usize) -> Self {
        self.n_items = n;
        self
    }

    /// Sets the maximum lines per order and per aisle (min 1).
    pub fn with_max_lines(mut self, order_lines: usize, aisle_lines: usize) -> Self {
        self.max_order_lines = order_lines.max(1);
        self.max_aisle_lines = aisle_lines.max(1);
        self
    }

    /// Sets the maximum quantity per line (min 1).
    pub fn with_max_quantity(mut self, quantity: u32) -> Self {
        self.max_quantity = quantity.max(1);
        self
    }

    /// Sets the wave band as fractions of total demand.
    ///
    /// Fractions are clamped to `[0, 1]`; `ub` is raised to `lb` if lower.
    pub fn with_wave_fractions(mut self, lb: f64, ub: f64) -> Self {
        self.lb_fraction = lb.clamp(0.0, 1.0);
        self.ub_fraction = ub.clamp(0.0, 1.0).max(self.lb_fraction);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates an instance.
    ///
    /// # Errors
    /// Only if the generated data violated an instance invariant, which the
    /// parameter clamping is meant to rule out.
    pub fn generate(&self) -> Result<Instance, InstanceError> {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let orders: Vec<Order> = (0..self.n_orders)
            .map(|_| self.random_lines(&mut rng, self.max_order_lines).into_iter().collect())
            .collect();
        let aisles: Vec<Aisle> = (0..self.n_aisles)
            .map(|_| self.random_lines(&mut rng, self.max_aisle_lines).into_iter().collect())
            .collect();

        let demand: u64 = orders.iter().map(Order::units).sum();
        let (lb, ub) = if demand == 0 {
            (0, 0)
        } else {
            let lb = ((demand as f64 * self.lb_fraction).ceil() as u64).max(1);
            let ub = ((demand as f64 * self.ub_fraction).ceil() as u64).max(lb);
            (lb, ub)
        };

        Instance::new(orders, aisles, self.n_items, lb, ub)
    }

    fn random_lines(&self, rng: &mut SmallRng, max_lines: usize) -> Vec<(usize, u32)> {
        if self.n_items == 0 {
            return Vec::new();
        }
        let lines = rng.random_range(1..=max_lines.max(1));
        (0..lines)
            .map(|_| {
                (
                    rng.random_range(0..self.n_items),
                    rng.random_range(1..=self.max_quantity.max(1)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let instance = InstanceGenerator::new()
            .with_orders(12)
            .with_aisles(5)
            .with_items(7)
            .generate()
            .unwrap();
        assert_eq!(instance.order_count(), 12);
        assert_eq!(instance.aisle_count(), 5);
        assert_eq!(instance.n_items(), 7);
    }

    #[test]
    fn test_deterministic() {
        let a = InstanceGenerator::new().with_seed(3).generate().unwrap();
        let b = InstanceGenerator::new().with_seed(3).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lines_and_quantities_in_range() {
        let instance = InstanceGenerator::new()
            .with_items(4)
            .with_max_lines(2, 3)
            .with_max_quantity(6)
            .with_seed(11)
            .generate()
            .unwrap();
        for order in instance.orders() {
            assert!((1..=2).contains(&order.line_count()));
            assert!(order.items.iter().all(|(&i, &q)| i < 4 && q >= 1));
        }
        for aisle in instance.aisles() {
            assert!(!aisle.items.is_empty() && aisle.items.len() <= 3);
            assert!(aisle.items.values().all(|&q| q >= 1));
        }
    }

    #[test]
    fn test_wave_band() {
        let instance = InstanceGenerator::new()
            .with_wave_fractions(0.2, 0.6)
            .with_seed(5)
            .generate()
            .unwrap();
        let demand = instance.total_demand();
        assert!(instance.wave_size_lb() >= 1);
        assert!(instance.wave_size_lb() <= instance.wave_size_ub());
        assert!(instance.wave_size_ub() <= demand);
    }

    #[test]
    fn test_no_items() {
        let instance = InstanceGenerator::new().with_items(0).generate().unwrap();
        assert_eq!(instance.total_demand(), 0);
        assert_eq!(instance.wave_size_lb(), 0);
        assert_eq!(instance.wave_size_ub(), 0);
    }
}
