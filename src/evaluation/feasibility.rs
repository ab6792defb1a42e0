//! Feasibility check for wave solutions.
//!
//! Re-derives feasibility from the instance alone, with exact integer
//! arithmetic, so any solution can be verified: solver output, hand-made
//! selections, or results loaded from elsewhere.
//!
//! # Algorithm
//! 1. Reject empty order or aisle selections.
//! 2. Reject indices outside the instance.
//! 3. Accumulate picked units per item over selected orders.
//! 4. Accumulate available units per item over visited aisles.
//! 5. Reject if total picked units fall outside `[LB, UB]`.
//! 6. Reject if any item's picked units exceed its available units.

use serde::{Deserialize, Serialize};

use crate::models::{Instance, WaveSolution};

/// A feasibility violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Human-readable description.
    pub message: String,
}

/// Classification of feasibility violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// No order is selected.
    EmptyOrderSelection,
    /// No aisle is visited.
    EmptyAisleSelection,
    /// A selected order index does not exist.
    UnknownOrder(usize),
    /// A visited aisle index does not exist.
    UnknownAisle(usize),
    /// Total picked units below the wave-size lower bound.
    WaveTooSmall,
    /// Total picked units above the wave-size upper bound.
    WaveTooLarge,
    /// Picked units of an item exceed what the visited aisles stock.
    ItemShortage(usize),
}

impl Violation {
    fn new(violation_type: ViolationType, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            message: message.into(),
        }
    }
}

/// Whether `solution` is feasible for `instance`.
///
/// Equivalent to `check_feasibility(instance, solution).is_empty()`.
///
/// # Example
/// ```
/// use u_wave::evaluation::is_feasible;
/// use u_wave::models::{Aisle, Instance, Order, WaveSolution};
///
/// let instance = Instance::new(
///     vec![Order::new().with_item(0, 3).with_item(1, 2), Order::new().with_item(0, 10)],
///     vec![Aisle::new().with_item(0, 5).with_item(1, 5)],
///     2, 4, 6,
/// ).unwrap();
///
/// assert!(is_feasible(&instance, &WaveSolution::new([0], [0])));
/// assert!(!is_feasible(&instance, &WaveSolution::new([1], [0])));
/// ```
pub fn is_feasible(instance: &Instance, solution: &WaveSolution) -> bool {
    check_feasibility(instance, solution).is_empty()
}

/// Lists every feasibility violation of `solution`.
///
/// Empty selections and unknown indices short-circuit: the quantity checks
/// only run on a well-formed selection.
pub fn check_feasibility(instance: &Instance, solution: &WaveSolution) -> Vec<Violation> {
    let mut violations = Vec::new();

    if solution.orders.is_empty() {
        violations.push(Violation::new(
            ViolationType::EmptyOrderSelection,
            "No order selected",
        ));
    }
    if solution.aisles.is_empty() {
        violations.push(Violation::new(
            ViolationType::EmptyAisleSelection,
            "No aisle visited",
        ));
    }
    for &o in solution.orders.iter().filter(|&&o| o >= instance.order_count()) {
        violations.push(Violation::new(
            ViolationType::UnknownOrder(o),
            format!("Order {o} does not exist ({} orders)", instance.order_count()),
        ));
    }
    for &a in solution.aisles.iter().filter(|&&a| a >= instance.aisle_count()) {
        violations.push(Violation::new(
            ViolationType::UnknownAisle(a),
            format!("Aisle {a} does not exist ({} aisles)", instance.aisle_count()),
        ));
    }
    if !violations.is_empty() {
        return violations;
    }

    let mut picked = vec![0u64; instance.n_items()];
    let mut available = vec![0u64; instance.n_items()];

    for &o in &solution.orders {
        for (&item, &qty) in &instance.orders()[o].items {
            picked[item] += u64::from(qty);
        }
    }
    for &a in &solution.aisles {
        for (&item, &qty) in &instance.aisles()[a].items {
            available[item] += u64::from(qty);
        }
    }

    let total: u64 = picked.iter().sum();
    if total < instance.wave_size_lb() {
        violations.push(Violation::new(
            ViolationType::WaveTooSmall,
            format!(
                "Wave size {total} below lower bound {}",
                instance.wave_size_lb()
            ),
        ));
    } else if total > instance.wave_size_ub() {
        violations.push(Violation::new(
            ViolationType::WaveTooLarge,
            format!(
                "Wave size {total} above upper bound {}",
                instance.wave_size_ub()
            ),
        ));
    }

    for (item, (&need, &have)) in picked.iter().zip(&available).enumerate() {
        if need > have {
            violations.push(Violation::new(
                ViolationType::ItemShortage(item),
                format!("Item {item}: {need} units picked, {have} available"),
            ));
        }
    }

    violations
}
