//! True objective: units picked per aisle visited.

use crate::models::{Instance, WaveSolution};

/// Total units demanded by the selected orders.
///
/// Unknown order indices contribute nothing.
pub fn units_picked(instance: &Instance, solution: &WaveSolution) -> u64 {
    solution
        .orders
        .iter()
        .filter_map(|&o| instance.order_units(o))
        .sum()
}

/// Ratio objective `units picked / aisles visited`.
///
/// Returns 0.0 if either selection is empty. This is the value to report
/// and compare; the solver's surrogate objective is not.
///
/// # Example
/// ```
/// use u_wave::evaluation::objective_value;
/// use u_wave::models::{Aisle, Instance, Order, WaveSolution};
///
/// let instance = Instance::new(
///     vec![Order::new().with_item(0, 3).with_item(1, 2)],
///     vec![Aisle::new().with_item(0, 5).with_item(1, 5)],
///     2, 4, 6,
/// ).unwrap();
/// assert_eq!(objective_value(&instance, &WaveSolution::new([0], [0])), 5.0);
/// assert_eq!(objective_value(&instance, &WaveSolution::new([0], [])), 0.0);
/// ```
pub fn objective_value(instance: &Instance, solution: &WaveSolution) -> f64 {
    if solution.is_degenerate() {
        return 0.0;
    }
    units_picked(instance, solution) as f64 / solution.aisle_count() as f64
}
