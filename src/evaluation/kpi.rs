//! Wave quality metrics (KPIs).
//!
//! Summarizes a solution against its instance.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Orders selected | \|selected orders\| |
//! | Aisles visited | \|visited aisles\| |
//! | Units picked | Σ units of selected orders |
//! | Units available | Σ stock of visited aisles |
//! | Objective | units picked / aisles visited (0 if degenerate) |
//! | Fill rate | units picked / units available |
//! | Feasible | passes the feasibility check |

use serde::{Deserialize, Serialize};

use super::{is_feasible, objective_value, units_picked};
use crate::models::{Instance, WaveSolution};

/// Wave performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveKpi {
    /// Number of selected orders.
    pub orders_selected: usize,
    /// Number of visited aisles.
    pub aisles_visited: usize,
    /// Units demanded by the selected orders.
    pub units_picked: u64,
    /// Units stocked in the visited aisles.
    pub units_available: u64,
    /// Units picked per aisle visited.
    pub objective: f64,
    /// Fraction of visited stock that is picked (0.0 if nothing available).
    pub fill_rate: f64,
    /// Whether the solution is feasible.
    pub feasible: bool,
}

impl WaveKpi {
    /// Computes KPIs for a solution.
    pub fn calculate(instance: &Instance, solution: &WaveSolution) -> Self {
        let picked = units_picked(instance, solution);
        let available: u64 = solution
            .aisles
            .iter()
            .filter_map(|&a| instance.aisles().get(a))
            .map(|aisle| aisle.units())
            .sum();

        let fill_rate = if available == 0 {
            0.0
        } else {
            picked as f64 / available as f64
        };

        Self {
            orders_selected: solution.order_count(),
            aisles_visited: solution.aisle_count(),
            units_picked: picked,
            units_available: available,
            objective: objective_value(instance, solution),
            fill_rate,
            feasible: is_feasible(instance, solution),
        }
    }

    /// Whether the solution is feasible and reaches `min_objective`.
    pub fn meets_threshold(&self, min_objective: f64) -> bool {
        self.feasible && self.objective >= min_objective
    }
}
