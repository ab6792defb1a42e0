//! Integer-program formulation of the wave picking problem.
//!
//! Translates an [`Instance`] into a [`MilpModel`]. The true objective,
//! units picked divided by aisles visited, is a ratio and has no direct
//! linear form. It is replaced by the surrogate
//!
//! ```text
//! maximize  Σ units_o · x_o  −  α · Σ y_a
//! ```
//!
//! which rewards units and charges a fixed penalty α per visited aisle.
//! The surrogate optimum is not, in general, the ratio optimum; score any
//! result with [`objective_value`](crate::evaluation::objective_value).
//!
//! # Constraints
//!
//! | Name | Form |
//! |------|------|
//! | `wave_lb` | `Σ units_o · x_o ≥ LB` |
//! | `wave_ub` | `Σ units_o · x_o ≤ UB` |
//! | `item_{i}` | `Σ demand_oi · x_o − Σ supply_ai · y_a ≤ 0` for every demanded item |
//! | `min_aisles` | `Σ y_a ≥ 1` |
//!
//! Rows without variables are left out: the wave band when there are no
//! orders, items no order demands, and `min_aisles` when there are no
//! aisles. [`WaveModel::is_trivially_infeasible`] reports when an omitted
//! row could not have been satisfied.
//!
//! # Reference
//! - Dinkelbach (1967), "On Nonlinear Fractional Programming"
//! - De Koster et al. (2007), "Design and control of warehouse order picking: A literature review"

use std::collections::BTreeMap;

use good_lp::{Expression, Variable};
use tracing::debug;

use crate::milp::{MilpModel, Sense};
use crate::models::Instance;

/// Default per-aisle penalty α in the surrogate objective.
pub const DEFAULT_AISLE_PENALTY: f64 = 1000.0;

/// Builds wave picking models from an instance.
///
/// # Example
/// ```
/// use u_wave::formulation::WaveModelBuilder;
/// use u_wave::models::{Aisle, Instance, Order};
///
/// let instance = Instance::new(
///     vec![Order::new().with_item(0, 3).with_item(1, 2)],
///     vec![Aisle::new().with_item(0, 5).with_item(1, 5)],
///     2, 4, 6,
/// ).unwrap();
/// let wave = WaveModelBuilder::new(&instance).build();
///
/// // one variable per order and per aisle
/// assert_eq!(wave.model().variable_count(), 2);
/// // wave_lb, wave_ub, one per item, min_aisles
/// assert_eq!(wave.model().constraint_count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct WaveModelBuilder<'a> {
    instance: &'a Instance,
    aisle_penalty: f64,
}

impl<'a> WaveModelBuilder<'a> {
    /// Creates a builder with the default aisle penalty.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            aisle_penalty: DEFAULT_AISLE_PENALTY,
        }
    }

    /// Sets the per-aisle penalty α.
    pub fn with_aisle_penalty(mut self, penalty: f64) -> Self {
        self.aisle_penalty = penalty;
        self
    }

    /// Builds a fresh model.
    ///
    /// Creates:
    /// - A binary `x_{o}` per order and `y_{a}` per aisle
    /// - The surrogate objective
    /// - Wave-size band, per-item supply, and non-triviality constraints
    pub fn build(&self) -> WaveModel {
        let instance = self.instance;
        let mut model = MilpModel::new("wave_picking");

        let order_vars: Vec<Variable> = (0..instance.order_count())
            .map(|o| model.add_binary(format!("x_{o}")))
            .collect();
        let aisle_vars: Vec<Variable> = (0..instance.aisle_count())
            .map(|a| model.add_binary(format!("y_{a}")))
            .collect();

        // Units picked: Σ units_o · x_o
        let units = instance
            .orders()
            .iter()
            .zip(&order_vars)
            .fold(Expression::from(0.0), |acc, (order, &x)| {
                acc + (order.units() as f64) * x
            });

        let objective = aisle_vars
            .iter()
            .fold(units.clone(), |acc, &y| acc - self.aisle_penalty * y);
        model.set_objective(Sense::Maximize, objective);

        if !order_vars.is_empty() {
            model.add_constraint("wave_lb", units.clone().geq(instance.wave_size_lb() as f64));
            model.add_constraint("wave_ub", units.leq(instance.wave_size_ub() as f64));
        }

        // Per-item balance: demand of selected orders ≤ supply of visited aisles.
        let mut demand: BTreeMap<usize, Vec<(Variable, f64)>> = BTreeMap::new();
        for (order, &x) in instance.orders().iter().zip(&order_vars) {
            for (&item, &qty) in &order.items {
                demand.entry(item).or_default().push((x, f64::from(qty)));
            }
        }
        let mut supply: BTreeMap<usize, Vec<(Variable, f64)>> = BTreeMap::new();
        for (aisle, &y) in instance.aisles().iter().zip(&aisle_vars) {
            for (&item, &qty) in &aisle.items {
                supply.entry(item).or_default().push((y, f64::from(qty)));
            }
        }
        for (item, terms) in demand {
            let needed = terms
                .into_iter()
                .fold(Expression::from(0.0), |acc, (x, qty)| acc + qty * x);
            let balance = supply
                .remove(&item)
                .unwrap_or_default()
                .into_iter()
                .fold(needed, |acc, (y, qty)| acc - qty * y);
            model.add_constraint(format!("item_{item}"), balance.leq(0.0));
        }

        if !aisle_vars.is_empty() {
            let visited = aisle_vars
                .iter()
                .fold(Expression::from(0.0), |acc, &y| acc + y);
            model.add_constraint("min_aisles", visited.geq(1.0));
        }

        debug!(
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            aisle_penalty = self.aisle_penalty,
            "built wave model"
        );

        WaveModel {
            model,
            order_vars,
            aisle_vars,
            trivially_infeasible: instance.aisle_count() == 0
                || (instance.order_count() == 0 && instance.wave_size_lb() > 0),
        }
    }
}

/// A built wave model and the handles of its decision variables.
pub struct WaveModel {
    model: MilpModel,
    order_vars: Vec<Variable>,
    aisle_vars: Vec<Variable>,
    trivially_infeasible: bool,
}

impl WaveModel {
    /// The underlying linear model.
    #[inline]
    pub fn model(&self) -> &MilpModel {
        &self.model
    }

    /// Variable of each order, indexed by order index.
    #[inline]
    pub fn order_vars(&self) -> &[Variable] {
        &self.order_vars
    }

    /// Variable of each aisle, indexed by aisle index.
    #[inline]
    pub fn aisle_vars(&self) -> &[Variable] {
        &self.aisle_vars
    }

    /// Whether a row left out of the model makes it unsatisfiable: no aisle
    /// to visit, or a positive lower bound with no orders.
    #[inline]
    pub fn is_trivially_infeasible(&self) -> bool {
        self.trivially_infeasible
    }

    /// Splits into the model (to hand to a solver) and the variable handles.
    pub fn into_parts(self) -> (MilpModel, Vec<Variable>, Vec<Variable>) {
        (self.model, self.order_vars, self.aisle_vars)
    }
}
