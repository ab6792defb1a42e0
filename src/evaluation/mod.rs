//! Solver-independent evaluation of wave solutions.
//!
//! Feasibility and scoring work from the instance and the solution alone,
//! never from solver internals or the surrogate objective.
//!
//! - [`is_feasible`] / [`check_feasibility`]: exact integer feasibility
//! - [`objective_value`]: the true ratio objective
//! - [`WaveKpi`]: summary metrics

mod feasibility;
mod kpi;
mod objective;

pub use feasibility::{check_feasibility, is_feasible, Violation, ViolationType};
pub use kpi::WaveKpi;
pub use objective::{objective_value, units_picked};
