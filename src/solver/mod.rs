//! Wave selection driver.
//!
//! Builds the MILP for an instance, hands it to a backend with the time left
//! in the global budget, and turns the backend's answer into a selection.
//!
//! # Algorithm
//!
//! The ratio objective `units / aisles` is not linear. Two linearizations
//! are available through [`ObjectiveStrategy`]:
//!
//! - **Fixed penalty**: one solve of `Σ units·x − P·Σ y` with `P = 1000`
//! - **Dinkelbach**: repeated solves of `Σ units·x − λ·Σ y`, updating `λ` to
//!   the ratio of the last selection until it stops improving
//!
//! Variables with value above the selection threshold (default 0.9) are
//! treated as selected.
//!
//! # References
//!
//! - Dinkelbach (1967), "On Nonlinear Fractional Programming"
//! - Wolsey (2020), "Integer Programming", 2nd ed.

mod budget;
mod wave_solver;

pub use budget::{Stopwatch, TimeBudget, DEFAULT_TOTAL_BUDGET};
pub use wave_solver::{
    extract_selection, ObjectiveStrategy, WaveSolver, WaveSolverConfig,
    DEFAULT_SELECTION_THRESHOLD,
};
