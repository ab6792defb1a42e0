//! Wave picking optimization for warehouse order fulfillment.
//!
//! Selects a subset of customer orders (a *wave*) and the aisles to visit so
//! that every selected item can be picked, the wave size stays within given
//! bounds, and units picked per aisle visited is as high as possible.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Order`, `Aisle`, `Instance`, `WaveSolution`,
//!   `SolveOutcome`
//! - **`validation`**: Input integrity checks (item ranges, quantities, bounds)
//! - **`milp`**: `good_lp` model wrapper, `MilpSolver` backend trait,
//!   `microlp` backend (and HiGHS with the `highs` feature)
//! - **`formulation`**: Maps an instance onto a `MilpModel`
//! - **`solver`**: Time-budgeted driver with fixed-penalty and Dinkelbach
//!   objectives
//! - **`evaluation`**: Feasibility check, ratio objective, KPIs
//! - **`generator`**: Seeded random instances
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use u_wave::evaluation::is_feasible;
//! use u_wave::milp::MicroLpSolver;
//! use u_wave::models::{Aisle, Instance, Order};
//! use u_wave::solver::WaveSolver;
//!
//! let instance = Instance::new(
//!     vec![Order::new().with_item(0, 3).with_item(1, 2), Order::new().with_item(0, 10)],
//!     vec![Aisle::new().with_item(0, 5).with_item(1, 5)],
//!     2,
//!     4,
//!     6,
//! )
//! .unwrap();
//!
//! let solver = WaveSolver::new(MicroLpSolver::new());
//! let outcome = solver.solve(&instance, &Instant::now());
//! let wave = outcome.solution().unwrap();
//! assert!(is_feasible(&instance, wave));
//! assert_eq!(wave.orders.iter().copied().collect::<Vec<_>>(), vec![0]);
//! ```
//!
//! # References
//!
//! - de Koster, Le-Duc & Roodbergen (2007), "Design and control of warehouse
//!   order picking: A literature review"
//! - Dinkelbach (1967), "On Nonlinear Fractional Programming"

pub mod evaluation;
pub mod formulation;
pub mod generator;
pub mod milp;
pub mod models;
pub mod solver;
pub mod validation;
