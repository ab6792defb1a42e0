//! Wave picking domain models.
//!
//! Provides the data types for representing wave picking problems and
//! their solutions.
//!
//! # Domain Mappings
//!
//! | u-wave | Warehouse | Meaning |
//! |--------|-----------|---------|
//! | Order | Customer order | Item → demanded units |
//! | Aisle | Storage aisle | Item → stocked units |
//! | Instance | Picking problem | Orders, aisles, wave-size band |
//! | WaveSolution | Wave | Released orders + visited aisles |

mod instance;
mod order;
mod solution;

pub use instance::{Instance, InstanceError};
pub use order::{Aisle, Order};
pub use solution::{NotFoundReason, SolveOutcome, WaveSolution};
