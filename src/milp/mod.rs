//! Binary integer programming contract.
//!
//! Models are expressed with `good_lp` ([`Expression`], [`Variable`],
//! [`Constraint`](good_lp::Constraint)) and wrapped in a [`MilpModel`].
//! Backends implement [`MilpSolver`]:
//!
//! - [`MicroLpSolver`]: pure-Rust `microlp` engine, always available
//! - `HighsSolver`: HiGHS engine, behind the `highs` feature
//!
//! # Ownership
//!
//! [`MilpSolver::solve`] takes the model by value. A model is built, solved
//! once, and released when the solve finishes, on success and error paths
//! alike. Re-solving means building a fresh model.
//!
//! # Reference
//! - Wolsey (1998), "Integer Programming", Ch. 7 (Branch and Bound)

#[cfg(feature = "highs")]
mod highs_backend;
mod microlp_backend;
mod model;

#[cfg(feature = "highs")]
pub use highs_backend::HighsSolver;
pub use microlp_backend::MicroLpSolver;
pub use model::{MilpModel, Sense};

pub use good_lp::{Expression, Variable};

use std::collections::HashMap;
use std::time::Duration;

use good_lp::solvers::ResolutionError;
use thiserror::Error;

/// Parameters passed to a backend for one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Hard wall-clock limit for the solve.
    pub time_limit: Duration,
}

impl SolverConfig {
    /// Creates a config with the given time limit.
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self { time_limit }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
        }
    }
}

/// A solved assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpSolution {
    values: HashMap<Variable, f64>,
}

impl MilpSolution {
    /// Creates a solution from per-variable values.
    pub fn new(values: HashMap<Variable, f64>) -> Self {
        Self { values }
    }

    /// Value of a variable, or `None` if the solution does not cover it.
    #[inline]
    pub fn value(&self, var: Variable) -> Option<f64> {
        self.values.get(&var).copied()
    }

    /// Number of variables with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Variable, f64)> for MilpSolution {
    fn from_iter<I: IntoIterator<Item = (Variable, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Solve failure: no assignment is available.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MilpError {
    /// The model has no feasible assignment.
    #[error("model is infeasible")]
    Infeasible,
    /// The time limit expired before any feasible assignment was found.
    #[error("no incumbent found within {time_limit:?}")]
    NoIncumbent {
        /// The limit that expired.
        time_limit: Duration,
    },
    /// The backend failed internally.
    #[error("solver backend failed: {0}")]
    Backend(String),
}

impl From<ResolutionError> for MilpError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Infeasible => MilpError::Infeasible,
            other => MilpError::Backend(other.to_string()),
        }
    }
}

/// A binary integer programming backend.
///
/// Implementations return once the model is solved, proven infeasible, or
/// the time limit in `config` expires.
pub trait MilpSolver {
    /// Backend name (for logging).
    fn name(&self) -> &str;

    /// Solves `model` within `config.time_limit`.
    ///
    /// # Errors
    /// - [`MilpError::Infeasible`] if no assignment satisfies the model
    /// - [`MilpError::NoIncumbent`] if time ran out first
    /// - [`MilpError::Backend`] on internal failure
    fn solve(&self, model: MilpModel, config: &SolverConfig) -> Result<MilpSolution, MilpError>;
}

impl<S: MilpSolver + ?Sized> MilpSolver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, model: MilpModel, config: &SolverConfig) -> Result<MilpSolution, MilpError> {
        (**self).solve(model, config)
    }
}

impl<S: MilpSolver + ?Sized> MilpSolver for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, model: MilpModel, config: &SolverConfig) -> Result<MilpSolution, MilpError> {
        (**self).solve(model, config)
    }
}
