//! Wave solution and solve outcome models.
//!
//! A [`WaveSolution`] is a pair of index sets: the orders released in the
//! wave and the aisles visited to pick them. A [`SolveOutcome`] wraps it so
//! that "the solver produced nothing" is never confused with "the solver
//! produced an empty selection".

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Selected orders and visited aisles.
///
/// Indices refer to positions in the instance's order and aisle sequences.
/// Either set may be empty; the feasibility check rejects that case and the
/// scorer maps it to 0.0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveSolution {
    /// Selected order indices.
    pub orders: BTreeSet<usize>,
    /// Visited aisle indices.
    pub aisles: BTreeSet<usize>,
}

impl WaveSolution {
    /// Creates a solution from order and aisle indices (duplicates collapse).
    pub fn new(
        orders: impl IntoIterator<Item = usize>,
        aisles: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            orders: orders.into_iter().collect(),
            aisles: aisles.into_iter().collect(),
        }
    }

    /// Creates an empty solution.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of selected orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of visited aisles.
    #[inline]
    pub fn aisle_count(&self) -> usize {
        self.aisles.len()
    }

    /// Whether either selection is empty.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.orders.is_empty() || self.aisles.is_empty()
    }
}

/// Why a solve produced no solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum NotFoundReason {
    /// The backend proved the model infeasible.
    #[error("model is infeasible")]
    Infeasible,
    /// The time limit expired before any incumbent was found.
    #[error("time limit reached without an incumbent")]
    TimeLimit,
    /// The backend raised an error while building or solving.
    #[error("solver failure: {0}")]
    SolverFailure(String),
}

/// Result of a solve attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// The solver returned an assignment.
    Found(WaveSolution),
    /// The solver returned nothing usable.
    NotFound(NotFoundReason),
}

impl SolveOutcome {
    /// Whether a solution was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Borrows the solution, if any.
    pub fn solution(&self) -> Option<&WaveSolution> {
        match self {
            Self::Found(solution) => Some(solution),
            Self::NotFound(_) => None,
        }
    }

    /// Consumes the outcome, returning the solution if any.
    pub fn into_solution(self) -> Option<WaveSolution> {
        match self {
            Self::Found(solution) => Some(solution),
            Self::NotFound(_) => None,
        }
    }

    /// The failure reason, if no solution was found.
    pub fn reason(&self) -> Option<&NotFoundReason> {
        match self {
            Self::Found(_) => None,
            Self::NotFound(reason) => Some(reason),
        }
    }
}
