//! Pure-Rust backend on `microlp`.
//!
//! `microlp` has no time limit of its own. The solve runs on a dedicated
//! thread and the caller waits at most `time_limit` for its answer. A solve
//! that outlives the limit is abandoned: its thread finishes on its own and
//! drops the model, and the caller gets [`MilpError::NoIncumbent`].

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use good_lp::solvers::microlp::microlp;
use good_lp::solvers::ResolutionError;
use good_lp::{Solution, SolverModel};
use tracing::debug;

use super::model::Sense;
use super::{MilpError, MilpModel, MilpSolution, MilpSolver, SolverConfig};

/// Branch-and-bound backend on the `microlp` simplex engine.
///
/// # Example
/// ```
/// use u_wave::milp::{MicroLpSolver, MilpModel, MilpSolver, Sense, SolverConfig};
///
/// let mut model = MilpModel::new("pick_one");
/// let a = model.add_binary("a");
/// let b = model.add_binary("b");
/// model.set_objective(Sense::Maximize, 1.0 * a + 2.0 * b);
/// model.add_constraint("one", (a + b).leq(1.0));
///
/// let solution = MicroLpSolver::new()
///     .solve(model, &SolverConfig::default())
///     .unwrap();
/// assert!(solution.value(b).unwrap() > 0.9);
/// assert!(solution.value(a).unwrap() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MilpSolver for MicroLpSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, model: MilpModel, config: &SolverConfig) -> Result<MilpSolution, MilpError> {
        let model_name = model.name().to_string();
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("microlp-solve".into())
            .spawn(move || {
                // The receiver may be gone after a timeout.
                let _ = tx.send(solve_blocking(model));
            })
            .map_err(|e| MilpError::Backend(format!("failed to start solver thread: {e}")))?;

        match rx.recv_timeout(config.time_limit) {
            Ok(result) => {
                debug!(model = %model_name, ok = result.is_ok(), "microlp finished");
                result.map_err(MilpError::from)
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!(model = %model_name, time_limit = ?config.time_limit, "microlp timed out");
                Err(MilpError::NoIncumbent {
                    time_limit: config.time_limit,
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(MilpError::Backend(
                "solver thread ended without a result".into(),
            )),
        }
    }
}

fn solve_blocking(model: MilpModel) -> Result<MilpSolution, ResolutionError> {
    let parts = model.into_parts();
    let unsolved = match parts.sense {
        Sense::Maximize => parts.variables.maximise(parts.objective),
        Sense::Minimize => parts.variables.minimise(parts.objective),
    };

    let mut problem = unsolved.using(microlp);
    for constraint in parts.constraints {
        problem.add_constraint(constraint);
    }

    let solution = problem.solve()?;
    Ok(parts
        .declared
        .iter()
        .map(|&var| (var, solution.value(var)))
        .collect())
}
