//! HiGHS backend (`highs` feature).
//!
//! The time limit is handed to HiGHS itself, so the solve returns on its
//! own thread once the limit expires.

use good_lp::solvers::highs::highs;
use good_lp::solvers::WithTimeLimit;
use good_lp::{Solution, SolverModel};
use tracing::debug;

use super::model::Sense;
use super::{MilpError, MilpModel, MilpSolution, MilpSolver, SolverConfig};

/// Backend on the HiGHS MIP solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MilpSolver for HighsSolver {
    fn name(&self) -> &str {
        "highs"
    }

    fn solve(&self, model: MilpModel, config: &SolverConfig) -> Result<MilpSolution, MilpError> {
        let model_name = model.name().to_string();
        let parts = model.into_parts();
        let unsolved = match parts.sense {
            Sense::Maximize => parts.variables.maximise(parts.objective),
            Sense::Minimize => parts.variables.minimise(parts.objective),
        };

        let mut problem = unsolved
            .using(highs)
            .with_time_limit(config.time_limit.as_secs_f64());
        for constraint in parts.constraints {
            problem.add_constraint(constraint);
        }

        let solution = problem.solve()?;
        debug!(model = %model_name, "highs finished");
        Ok(parts
            .declared
            .iter()
            .map(|&var| (var, solution.value(var)))
            .collect())
    }
}
