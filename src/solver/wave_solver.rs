//! Time-boxed wave solver.
//!
//! # Algorithm
//!
//! 1. Compute the remaining budget from the stopwatch (floored at zero).
//! 2. Build a fresh model for the instance.
//! 3. Hand the model to the backend with the remaining time as its limit.
//! 4. Read each order/aisle variable; values above the selection threshold
//!    count as selected.
//!
//! Backend errors and empty-handed terminations become
//! [`SolveOutcome::NotFound`]; they never escape as errors.
//!
//! With [`ObjectiveStrategy::Dinkelbach`], steps 1-4 repeat with the aisle
//! penalty set to the best ratio found so far, until the surrogate optimum
//! reaches zero.
//!
//! # Reference
//! Dinkelbach (1967), "On Nonlinear Fractional Programming"

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{Stopwatch, TimeBudget};
use crate::evaluation::{objective_value, units_picked};
use crate::formulation::{WaveModelBuilder, DEFAULT_AISLE_PENALTY};
use crate::milp::{MilpError, MilpSolution, MilpSolver, SolverConfig, Variable};
use crate::models::{Instance, NotFoundReason, SolveOutcome, WaveSolution};

/// Default threshold above which a variable value counts as 1.
pub const DEFAULT_SELECTION_THRESHOLD: f64 = 0.9;

/// How the ratio objective is handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectiveStrategy {
    /// One solve of the fixed-penalty surrogate.
    FixedPenalty {
        /// Penalty α charged per visited aisle.
        aisle_penalty: f64,
    },
    /// Parametric iteration converging to the ratio optimum.
    Dinkelbach {
        /// Maximum number of solves.
        max_iterations: usize,
        /// Stop once the surrogate optimum is at most this value.
        tolerance: f64,
    },
}

impl ObjectiveStrategy {
    /// Dinkelbach iteration with default limits.
    pub fn dinkelbach() -> Self {
        Self::Dinkelbach {
            max_iterations: 50,
            tolerance: 1e-6,
        }
    }
}

impl Default for ObjectiveStrategy {
    fn default() -> Self {
        Self::FixedPenalty {
            aisle_penalty: DEFAULT_AISLE_PENALTY,
        }
    }
}

/// Wave solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSolverConfig {
    /// Total runtime budget.
    pub budget: TimeBudget,
    /// Variable values strictly above this count as selected.
    pub selection_threshold: f64,
    /// Objective handling.
    pub objective: ObjectiveStrategy,
}

impl Default for WaveSolverConfig {
    fn default() -> Self {
        Self {
            budget: TimeBudget::default(),
            selection_threshold: DEFAULT_SELECTION_THRESHOLD,
            objective: ObjectiveStrategy::default(),
        }
    }
}

impl WaveSolverConfig {
    /// Sets the total budget.
    pub fn with_budget(mut self, budget: TimeBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the selection threshold.
    pub fn with_selection_threshold(mut self, threshold: f64) -> Self {
        self.selection_threshold = threshold;
        self
    }

    /// Sets the objective strategy.
    pub fn with_objective(mut self, objective: ObjectiveStrategy) -> Self {
        self.objective = objective;
        self
    }
}

/// Solves wave picking instances with a pluggable backend.
///
/// # Example
/// ```
/// use std::time::Instant;
/// use u_wave::milp::MicroLpSolver;
/// use u_wave::models::{Aisle, Instance, Order, WaveSolution};
/// use u_wave::solver::WaveSolver;
///
/// let start = Instant::now();
/// let instance = Instance::new(
///     vec![Order::new().with_item(0, 3).with_item(1, 2), Order::new().with_item(0, 10)],
///     vec![Aisle::new().with_item(0, 5).with_item(1, 5)],
///     2, 4, 6,
/// ).unwrap();
///
/// let solver = WaveSolver::new(MicroLpSolver::new());
/// let outcome = solver.solve(&instance, &start);
/// assert_eq!(outcome.solution(), Some(&WaveSolution::new([0], [0])));
/// ```
#[derive(Debug, Clone)]
pub struct WaveSolver<S> {
    backend: S,
    config: WaveSolverConfig,
}

impl<S: MilpSolver> WaveSolver<S> {
    /// Creates a solver with the default configuration.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            config: WaveSolverConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: WaveSolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &WaveSolverConfig {
        &self.config
    }

    /// Solves `instance` within what is left of the budget.
    ///
    /// `clock` reports time elapsed since the budget started.
    #[instrument(
        skip_all,
        fields(orders = instance.order_count(), aisles = instance.aisle_count())
    )]
    pub fn solve(&self, instance: &Instance, clock: &impl Stopwatch) -> SolveOutcome {
        match self.config.objective {
            ObjectiveStrategy::FixedPenalty { aisle_penalty } => {
                self.solve_once(instance, aisle_penalty, clock)
            }
            ObjectiveStrategy::Dinkelbach {
                max_iterations,
                tolerance,
            } => self.solve_dinkelbach(instance, max_iterations, tolerance, clock),
        }
    }

    /// One build → solve → extract cycle.
    fn solve_once(
        &self,
        instance: &Instance,
        aisle_penalty: f64,
        clock: &impl Stopwatch,
    ) -> SolveOutcome {
        let remaining = self.config.budget.remaining(clock.elapsed());
        let wave_model = WaveModelBuilder::new(instance)
            .with_aisle_penalty(aisle_penalty)
            .build();
        if wave_model.is_trivially_infeasible() {
            debug!("no aisle can be visited or no order can reach the lower bound");
            return SolveOutcome::NotFound(NotFoundReason::Infeasible);
        }
        let (model, order_vars, aisle_vars) = wave_model.into_parts();

        info!(
            backend = self.backend.name(),
            remaining_secs = remaining.as_secs_f64(),
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            "solving wave model"
        );

        let result = self
            .backend
            .solve(model, &SolverConfig::with_time_limit(remaining))
            .and_then(|solution| {
                extract_selection(
                    &solution,
                    &order_vars,
                    &aisle_vars,
                    self.config.selection_threshold,
                )
            });

        match result {
            Ok(wave) => {
                debug!(
                    orders = wave.order_count(),
                    aisles = wave.aisle_count(),
                    "extracted wave"
                );
                SolveOutcome::Found(wave)
            }
            Err(err) => {
                warn!(%err, "no wave solution");
                SolveOutcome::NotFound(not_found_reason(err))
            }
        }
    }

    fn solve_dinkelbach(
        &self,
        instance: &Instance,
        max_iterations: usize,
        tolerance: f64,
        clock: &impl Stopwatch,
    ) -> SolveOutcome {
        let mut lambda = 0.0;
        let mut best: Option<(f64, WaveSolution)> = None;

        for iteration in 0..max_iterations.max(1) {
            if iteration > 0 && self.config.budget.is_exhausted(clock.elapsed()) {
                debug!(iteration, "budget exhausted");
                break;
            }

            let wave = match self.solve_once(instance, lambda, clock) {
                SolveOutcome::Found(wave) => wave,
                SolveOutcome::NotFound(reason) => match best {
                    None => return SolveOutcome::NotFound(reason),
                    Some(_) => break,
                },
            };

            let ratio = objective_value(instance, &wave);
            let gap = units_picked(instance, &wave) as f64 - lambda * wave.aisle_count() as f64;
            debug!(iteration, lambda, ratio, gap, "dinkelbach iteration");

            if best.as_ref().map_or(true, |(value, _)| ratio > *value) {
                best = Some((ratio, wave));
            }
            if gap <= tolerance || ratio <= lambda {
                break;
            }
            lambda = ratio;
        }

        match best {
            Some((_, wave)) => SolveOutcome::Found(wave),
            None => SolveOutcome::NotFound(NotFoundReason::TimeLimit),
        }
    }
}

/// Reads the order/aisle selection out of a backend solution.
///
/// A value counts as selected when strictly greater than `threshold`.
///
/// # Errors
/// [`MilpError::Backend`] if the solution lacks a value for some variable.
pub fn extract_selection(
    solution: &MilpSolution,
    order_vars: &[Variable],
    aisle_vars: &[Variable],
    threshold: f64,
) -> Result<WaveSolution, MilpError> {
    let selected = |vars: &[Variable]| -> Result<Vec<usize>, MilpError> {
        let mut picked = Vec::new();
        for (idx, &var) in vars.iter().enumerate() {
            let value = solution.value(var).ok_or_else(|| {
                MilpError::Backend(format!("solution has no value for variable {var:?}"))
            })?;
            if value > threshold {
                picked.push(idx);
            }
        }
        Ok(picked)
    };

    Ok(WaveSolution::new(
        selected(order_vars)?,
        selected(aisle_vars)?,
    ))
}

fn not_found_reason(err: MilpError) -> NotFoundReason {
    match err {
        MilpError::Infeasible => NotFoundReason::Infeasible,
        MilpError::NoIncumbent { .. } => NotFoundReason::TimeLimit,
        MilpError::Backend(msg) => NotFoundReason::SolverFailure(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::is_feasible;
    use crate::generator::InstanceGenerator;
    use crate::milp::{MicroLpSolver, MilpModel};
    use crate::models::{Aisle, Order};
    use std::cell::Cell;
    use std::time::Duration;

    fn sample() -> Instance {
        Instance::new(
            vec![
                Order::new().with_item(0, 3).with_item(1, 2),
                Order::new().with_item(0, 10),
            ],
            vec![Aisle::new().with_item(0, 5).with_item(1, 5)],
            2,
            4,
            6,
        )
        .unwrap()
    }

    /// Replays canned results (positional values, last one repeated) and
    /// records the time limit it was given.
    struct ScriptedSolver {
        results: Vec<Result<Vec<f64>, MilpError>>,
        seen_limit: Cell<Option<Duration>>,
        calls: Cell<usize>,
    }

    impl ScriptedSolver {
        fn new(result: Result<Vec<f64>, MilpError>) -> Self {
            Self::sequence(vec![result])
        }

        fn sequence(results: Vec<Result<Vec<f64>, MilpError>>) -> Self {
            Self {
                results,
                seen_limit: Cell::new(None),
                calls: Cell::new(0),
            }
        }
    }

    /// Reads zero on the first call and `later` afterwards.
    struct SteppedClock {
        later: Duration,
        reads: Cell<usize>,
    }

    impl Stopwatch for SteppedClock {
        fn elapsed(&self) -> Duration {
            let reads = self.reads.get();
            self.reads.set(reads + 1);
            if reads == 0 {
                Duration::ZERO
            } else {
                self.later
            }
        }
    }

    impl MilpSolver for ScriptedSolver {
        fn name(&self) -> &str {
            "scripted"
        }

        fn solve(
            &self,
            model: MilpModel,
            config: &SolverConfig,
        ) -> Result<MilpSolution, MilpError> {
            self.seen_limit.set(Some(config.time_limit));
            let call = self.calls.get();
            self.calls.set(call + 1);
            let result = &self.results[call.min(self.results.len() - 1)];
            result
                .clone()
                .map(|values| model.variables().iter().copied().zip(values).collect())
        }
    }

    /// Brute-force optimum ratio over all order/aisle subsets.
    fn brute_force_ratio(instance: &Instance) -> Option<f64> {
        let n_orders = instance.order_count();
        let n_aisles = instance.aisle_count();
        let mut best: Option<f64> = None;
        for orders in 0u32..(1 << n_orders) {
            for aisles in 0u32..(1 << n_aisles) {
                let solution = WaveSolution::new(
                    (0..n_orders).filter(|&o| (orders >> o) & 1 == 1),
                    (0..n_aisles).filter(|&a| (aisles >> a) & 1 == 1),
                );
                if is_feasible(instance, &solution) {
                    let value = objective_value(instance, &solution);
                    best = Some(best.map_or(value, |b: f64| b.max(value)));
                }
            }
        }
        best
    }

    #[test]
    fn test_solve_example() {
        let instance = sample();
        let solver = WaveSolver::new(MicroLpSolver::new());
        let outcome = solver.solve(&instance, &Duration::ZERO);
        let solution = outcome.solution().unwrap();
        assert_eq!(solution, &WaveSolution::new([0], [0]));
        assert!(is_feasible(&instance, solution));
        assert_eq!(objective_value(&instance, solution), 5.0);
    }

    #[test]
    fn test_infeasible_instance() {
        // order needs 10 of item 0; aisle holds 5
        let instance = Instance::new(
            vec![Order::new().with_item(0, 10)],
            vec![Aisle::new().with_item(0, 5)],
            1,
            1,
            20,
        )
        .unwrap();
        let outcome = WaveSolver::new(MicroLpSolver::new()).solve(&instance, &Duration::ZERO);
        assert_eq!(outcome, SolveOutcome::NotFound(NotFoundReason::Infeasible));
    }

    #[test]
    fn test_no_aisles_is_infeasible() {
        let instance = Instance::new(vec![Order::new().with_item(0, 1)], vec![], 1, 0, 5).unwrap();
        let outcome = WaveSolver::new(MicroLpSolver::new()).solve(&instance, &Duration::ZERO);
        assert_eq!(outcome, SolveOutcome::NotFound(NotFoundReason::Infeasible));
    }

    #[test]
    fn test_no_orders_zero_lb_found_empty() {
        // Found with an empty order set is distinct from NotFound.
        let instance = Instance::new(vec![], vec![Aisle::new().with_item(0, 1)], 1, 0, 5).unwrap();
        let outcome = WaveSolver::new(MicroLpSolver::new()).solve(&instance, &Duration::ZERO);
        let solution = outcome.solution().unwrap();
        assert!(solution.orders.is_empty());
        assert_eq!(solution.aisle_count(), 1);
        assert!(!is_feasible(&instance, solution));
        assert_eq!(objective_value(&instance, solution), 0.0);
    }

    #[test]
    fn test_remaining_time_passed_to_backend() {
        let instance = sample();
        let backend = ScriptedSolver::new(Ok(vec![1.0, 0.0, 1.0]));
        let solver = WaveSolver::new(&backend).with_config(
            WaveSolverConfig::default().with_budget(TimeBudget::new(Duration::from_secs(100))),
        );
        solver.solve(&instance, &Duration::from_secs(30));
        assert_eq!(backend.seen_limit.get(), Some(Duration::from_secs(70)));
    }

    #[test]
    fn test_expired_budget_still_attempts_zero_time_solve() {
        let instance = sample();
        let backend = ScriptedSolver::new(Ok(vec![1.0, 0.0, 1.0]));
        let solver = WaveSolver::new(&backend);
        let outcome = solver.solve(&instance, &Duration::from_secs(10_000));
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(backend.seen_limit.get(), Some(Duration::ZERO));
        assert!(outcome.is_found());
    }

    #[test]
    fn test_selection_threshold_is_strict() {
        let instance = sample();
        // x_0 = 0.95 → selected, x_1 = 0.9 → not selected, y_0 = 0.91 → selected
        let backend = ScriptedSolver::new(Ok(vec![0.95, 0.9, 0.91]));
        let outcome = WaveSolver::new(&backend).solve(&instance, &Duration::ZERO);
        assert_eq!(outcome.solution(), Some(&WaveSolution::new([0], [0])));
    }

    #[test]
    fn test_configurable_threshold() {
        let instance = sample();
        let backend = ScriptedSolver::new(Ok(vec![0.6, 0.4, 0.7]));
        let solver = WaveSolver::new(&backend)
            .with_config(WaveSolverConfig::default().with_selection_threshold(0.5));
        let outcome = solver.solve(&instance, &Duration::ZERO);
        assert_eq!(outcome.solution(), Some(&WaveSolution::new([0], [0])));
    }

    #[test]
    fn test_backend_failure_is_not_found() {
        let instance = sample();
        let backend = ScriptedSolver::new(Err(MilpError::Backend("out of memory".into())));
        let outcome = WaveSolver::new(&backend).solve(&instance, &Duration::ZERO);
        assert_eq!(
            outcome,
            SolveOutcome::NotFound(NotFoundReason::SolverFailure("out of memory".into()))
        );
    }

    #[test]
    fn test_no_incumbent_is_time_limit() {
        let instance = sample();
        let backend = ScriptedSolver::new(Err(MilpError::NoIncumbent {
            time_limit: Duration::ZERO,
        }));
        let outcome = WaveSolver::new(&backend).solve(&instance, &Duration::ZERO);
        assert_eq!(outcome, SolveOutcome::NotFound(NotFoundReason::TimeLimit));
    }

    #[test]
    fn test_short_solution_vector_is_failure() {
        let instance = sample();
        let backend = ScriptedSolver::new(Ok(vec![1.0]));
        let outcome = WaveSolver::new(&backend).solve(&instance, &Duration::ZERO);
        assert!(matches!(
            outcome,
            SolveOutcome::NotFound(NotFoundReason::SolverFailure(_))
        ));
    }

    #[test]
    fn test_dinkelbach_example() {
        let instance = sample();
        let solver = WaveSolver::new(MicroLpSolver::new())
            .with_config(WaveSolverConfig::default().with_objective(ObjectiveStrategy::dinkelbach()));
        let outcome = solver.solve(&instance, &Duration::ZERO);
        assert_eq!(outcome.solution(), Some(&WaveSolution::new([0], [0])));
    }

    #[test]
    fn test_dinkelbach_beats_fixed_penalty() {
        // One aisle serves at most 5 units (ratio 5); both aisles serve all
        // 18 units (ratio 9). A penalty of 1000 per aisle prefers one aisle.
        let instance = Instance::new(
            vec![
                Order::new().with_item(0, 5),
                Order::new().with_item(1, 5),
                Order::new().with_item(0, 4).with_item(1, 4),
            ],
            vec![Aisle::new().with_item(0, 9), Aisle::new().with_item(1, 9)],
            2,
            1,
            20,
        )
        .unwrap();

        let fixed = WaveSolver::new(MicroLpSolver::new()).solve(&instance, &Duration::ZERO);
        let fixed = fixed.solution().unwrap();
        assert!(is_feasible(&instance, fixed));
        assert_eq!(fixed.aisle_count(), 1);
        assert_eq!(objective_value(&instance, fixed), 5.0);

        let solver = WaveSolver::new(MicroLpSolver::new())
            .with_config(WaveSolverConfig::default().with_objective(ObjectiveStrategy::dinkelbach()));
        let outcome = solver.solve(&instance, &Duration::ZERO);
        let best = outcome.solution().unwrap();
        assert_eq!(best, &WaveSolution::new([0, 1, 2], [0, 1]));
        assert_eq!(objective_value(&instance, best), 9.0);
    }

    #[test]
    fn test_dinkelbach_first_failure_propagates() {
        let instance = sample();
        let backend = ScriptedSolver::new(Err(MilpError::Infeasible));
        let solver = WaveSolver::new(&backend)
            .with_config(WaveSolverConfig::default().with_objective(ObjectiveStrategy::dinkelbach()));
        let outcome = solver.solve(&instance, &Duration::ZERO);
        assert_eq!(outcome, SolveOutcome::NotFound(NotFoundReason::Infeasible));
        assert_eq!(backend.calls.get(), 1);
    }

    #[test]
    fn test_dinkelbach_failure_after_success_keeps_best() {
        // first solve selects order 0 / aisle 0 (ratio 5, gap 5), second fails
        let instance = sample();
        let backend = ScriptedSolver::sequence(vec![
            Ok(vec![1.0, 0.0, 1.0]),
            Err(MilpError::Backend("lost license".into())),
        ]);
        let solver = WaveSolver::new(&backend)
            .with_config(WaveSolverConfig::default().with_objective(ObjectiveStrategy::dinkelbach()));
        let outcome = solver.solve(&instance, &Duration::ZERO);
        assert_eq!(backend.calls.get(), 2);
        assert_eq!(outcome, SolveOutcome::Found(WaveSolution::new([0], [0])));
    }

    #[test]
    fn test_dinkelbach_stops_when_budget_exhausted() {
        let instance = sample();
        let backend = ScriptedSolver::new(Ok(vec![1.0, 0.0, 1.0]));
        let solver = WaveSolver::new(&backend).with_config(
            WaveSolverConfig::default()
                .with_budget(TimeBudget::new(Duration::from_secs(60)))
                .with_objective(ObjectiveStrategy::dinkelbach()),
        );
        let clock = SteppedClock {
            later: Duration::from_secs(61),
            reads: Cell::new(0),
        };
        let outcome = solver.solve(&instance, &clock);
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(backend.seen_limit.get(), Some(Duration::from_secs(60)));
        assert_eq!(outcome, SolveOutcome::Found(WaveSolution::new([0], [0])));
    }

    #[test]
    fn test_trivially_infeasible_skips_backend() {
        let instance = Instance::new(vec![], vec![Aisle::new().with_item(0, 1)], 1, 1, 5).unwrap();
        let backend = ScriptedSolver::new(Ok(vec![1.0]));
        let outcome = WaveSolver::new(&backend).solve(&instance, &Duration::ZERO);
        assert_eq!(outcome, SolveOutcome::NotFound(NotFoundReason::Infeasible));
        assert_eq!(backend.calls.get(), 0);
    }

    #[test]
    fn test_generated_solutions_are_feasible() {
        for seed in 0..10 {
            let instance = InstanceGenerator::new()
                .with_orders(6)
                .with_aisles(4)
                .with_items(5)
                .with_seed(seed)
                .generate()
                .unwrap();
            let outcome = WaveSolver::new(MicroLpSolver::new()).solve(&instance, &Duration::ZERO);
            match (outcome, brute_force_ratio(&instance)) {
                (SolveOutcome::Found(solution), Some(_)) => {
                    assert!(is_feasible(&instance, &solution), "seed {seed}");
                }
                (SolveOutcome::NotFound(reason), None) => {
                    assert_eq!(reason, NotFoundReason::Infeasible, "seed {seed}");
                }
                (outcome, best) => panic!("seed {seed}: {outcome:?} vs brute force {best:?}"),
            }
        }
    }

    #[test]
    fn test_dinkelbach_matches_brute_force() {
        let solver = WaveSolver::new(MicroLpSolver::new())
            .with_config(WaveSolverConfig::default().with_objective(ObjectiveStrategy::dinkelbach()));
        for seed in 0..10 {
            let instance = InstanceGenerator::new()
                .with_orders(5)
                .with_aisles(4)
                .with_items(4)
                .with_seed(seed)
                .generate()
                .unwrap();
            let outcome = solver.solve(&instance, &Duration::ZERO);
            match (outcome.solution(), brute_force_ratio(&instance)) {
                (Some(solution), Some(best)) => {
                    assert!(is_feasible(&instance, solution), "seed {seed}");
                    let value = objective_value(&instance, solution);
                    assert!((value - best).abs() < 1e-9, "seed {seed}: {value} vs {best}");
                }
                (None, None) => {}
                (found, best) => panic!("seed {seed}: {found:?} vs brute force {best:?}"),
            }
        }
    }

    #[test]
    fn test_config_serde() {
        let config = WaveSolverConfig::default().with_objective(ObjectiveStrategy::dinkelbach());
        let json = serde_json::to_string(&config).unwrap();
        let back: WaveSolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
