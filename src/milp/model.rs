//! Binary linear model container.
//!
//! Holds a `good_lp` problem under construction: the declared binary
//! variables, the objective expression, and named constraints. Backends
//! take the model apart with [`MilpModel::into_parts`] and hand the pieces
//! to their engine.

use good_lp::{variable, Constraint, Expression, ProblemVariables, Variable};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    /// Maximize the objective.
    #[default]
    Maximize,
    /// Minimize the objective.
    Minimize,
}

/// A binary integer program.
///
/// # Example
/// ```
/// use u_wave::milp::{MilpModel, Sense};
///
/// let mut model = MilpModel::new("pick_one");
/// let a = model.add_binary("a");
/// let b = model.add_binary("b");
/// model.set_objective(Sense::Maximize, 1.0 * a + 2.0 * b);
/// model.add_constraint("one", (a + b).leq(1.0));
///
/// assert_eq!(model.variable_count(), 2);
/// assert_eq!(model.constraint_names().collect::<Vec<_>>(), vec!["one"]);
/// ```
pub struct MilpModel {
    name: String,
    variables: ProblemVariables,
    declared: Vec<Variable>,
    sense: Sense,
    objective: Expression,
    constraints: Vec<(String, Constraint)>,
}

/// The pieces of a model, ready for a `good_lp` backend.
pub(crate) struct ModelParts {
    pub variables: ProblemVariables,
    pub declared: Vec<Variable>,
    pub sense: Sense,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
}

impl MilpModel {
    /// Creates an empty model with a zero objective.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: ProblemVariables::new(),
            declared: Vec::new(),
            sense: Sense::default(),
            objective: Expression::from(0.0),
            constraints: Vec::new(),
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> Variable {
        let var = self
            .variables
            .add(variable().binary().name(name.into()));
        self.declared.push(var);
        var
    }

    /// Sets the objective and its direction.
    pub fn set_objective(&mut self, sense: Sense, objective: Expression) {
        self.sense = sense;
        self.objective = objective;
    }

    /// Adds a named constraint.
    pub fn add_constraint(&mut self, name: impl Into<String>, constraint: Constraint) {
        self.constraints.push((name.into(), constraint));
    }

    /// Declared variables, in declaration order.
    #[inline]
    pub fn variables(&self) -> &[Variable] {
        &self.declared
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.declared.len()
    }

    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Constraint names, in insertion order.
    pub fn constraint_names(&self) -> impl Iterator<Item = &str> {
        self.constraints.iter().map(|(name, _)| name.as_str())
    }

    /// Whether a constraint with this name exists.
    pub fn has_constraint(&self, name: &str) -> bool {
        self.constraint_names().any(|n| n == name)
    }

    #[inline]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub(crate) fn into_parts(self) -> ModelParts {
        ModelParts {
            variables: self.variables,
            declared: self.declared,
            sense: self.sense,
            objective: self.objective,
            constraints: self
                .constraints
                .into_iter()
                .map(|(_, constraint)| constraint)
                .collect(),
        }
    }
}
