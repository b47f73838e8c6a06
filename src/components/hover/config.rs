use serde::{Deserialize, Serialize};

use crate::utils::{HoverError, DEFAULT_COMMAND_MAX, DEFAULT_COMMAND_MIN};

/// Uniform command limits shared by every propeller, as fractions of full spin rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for CommandBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_COMMAND_MIN,
            max: DEFAULT_COMMAND_MAX,
        }
    }
}

impl CommandBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bounds of the squared command `eta`.
    pub fn eta_range(&self) -> (f64, f64) {
        (self.min.powi(2), self.max.powi(2))
    }

    /// Command rescaled to [0, 1] over the bounds.
    pub fn throttle(&self, command: f64) -> f64 {
        (command - self.min) / (self.max - self.min)
    }
}

/// Configuration for the hover solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverSolverConfig {
    /// Command limits applied to every propeller
    pub command_bounds: CommandBounds,
    /// Maximum number of L-BFGS iterations per sub-problem
    pub max_iterations: u64,
    /// Maximum number of augmented Lagrangian updates
    pub max_outer_iterations: usize,
    /// Largest accepted normalized constraint residual
    pub constraint_tolerance: f64,
    /// Convergence tolerance for the relative change of the input cost
    pub cost_tolerance: f64,
    /// Starting penalty weight
    pub initial_penalty: f64,
    /// Penalty multiplier applied when the violation stalls
    pub penalty_growth: f64,
    /// Upper limit for the penalty weight
    pub max_penalty: f64,
    /// L-BFGS history length
    pub lbfgs_memory: usize,
    /// Seed for the initial guesses, entropy when `None`
    pub seed: Option<u64>,
    /// Log the full report after each verdict
    pub verbose: bool,
    /// Attach a terminal observer to the inner optimizer
    pub observe_optimizer: bool,
}

impl Default for HoverSolverConfig {
    fn default() -> Self {
        Self {
            command_bounds: CommandBounds::default(),
            max_iterations: 100,
            max_outer_iterations: 40,
            constraint_tolerance: 1e-6,
            cost_tolerance: 1e-6,
            initial_penalty: 10.0,
            penalty_growth: 10.0,
            max_penalty: 1e10,
            lbfgs_memory: 7,
            seed: None,
            verbose: false,
            observe_optimizer: false,
        }
    }
}

impl HoverSolverConfig {
    pub fn with_command_bounds(mut self, min: f64, max: f64) -> Self {
        self.command_bounds = CommandBounds::new(min, max);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_outer_iterations(mut self, max_outer_iterations: usize) -> Self {
        self.max_outer_iterations = max_outer_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.constraint_tolerance = tolerance;
        self
    }

    pub fn with_cost_tolerance(mut self, tolerance: f64) -> Self {
        self.cost_tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_observer(mut self, observe: bool) -> Self {
        self.observe_optimizer = observe;
        self
    }

    pub fn validate(&self) -> Result<(), HoverError> {
        let CommandBounds { min, max } = self.command_bounds;
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min >= max {
            return Err(HoverError::InvalidParameter(format!(
                "command bounds must satisfy 0 <= min < max, got [{}, {}]",
                min, max
            )));
        }
        if !(self.constraint_tolerance > 0.0) || !(self.cost_tolerance > 0.0) {
            return Err(HoverError::InvalidParameter(
                "tolerances must be positive".to_string(),
            ));
        }
        if self.max_iterations == 0 || self.max_outer_iterations == 0 {
            return Err(HoverError::InvalidParameter(
                "iteration limits must be positive".to_string(),
            ));
        }
        if !(self.initial_penalty > 0.0)
            || !(self.penalty_growth > 1.0)
            || self.max_penalty < self.initial_penalty
        {
            return Err(HoverError::InvalidParameter(format!(
                "penalty schedule {} x{} up to {} is not increasing",
                self.initial_penalty, self.penalty_growth, self.max_penalty
            )));
        }
        if self.lbfgs_memory == 0 {
            return Err(HoverError::InvalidParameter(
                "L-BFGS memory must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
