use nalgebra::{DVector, Vector3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{
    components::{AirframeSpec, HoverResult, HoverSolverConfig, HoverStatus, RawAirframe},
    systems::hover::{
        AugmentedLagrangian, ConstrainedSolution, EffectivenessMatrices, HoverMode, HoverProblem,
    },
    utils::{HoverError, RngManager, WithRng, GRAVITY},
};

/// Hover feasibility solver for one airframe.
///
/// Owns the effectiveness matrices, the solver configuration and the RNG that
/// draws initial guesses, and keeps the last computed result.
#[derive(Debug, Clone)]
pub struct Hover {
    airframe: AirframeSpec,
    matrices: EffectivenessMatrices,
    config: HoverSolverConfig,
    rng: ChaCha8Rng,
    result: Option<HoverResult>,
}

impl Hover {
    pub fn new(airframe: AirframeSpec, config: HoverSolverConfig) -> Result<Self, HoverError> {
        config.validate()?;
        let matrices = EffectivenessMatrices::build(&airframe, config.command_bounds)?;
        let rng = RngManager::stream(config.seed, &airframe.name);
        Ok(Self {
            airframe,
            matrices,
            config,
            rng,
            result: None,
        })
    }

    /// Validates a loosely typed airframe and sets up the solver for it.
    pub fn from_raw(raw: RawAirframe, config: HoverSolverConfig) -> Result<Self, HoverError> {
        let airframe = AirframeSpec::try_from(raw)?;
        Self::new(airframe, config)
    }

    pub fn airframe(&self) -> &AirframeSpec {
        &self.airframe
    }

    pub fn matrices(&self) -> &EffectivenessMatrices {
        &self.matrices
    }

    pub fn config(&self) -> &HoverSolverConfig {
        &self.config
    }

    /// Result of the last solve, if any.
    pub fn result(&self) -> Option<&HoverResult> {
        self.result.as_ref()
    }

    /// Tries static hover first and falls back to spinning hover.
    pub fn compute_hover(&mut self) -> Result<HoverResult, HoverError> {
        let result = self.static_hover()?;
        if result.status == HoverStatus::Static {
            return Ok(result);
        }
        self.spinning_hover()
    }

    /// Searches for a torque-free hover.
    ///
    /// # Returns
    /// A `Static` result on success, otherwise an `Infeasible` result describing
    /// the best candidate found.
    pub fn static_hover(&mut self) -> Result<HoverResult, HoverError> {
        self.run(HoverMode::Static)
    }

    /// Searches for a hover whose net torque is parallel to the thrust.
    pub fn spinning_hover(&mut self) -> Result<HoverResult, HoverError> {
        self.run(HoverMode::Spinning)
    }

    fn run(&mut self, mode: HoverMode) -> Result<HoverResult, HoverError> {
        info!("Testing {} hover for {}", mode, self.airframe.name);

        let eta0 = self.initial_guess();
        let problem = HoverProblem::new(&self.matrices, mode);
        let solution = AugmentedLagrangian::new(&self.config).solve(&problem, &eta0)?;

        let status = if solution.converged {
            mode.status()
        } else {
            HoverStatus::Infeasible
        };
        debug!(
            iterations = solution.iterations,
            violation = solution.violation,
            "{} hover solve finished",
            mode
        );

        let result = self.build_result(status, &solution);
        match status {
            HoverStatus::Infeasible => info!("{} cannot achieve {} hover", self.airframe.name, mode),
            _ => info!(
                "{} achieves {} with input cost {:.5}",
                self.airframe.name, status, result.input_cost
            ),
        }
        if self.config.verbose {
            info!("\n{}", result);
        }

        self.result = Some(result.clone());
        Ok(result)
    }

    /// Uniform draw inside the `eta` box, one entry per propeller.
    fn initial_guess(&mut self) -> Vec<f64> {
        let (lo, hi) = self.matrices.eta_bounds();
        (0..self.matrices.propeller_count())
            .map(|_| self.rng.gen_range(lo..=hi))
            .collect()
    }

    fn build_result(&self, status: HoverStatus, solution: &ConstrainedSolution) -> HoverResult {
        let bounds = self.config.command_bounds;
        let eta = DVector::from_column_slice(&solution.x);
        let command = eta.map(|e| e.max(0.0).sqrt());
        let throttle = command.map(|c| bounds.throttle(c));

        let force = self.matrices.force(&solution.x);
        let torque = self.matrices.torque(&solution.x);
        let thrust_direction = force.try_normalize(0.0).unwrap_or_else(Vector3::zeros);

        let max_thrust_to_weight = if status.is_feasible() {
            self.thrust_to_weight(&command)
        } else {
            None
        };

        HoverResult {
            status,
            input_cost: eta.dot(&eta),
            eta,
            command,
            throttle,
            resultant_force: force,
            resultant_torque: torque,
            thrust_direction,
            cross_residual: force.cross(&torque).norm(),
            max_thrust_to_weight,
            iterations: solution.iterations,
            constraint_violation: solution.violation,
        }
    }

    /// Scales the commands uniformly until the largest reaches the ceiling.
    fn thrust_to_weight(&self, command: &DVector<f64>) -> Option<f64> {
        let peak = command.max();
        if !(peak > 0.0) {
            return None;
        }
        let scale = self.config.command_bounds.max / peak;
        let saturated: Vec<f64> = command.iter().map(|c| (c * scale).powi(2)).collect();
        Some(self.matrices.force(&saturated).norm() / GRAVITY)
    }
}

impl WithRng for Hover {
    fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = rng;
        self
    }
}
