use nalgebra::{DVector, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hover verdict of an airframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoverStatus {
    /// Zero net torque while the thrust balances gravity
    Static,
    /// Net torque collinear with the thrust, the body spins about the thrust axis
    Spinning,
    /// Neither hover mode was found within the command bounds
    Infeasible,
}

impl HoverStatus {
    /// Short status code used in tabular reports.
    pub fn code(&self) -> &'static str {
        match self {
            HoverStatus::Static => "ST",
            HoverStatus::Spinning => "SP",
            HoverStatus::Infeasible => "N",
        }
    }

    pub fn is_feasible(&self) -> bool {
        !matches!(self, HoverStatus::Infeasible)
    }
}

impl fmt::Display for HoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoverStatus::Static => write!(f, "Static Hover"),
            HoverStatus::Spinning => write!(f, "Spinning Hover"),
            HoverStatus::Infeasible => write!(f, "Cannot Hover"),
        }
    }
}

/// Results from a hover calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverResult {
    pub status: HoverStatus,
    /// Squared normalized commands, one per propeller
    pub eta: DVector<f64>,
    /// Normalized commands within the command bounds
    pub command: DVector<f64>,
    /// Commands rescaled to [0, 1] over the command bounds
    pub throttle: DVector<f64>,
    /// Specific force `Bf * eta` (m/s²)
    pub resultant_force: Vector3<f64>,
    /// Angular acceleration `Bm * eta` (rad/s²)
    pub resultant_torque: Vector3<f64>,
    /// Unit thrust axis, zero when there is no thrust
    pub thrust_direction: Vector3<f64>,
    /// Norm of `resultant_force x resultant_torque`
    pub cross_residual: f64,
    /// `eta . eta`
    pub input_cost: f64,
    /// Achievable thrust over weight with the most loaded propeller saturated
    pub max_thrust_to_weight: Option<f64>,
    /// Augmented Lagrangian updates used by the accepted solve
    pub iterations: usize,
    /// Largest normalized constraint residual at the returned point
    pub constraint_violation: f64,
}

impl HoverResult {
    pub fn is_feasible(&self) -> bool {
        self.status.is_feasible()
    }

    pub fn specific_force(&self) -> f64 {
        self.resultant_force.norm()
    }

    pub fn specific_torque(&self) -> f64 {
        self.resultant_torque.norm()
    }
}

fn fmt_vector(values: impl Iterator<Item = f64>) -> String {
    let parts: Vec<String> = values.map(|v| format!("{:.4}", v)).collect();
    format!("[{}]", parts.join(", "))
}

impl fmt::Display for HoverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            HoverStatus::Static | HoverStatus::Spinning => {
                writeln!(f, "----------{} Achieved----------", self.status)?;
                writeln!(f, "Optimum input = {}", fmt_vector(self.throttle.iter().copied()))?;
                writeln!(
                    f,
                    "Thrust vector direction: {}",
                    fmt_vector(self.thrust_direction.iter().copied())
                )?;
            }
            HoverStatus::Infeasible => {
                writeln!(f, "----------Drone Cannot Hover----------")?;
                writeln!(f, "Best input = {}", fmt_vector(self.command.iter().copied()))?;
            }
        }
        writeln!(f, "Resultant specific force: {:.2}", self.specific_force())?;
        writeln!(f, "Resultant specific torque: {:.2}", self.specific_torque())?;
        if self.status != HoverStatus::Static {
            writeln!(
                f,
                "Force-torque cross product norm: {:.5}",
                self.cross_residual
            )?;
        }
        if let Some(ratio) = self.max_thrust_to_weight {
            writeln!(f, "Max thrust to weight: {:.2}", ratio)?;
        }
        if self.is_feasible() {
            write!(f, "Input cost: {:.5}", self.input_cost)?;
        } else {
            write!(f, "Constraint violation: {:.3e}", self.constraint_violation)?;
        }
        Ok(())
    }
}
