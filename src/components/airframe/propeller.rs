use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    components::airframe::ConfigError, resources::PropellerData, utils::MIN_DIRECTION_NORM,
};

/// Rotation sense of a propeller seen from behind its thrust axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinSense {
    Cw,
    Ccw,
}

impl SpinSense {
    /// Sign of the reaction torque about the thrust axis.
    pub fn sign(self) -> f64 {
        match self {
            SpinSense::Ccw => 1.0,
            SpinSense::Cw => -1.0,
        }
    }
}

impl FromStr for SpinSense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cw" => Ok(SpinSense::Cw),
            "ccw" => Ok(SpinSense::Ccw),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for SpinSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinSense::Cw => write!(f, "cw"),
            SpinSense::Ccw => write!(f, "ccw"),
        }
    }
}

/// Aerodynamic description of a propeller at full command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropellerThrust {
    /// Thrust and torque coefficients against squared spin rate (rad/s).
    Coefficients {
        thrust_coeff: f64,
        torque_coeff: f64,
        max_spin_rate: f64,
    },
    /// Precomputed thrust (N) and reaction torque (N·m) at full command.
    MaxForce { force: f64, torque: f64 },
}

impl PropellerThrust {
    pub fn from_library(data: &PropellerData) -> Self {
        PropellerThrust::Coefficients {
            thrust_coeff: data.thrust_coeff,
            torque_coeff: data.torque_coeff,
            max_spin_rate: data.max_spin_rate,
        }
    }

    /// Thrust at full command (N).
    pub fn max_force(&self) -> f64 {
        match *self {
            PropellerThrust::Coefficients {
                thrust_coeff,
                max_spin_rate,
                ..
            } => thrust_coeff * max_spin_rate.powi(2),
            PropellerThrust::MaxForce { force, .. } => force,
        }
    }

    /// Reaction torque magnitude at full command (N·m).
    pub fn max_torque(&self) -> f64 {
        match *self {
            PropellerThrust::Coefficients {
                torque_coeff,
                max_spin_rate,
                ..
            } => torque_coeff * max_spin_rate.powi(2),
            PropellerThrust::MaxForce { torque, .. } => torque,
        }
    }

    fn values(&self) -> [f64; 3] {
        match *self {
            PropellerThrust::Coefficients {
                thrust_coeff,
                torque_coeff,
                max_spin_rate,
            } => [thrust_coeff, torque_coeff, max_spin_rate],
            PropellerThrust::MaxForce { force, torque } => [force, torque, 1.0],
        }
    }
}

/// Static configuration of one rotor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropellerSpec {
    /// Position relative to the body origin (m).
    pub location: Vector3<f64>,
    /// Thrust axis in the body frame. Normalized when the matrices are built.
    pub direction: Vector3<f64>,
    pub spin: SpinSense,
    pub thrust: PropellerThrust,
    /// Nominal diameter (in) when the constants came from the propeller library.
    pub size: Option<u32>,
}

impl PropellerSpec {
    pub fn new(
        location: Vector3<f64>,
        direction: Vector3<f64>,
        spin: SpinSense,
        thrust: PropellerThrust,
    ) -> Self {
        Self {
            location,
            direction,
            spin,
            thrust,
            size: None,
        }
    }

    /// Creates a propeller whose constants are looked up by nominal size.
    pub fn sized(
        location: Vector3<f64>,
        direction: Vector3<f64>,
        spin: SpinSense,
        size: u32,
    ) -> Result<Self, ConfigError> {
        let data = PropellerData::lookup(size)?;
        Ok(Self {
            location,
            direction,
            spin,
            thrust: PropellerThrust::from_library(data),
            size: Some(size),
        })
    }

    /// Unit thrust axis, or `None` for a zero-length direction.
    pub fn unit_direction(&self) -> Option<Vector3<f64>> {
        self.direction.try_normalize(MIN_DIRECTION_NORM)
    }

    /// Numeric sanity checks on an already well-formed propeller.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !self.location.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "propeller {} location is not finite",
                index
            )));
        }
        if !self.direction.iter().all(|v| v.is_finite()) || self.unit_direction().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "propeller {} thrust direction must be finite and nonzero",
                index
            )));
        }
        if self.thrust.values().iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "propeller {} aerodynamic constants must be finite and non-negative",
                index
            )));
        }
        if self.thrust.max_force() <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "propeller {} produces no thrust",
                index
            )));
        }
        Ok(())
    }
}
