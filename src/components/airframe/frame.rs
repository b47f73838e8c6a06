use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::airframe::{ConfigError, MassModel, PropellerSpec};

/// An immutable multirotor description: mass properties plus an ordered propeller list.
///
/// Propeller order is the column order of the effectiveness matrices and of every
/// per-propeller vector in a hover result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirframeSpec {
    /// Name of the airframe, used in reports and to derive RNG streams.
    pub name: String,
    /// Mass and inertia about the center of gravity.
    pub mass: MassModel,
    /// Center of gravity in the body frame (m).
    pub center_of_gravity: Vector3<f64>,
    pub propellers: Vec<PropellerSpec>,
}

impl AirframeSpec {
    /// Creates a validated airframe.
    ///
    /// # Returns
    /// The airframe, or a `ConfigError` for a non-positive mass or moment, an empty
    /// propeller list or a propeller failing its numeric checks.
    pub fn new(
        name: impl Into<String>,
        mass: MassModel,
        center_of_gravity: Vector3<f64>,
        propellers: Vec<PropellerSpec>,
    ) -> Result<Self, ConfigError> {
        let airframe = Self {
            name: name.into(),
            mass,
            center_of_gravity,
            propellers,
        };
        airframe.validate()?;
        Ok(airframe)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass.mass.is_finite() && self.mass.mass > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "mass must be positive, got {}",
                self.mass.mass
            )));
        }
        let inertia = &self.mass.inertia;
        if !inertia.iter().all(|v| v.is_finite()) || (0..3).any(|i| inertia[(i, i)] <= 0.0) {
            return Err(ConfigError::ValidationError(
                "inertia tensor needs finite entries and positive moments".to_string(),
            ));
        }
        if !self.center_of_gravity.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::ValidationError(
                "center of gravity is not finite".to_string(),
            ));
        }
        if self.propellers.is_empty() {
            return Err(ConfigError::ValidationError(
                "airframe has no propellers".to_string(),
            ));
        }
        for (index, prop) in self.propellers.iter().enumerate() {
            prop.validate(index)?;
        }
        Ok(())
    }

    pub fn propeller_count(&self) -> usize {
        self.propellers.len()
    }

    /// Weight of the airframe (N).
    pub fn weight(&self) -> f64 {
        self.mass.mass * crate::utils::GRAVITY
    }

    /// Sum of the propeller thrusts at full command (N), ignoring direction.
    pub fn total_max_thrust(&self) -> f64 {
        self.propellers.iter().map(|p| p.thrust.max_force()).sum()
    }
}
