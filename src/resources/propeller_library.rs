use serde::Serialize;

use crate::components::ConfigError;

/// Aerodynamic and mass data for one nominal propeller size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropellerData {
    /// Nominal diameter (in)
    pub size: u32,
    /// Thrust coefficient (N·s²)
    pub thrust_coeff: f64,
    /// Torque coefficient (N·m·s²)
    pub torque_coeff: f64,
    /// Maximum spin rate (rad/s)
    pub max_spin_rate: f64,
    /// Propeller and motor mass (kg)
    pub mass: f64,
}

/// Propeller sizes available to the standard airframes, keyed by diameter.
pub static PROPELLER_LIBRARY: [PropellerData; 5] = [
    PropellerData {
        size: 4,
        thrust_coeff: 7.24e-07,
        torque_coeff: 8.20e-09,
        max_spin_rate: 3927.0,
        mass: 0.018,
    },
    PropellerData {
        size: 5,
        thrust_coeff: 1.08e-06,
        torque_coeff: 1.22e-08,
        max_spin_rate: 3142.0,
        mass: 0.0196,
    },
    PropellerData {
        size: 6,
        thrust_coeff: 2.21e-06,
        torque_coeff: 2.74e-08,
        max_spin_rate: 2618.0,
        mass: 0.0252,
    },
    PropellerData {
        size: 7,
        thrust_coeff: 4.65e-06,
        torque_coeff: 6.62e-08,
        max_spin_rate: 2244.0,
        mass: 0.046,
    },
    PropellerData {
        size: 8,
        thrust_coeff: 7.60e-06,
        torque_coeff: 1.14e-07,
        max_spin_rate: 1963.0,
        mass: 0.056,
    },
];

impl PropellerData {
    pub fn lookup(size: u32) -> Result<&'static PropellerData, ConfigError> {
        PROPELLER_LIBRARY
            .iter()
            .find(|data| data.size == size)
            .ok_or(ConfigError::UnknownPropellerSize { size })
    }

    /// Thrust at maximum spin rate (N).
    pub fn max_force(&self) -> f64 {
        self.thrust_coeff * self.max_spin_rate.powi(2)
    }
}
