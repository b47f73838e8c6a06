use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    components::airframe::{ConfigError, PropellerSpec},
    resources::PropellerData,
    utils::{
        box_inertia, point_mass_inertia, BEAM_LINEAR_DENSITY, CONTROLLER_DIMENSIONS,
        CONTROLLER_MASS,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassModel {
    /// Total mass of the airframe (kg).
    pub mass: f64,
    /// The inertia matrix (3x3) about the center of gravity.
    pub inertia: Matrix3<f64>,
}

impl MassModel {
    /// Creates a new `MassModel` from principal moments and products of inertia.
    ///
    /// # Arguments
    /// * `mass` - Total mass of the airframe (kg).
    /// * `ixx`, `iyy`, `izz` - Moments of inertia about the body axes (kg·m²).
    /// * `ixy`, `ixz`, `iyz` - Products of inertia (kg·m²), entered negated off the diagonal.
    pub fn new(mass: f64, ixx: f64, iyy: f64, izz: f64, ixy: f64, ixz: f64, iyz: f64) -> Self {
        let inertia = Matrix3::new(
            ixx, -ixy, -ixz, //
            -ixy, iyy, -iyz, //
            -ixz, -iyz, izz,
        );
        Self::from_tensor(mass, inertia)
    }

    pub fn from_tensor(mass: f64, inertia: Matrix3<f64>) -> Self {
        Self { mass, inertia }
    }

    /// Diagonal inertia, no products.
    pub fn principal(mass: f64, ixx: f64, iyy: f64, izz: f64) -> Self {
        Self::new(mass, ixx, iyy, izz, 0.0, 0.0, 0.0)
    }

    /// Unit mass and unit inertia, used by the fixed-geometry research bodies.
    pub fn unit() -> Self {
        Self::principal(1.0, 1.0, 1.0, 1.0)
    }

    /// Inverse of the current tensor, `None` when it is singular.
    pub fn inertia_inv(&self) -> Option<Matrix3<f64>> {
        self.inertia.try_inverse()
    }

    pub fn is_invertible(&self) -> bool {
        self.inertia_inv().is_some()
    }

    /// Derives mass, center of gravity and inertia for a propeller layout.
    ///
    /// The airframe is a flight controller box at the origin, one carbon beam
    /// from the origin to every propeller (lumped at its midpoint) and the
    /// propeller/motor masses from the propeller library. Every propeller must
    /// carry a nominal size.
    pub fn from_layout(props: &[PropellerSpec]) -> Result<(Self, Vector3<f64>), ConfigError> {
        let mut point_masses: Vec<(f64, Vector3<f64>)> =
            vec![(CONTROLLER_MASS, Vector3::zeros())];

        for (index, prop) in props.iter().enumerate() {
            let size = prop.size.ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "propeller {} has no nominal size, cannot derive the mass model",
                    index
                ))
            })?;
            let data = PropellerData::lookup(size)?;
            let beam_mass = BEAM_LINEAR_DENSITY * prop.location.norm();
            point_masses.push((beam_mass, prop.location * 0.5));
            point_masses.push((data.mass, prop.location));
        }

        let mass: f64 = point_masses.iter().map(|(m, _)| m).sum();
        let cg = point_masses
            .iter()
            .fold(Vector3::<f64>::zeros(), |acc, (m, r)| acc + r * *m)
            / mass;

        let inertia = point_masses.iter().fold(
            box_inertia(CONTROLLER_MASS, CONTROLLER_DIMENSIONS),
            |acc, (m, r)| acc + point_mass_inertia(*m, &(r - cg)),
        );

        Ok((Self::from_tensor(mass, inertia), cg))
    }
}
