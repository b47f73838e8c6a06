use nalgebra::{Matrix3xX, Vector3};
use serde::Serialize;

use crate::{
    components::{AirframeSpec, CommandBounds, ConfigError},
    utils::HoverError,
};

/// Linear maps from squared normalized command to specific force and angular acceleration.
///
/// Column `i` belongs to propeller `i` of the airframe the matrices were built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectivenessMatrices {
    /// Specific force per unit `eta` (m/s²)
    pub bf: Matrix3xX<f64>,
    /// Angular acceleration per unit `eta` about the center of gravity (rad/s²)
    pub bm: Matrix3xX<f64>,
    pub bounds: CommandBounds,
}

impl EffectivenessMatrices {
    /// Assembles `Bf` and `Bm` for an airframe.
    ///
    /// # Returns
    /// The matrices, `HoverError::SingularInertia` when the inertia tensor has no
    /// inverse, or a configuration error for a non-positive mass or a zero thrust axis.
    pub fn build(airframe: &AirframeSpec, bounds: CommandBounds) -> Result<Self, HoverError> {
        let inertia_inv = airframe.mass.inertia_inv().ok_or_else(|| {
            HoverError::SingularInertia(format!(
                "{} has a non-invertible inertia tensor",
                airframe.name
            ))
        })?;
        airframe.validate()?;
        let mass = airframe.mass.mass;

        let mut force_columns = Vec::with_capacity(airframe.propellers.len());
        let mut moment_columns = Vec::with_capacity(airframe.propellers.len());

        for (index, prop) in airframe.propellers.iter().enumerate() {
            let axis = prop.unit_direction().ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "propeller {} has a zero-length thrust direction",
                    index
                ))
            })?;
            let arm = prop.location - airframe.center_of_gravity;
            let thrust = axis * prop.thrust.max_force();
            let reaction = axis * (prop.spin.sign() * prop.thrust.max_torque());

            force_columns.push(thrust / mass);
            moment_columns.push(inertia_inv * (arm.cross(&thrust) + reaction));
        }

        Ok(Self {
            bf: Matrix3xX::from_columns(&force_columns),
            bm: Matrix3xX::from_columns(&moment_columns),
            bounds,
        })
    }

    pub fn propeller_count(&self) -> usize {
        self.bf.ncols()
    }

    /// Box for the squared command `eta`.
    pub fn eta_bounds(&self) -> (f64, f64) {
        self.bounds.eta_range()
    }

    /// Specific force `Bf * eta`.
    pub fn force(&self, eta: &[f64]) -> Vector3<f64> {
        combine(&self.bf, eta)
    }

    /// Angular acceleration `Bm * eta`.
    pub fn torque(&self, eta: &[f64]) -> Vector3<f64> {
        combine(&self.bm, eta)
    }

    /// Largest column norm of `Bm`, 1 when every column vanishes.
    pub fn torque_scale(&self) -> f64 {
        let scale = self
            .bm
            .column_iter()
            .map(|column| column.norm())
            .fold(0.0, f64::max);
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

fn combine(matrix: &Matrix3xX<f64>, eta: &[f64]) -> Vector3<f64> {
    eta.iter()
        .enumerate()
        .fold(Vector3::zeros(), |acc, (i, e)| acc + matrix.column(i) * *e)
}
