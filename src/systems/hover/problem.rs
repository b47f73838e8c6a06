use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    components::HoverStatus,
    systems::hover::{EffectivenessMatrices, EqualityConstrainedProblem},
    utils::GRAVITY,
};

/// Which torque condition a hover solve enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoverMode {
    /// Net torque is zero
    Static,
    /// Net torque is parallel to the net force
    Spinning,
}

impl HoverMode {
    /// Status reported when a solve in this mode converges.
    pub fn status(&self) -> HoverStatus {
        match self {
            HoverMode::Static => HoverStatus::Static,
            HoverMode::Spinning => HoverStatus::Spinning,
        }
    }
}

impl fmt::Display for HoverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoverMode::Static => write!(f, "static"),
            HoverMode::Spinning => write!(f, "spinning"),
        }
    }
}

/// Minimum-effort hover as an equality constrained problem in `eta`.
///
/// Residuals, all dimensionless:
/// * `|Bf eta|^2 / G^2 - 1`
/// * static: `Bm eta / s`
/// * spinning: `(Bf eta) x (Bm eta) / (G s)`
///
/// where `s` is the torque scale of the matrices.
#[derive(Debug, Clone)]
pub struct HoverProblem<'a> {
    matrices: &'a EffectivenessMatrices,
    mode: HoverMode,
    torque_scale: f64,
}

impl<'a> HoverProblem<'a> {
    pub fn new(matrices: &'a EffectivenessMatrices, mode: HoverMode) -> Self {
        Self {
            matrices,
            mode,
            torque_scale: matrices.torque_scale(),
        }
    }

    fn torque_residual(&self, force: &Vector3<f64>, torque: &Vector3<f64>) -> Vector3<f64> {
        match self.mode {
            HoverMode::Static => torque / self.torque_scale,
            HoverMode::Spinning => force.cross(torque) / (GRAVITY * self.torque_scale),
        }
    }
}

impl EqualityConstrainedProblem for HoverProblem<'_> {
    fn dimension(&self) -> usize {
        self.matrices.propeller_count()
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        vec![self.matrices.eta_bounds(); self.dimension()]
    }

    fn objective(&self, eta: &[f64]) -> f64 {
        eta.iter().map(|e| e * e).sum()
    }

    fn objective_gradient(&self, eta: &[f64]) -> Vec<f64> {
        eta.iter().map(|e| 2.0 * e).collect()
    }

    fn constraints(&self, eta: &[f64]) -> Vec<f64> {
        let force = self.matrices.force(eta);
        let torque = self.matrices.torque(eta);
        let moment = self.torque_residual(&force, &torque);
        vec![
            force.norm_squared() / GRAVITY.powi(2) - 1.0,
            moment.x,
            moment.y,
            moment.z,
        ]
    }

    fn constraint_jacobian(&self, eta: &[f64]) -> Vec<Vec<f64>> {
        let n = self.dimension();
        let force = self.matrices.force(eta);
        let torque = self.matrices.torque(eta);
        let mut rows = vec![vec![0.0; n]; 4];

        for i in 0..n {
            let bf_i: Vector3<f64> = self.matrices.bf.column(i).into_owned();
            let bm_i: Vector3<f64> = self.matrices.bm.column(i).into_owned();

            rows[0][i] = 2.0 * force.dot(&bf_i) / GRAVITY.powi(2);
            let d_moment = match self.mode {
                HoverMode::Static => bm_i / self.torque_scale,
                HoverMode::Spinning => {
                    (bf_i.cross(&torque) + force.cross(&bm_i)) / (GRAVITY * self.torque_scale)
                }
            };
            for k in 0..3 {
                rows[k + 1][i] = d_moment[k];
            }
        }
        rows
    }
}
