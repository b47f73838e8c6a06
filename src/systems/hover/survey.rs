use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::{
    components::{AirframeSpec, HoverResult, HoverSolverConfig, StandardAirframe},
    systems::hover::Hover,
    utils::HoverError,
};

/// Hover verdict of a standard layout at one arm length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub arm_length: f64,
    pub result: HoverResult,
}

/// Solves independent airframes in parallel, one `Hover` per airframe.
///
/// Results keep the order of `airframes`. With a seed configured, every airframe
/// draws from its own stream derived from the seed and its name, so the output
/// matches solving each airframe on its own.
pub fn survey(
    airframes: &[AirframeSpec],
    config: &HoverSolverConfig,
) -> Vec<Result<HoverResult, HoverError>> {
    info!("Surveying {} airframes", airframes.len());
    airframes
        .par_iter()
        .map(|airframe| Hover::new(airframe.clone(), *config)?.compute_hover())
        .collect()
}

/// Solves a standard layout over a range of arm lengths in parallel.
///
/// # Returns
/// One point per arm length in input order, or the first error hit while
/// building or solving.
pub fn sweep_arm_length(
    airframe: StandardAirframe,
    arm_lengths: &[f64],
    config: &HoverSolverConfig,
) -> Result<Vec<SweepPoint>, HoverError> {
    if !airframe.uses_arm_length() {
        return Err(HoverError::InvalidParameter(format!(
            "{} has a fixed geometry",
            airframe
        )));
    }
    arm_lengths
        .par_iter()
        .map(|&arm_length| {
            let spec = airframe.build(arm_length)?;
            let result = Hover::new(spec, *config)?.compute_hover()?;
            Ok(SweepPoint { arm_length, result })
        })
        .collect()
}
