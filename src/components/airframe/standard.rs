use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::components::airframe::{
    AirframeSpec, ConfigError, MassModel, PropellerSpec, PropellerThrust, SpinSense,
};
use crate::utils::ring_location;

/// The named airframes the solver ships with.
///
/// Ring layouts (quad, tri, hexa, octa) derive their mass model from the arm
/// length. The remaining bodies are research layouts with unit mass and inertia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardAirframe {
    Quadcopter,
    Tricopter,
    Hexacopter,
    Octacopter,
    Biquadcopter,
    Countercopter,
    Monocopter,
    Dualquad,
}

/// Ring layout: propeller count, angle of the first arm, nominal propeller size.
struct Ring {
    count: usize,
    phase: f64,
    size: u32,
}

enum Layout {
    Ring(Ring),
    Fixed(fn(f64) -> Result<Vec<PropellerSpec>, ConfigError>),
}

impl StandardAirframe {
    pub const ALL: [StandardAirframe; 8] = [
        StandardAirframe::Quadcopter,
        StandardAirframe::Tricopter,
        StandardAirframe::Hexacopter,
        StandardAirframe::Octacopter,
        StandardAirframe::Biquadcopter,
        StandardAirframe::Countercopter,
        StandardAirframe::Monocopter,
        StandardAirframe::Dualquad,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StandardAirframe::Quadcopter => "quadcopter",
            StandardAirframe::Tricopter => "tricopter",
            StandardAirframe::Hexacopter => "hexacopter",
            StandardAirframe::Octacopter => "octacopter",
            StandardAirframe::Biquadcopter => "biquadcopter",
            StandardAirframe::Countercopter => "countercopter",
            StandardAirframe::Monocopter => "monocopter",
            StandardAirframe::Dualquad => "dualquad",
        }
    }

    /// Arm length (m) used when the caller does not give one.
    pub fn default_arm_length(&self) -> f64 {
        match self {
            StandardAirframe::Quadcopter => 0.09,
            StandardAirframe::Tricopter
            | StandardAirframe::Hexacopter
            | StandardAirframe::Octacopter => 0.1,
            _ => 1.0,
        }
    }

    /// Whether `build` reads its arm length argument.
    pub fn uses_arm_length(&self) -> bool {
        !matches!(
            self,
            StandardAirframe::Countercopter
                | StandardAirframe::Monocopter
                | StandardAirframe::Dualquad
        )
    }

    fn layout(&self) -> Layout {
        let ring = |count, phase, size| Layout::Ring(Ring { count, phase, size });
        match self {
            StandardAirframe::Quadcopter => ring(4, PI / 4.0, 5),
            StandardAirframe::Tricopter => ring(3, 0.0, 4),
            StandardAirframe::Hexacopter => ring(6, 0.0, 4),
            StandardAirframe::Octacopter => ring(8, 0.0, 4),
            StandardAirframe::Biquadcopter => Layout::Fixed(biquad_propellers),
            StandardAirframe::Countercopter => Layout::Fixed(counter_propellers),
            StandardAirframe::Monocopter => Layout::Fixed(mono_propellers),
            StandardAirframe::Dualquad => Layout::Fixed(dualquad_propellers),
        }
    }

    /// Builds the airframe.
    ///
    /// # Arguments
    /// * `arm_length` - Distance from the body origin to each propeller (m), ignored
    ///                  by the fixed-geometry bodies.
    pub fn build(&self, arm_length: f64) -> Result<AirframeSpec, ConfigError> {
        if self.uses_arm_length() && !(arm_length.is_finite() && arm_length > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "arm length must be positive, got {}",
                arm_length
            )));
        }

        match self.layout() {
            Layout::Ring(ring) => {
                let props = ring_propellers(&ring, arm_length)?;
                let (mass, cg) = MassModel::from_layout(&props)?;
                AirframeSpec::new(self.name(), mass, cg, props)
            }
            Layout::Fixed(layout) => AirframeSpec::new(
                self.name(),
                MassModel::unit(),
                Vector3::zeros(),
                layout(arm_length)?,
            ),
        }
    }
}

fn alternating_spin(index: usize) -> SpinSense {
    if index % 2 == 0 {
        SpinSense::Ccw
    } else {
        SpinSense::Cw
    }
}

fn ring_propellers(ring: &Ring, arm_length: f64) -> Result<Vec<PropellerSpec>, ConfigError> {
    (0..ring.count)
        .map(|i| {
            let angle = ring.phase + 2.0 * PI * i as f64 / ring.count as f64;
            PropellerSpec::sized(
                ring_location(arm_length, angle),
                -Vector3::z(),
                alternating_spin(i),
                ring.size,
            )
        })
        .collect()
}

/// Six arms at 60° spacing, two lifting rotors and four rotors thrusting sideways.
fn biquad_propellers(arm_length: f64) -> Result<Vec<PropellerSpec>, ConfigError> {
    let layout = [
        (-Vector3::z(), SpinSense::Ccw),
        (Vector3::y(), SpinSense::Cw),
        (Vector3::y(), SpinSense::Ccw),
        (-Vector3::z(), SpinSense::Cw),
        (Vector3::y(), SpinSense::Cw),
        (Vector3::y(), SpinSense::Ccw),
    ];
    layout
        .iter()
        .enumerate()
        .map(|(i, (direction, spin))| {
            let angle = PI / 3.0 * i as f64;
            PropellerSpec::sized(ring_location(arm_length, angle), *direction, *spin, 4)
        })
        .collect()
}

/// Four small lifting rotors under four large rotors pushing the other way.
fn dualquad_propellers(_arm_length: f64) -> Result<Vec<PropellerSpec>, ConfigError> {
    let corners = [
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(-1.0, 1.0, 0.0),
        Vector3::new(-1.0, -1.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0),
    ];
    let lower = corners
        .iter()
        .enumerate()
        .map(|(i, loc)| PropellerSpec::sized(*loc, -Vector3::z(), alternating_spin(i), 4));
    let upper = corners
        .iter()
        .enumerate()
        .map(|(i, loc)| PropellerSpec::sized(*loc, Vector3::z(), alternating_spin(i), 8));
    lower.chain(upper).collect()
}

/// Coaxial pair thrusting in opposite directions, both spinning the same way.
fn counter_propellers(_arm_length: f64) -> Result<Vec<PropellerSpec>, ConfigError> {
    Ok(vec![
        research_propeller(Vector3::z(), Vector3::z(), SpinSense::Ccw),
        research_propeller(-Vector3::z(), -Vector3::z(), SpinSense::Ccw),
    ])
}

fn mono_propellers(_arm_length: f64) -> Result<Vec<PropellerSpec>, ConfigError> {
    Ok(vec![research_propeller(
        Vector3::z(),
        Vector3::z(),
        SpinSense::Ccw,
    )])
}

fn research_propeller(
    location: Vector3<f64>,
    direction: Vector3<f64>,
    spin: SpinSense,
) -> PropellerSpec {
    PropellerSpec::new(
        location,
        direction,
        spin,
        PropellerThrust::MaxForce {
            force: 10.0,
            torque: 1.0,
        },
    )
}

impl FromStr for StandardAirframe {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        let found = match lowered.as_str() {
            "quad" | "quadcopter" => StandardAirframe::Quadcopter,
            "tri" | "tricopter" => StandardAirframe::Tricopter,
            "hexa" | "hex" | "hexacopter" => StandardAirframe::Hexacopter,
            "octa" | "oct" | "octacopter" => StandardAirframe::Octacopter,
            "biquad" | "biquadcopter" => StandardAirframe::Biquadcopter,
            "counter" | "countercopter" => StandardAirframe::Countercopter,
            "mono" | "monocopter" => StandardAirframe::Monocopter,
            "dualquad" => StandardAirframe::Dualquad,
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown airframe \"{}\"",
                    s
                )))
            }
        };
        Ok(found)
    }
}

impl fmt::Display for StandardAirframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
