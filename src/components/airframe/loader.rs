use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::airframe::{
    AirframeSpec, MassModel, PropellerSpec, PropellerThrust, SpinSense,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("\"{field}\" is missing in propeller {index}")]
    MissingField { field: &'static str, index: usize },
    #[error("\"{0}\" is missing in airframe")]
    MissingAirframeField(&'static str),
    #[error(
        "Invalid value \"{token}\" for propeller {index} spinning direction. Use only \"ccw\" or \"cw\""
    )]
    InvalidSpinSense { token: String, index: usize },
    #[error("No propeller data for size {size} inch")]
    UnknownPropellerSize { size: u32 },
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid airframe configuration: {0}")]
    ValidationError(String),
}

/// Loosely typed propeller entry as supplied by a caller.
///
/// Every field is optional so a missing one can be reported by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPropeller {
    /// Location (x, y, z) in the body frame
    pub loc: Option<Vec<f64>>,
    /// Thrust direction (x, y, z) in the body frame
    pub dir: Option<Vec<f64>>,
    /// "ccw" or "cw"
    pub rotation: Option<String>,
    /// Thrust and torque coefficients (k_f, k_m)
    pub constants: Option<Vec<f64>>,
    /// Maximum spin rate (rad/s)
    pub wmax: Option<f64>,
    /// Maximum thrust and torque (N, N·m), replaces `constants` and `wmax`
    pub force: Option<Vec<f64>>,
    /// Nominal size (in), resolved through the propeller library
    pub propsize: Option<u32>,
}

/// Loosely typed airframe as supplied by a caller.
///
/// When `mass` is omitted, mass, center of gravity and inertia are derived
/// from the layout, which then needs `propsize` on every propeller.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAirframe {
    #[serde(default = "default_name")]
    pub name: String,
    pub mass: Option<f64>,
    pub cg: Option<Vec<f64>>,
    pub Ix: Option<f64>,
    pub Iy: Option<f64>,
    pub Iz: Option<f64>,
    #[serde(default)]
    pub Ixy: f64,
    #[serde(default)]
    pub Ixz: f64,
    #[serde(default)]
    pub Iyz: f64,
    #[serde(default)]
    pub props: Vec<RawPropeller>,
}

fn default_name() -> String {
    "custom".to_string()
}

fn vector3(values: &[f64], what: &str, index: usize) -> Result<Vector3<f64>, ConfigError> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(ConfigError::ValidationError(format!(
            "propeller {} {} needs 3 components, got {}",
            index,
            what,
            values.len()
        ))),
    }
}

fn pair(values: &[f64], what: &str, index: usize) -> Result<(f64, f64), ConfigError> {
    match values {
        [a, b] => Ok((*a, *b)),
        _ => Err(ConfigError::ValidationError(format!(
            "propeller {} {} needs 2 values, got {}",
            index,
            what,
            values.len()
        ))),
    }
}

impl RawPropeller {
    /// Checks the entry and converts it into a typed propeller.
    pub fn validate(&self, index: usize) -> Result<PropellerSpec, ConfigError> {
        let missing = |field| ConfigError::MissingField { field, index };

        let loc = self.loc.as_deref().ok_or_else(|| missing("loc"))?;
        let dir = self.dir.as_deref().ok_or_else(|| missing("dir"))?;
        let rotation = self.rotation.as_deref().ok_or_else(|| missing("rotation"))?;

        let thrust = if let Some(force) = self.force.as_deref() {
            let (force, torque) = pair(force, "force", index)?;
            Some(PropellerThrust::MaxForce { force, torque })
        } else if let Some(constants) = self.constants.as_deref() {
            let wmax = self.wmax.ok_or_else(|| missing("wmax"))?;
            let (thrust_coeff, torque_coeff) = pair(constants, "constants", index)?;
            Some(PropellerThrust::Coefficients {
                thrust_coeff,
                torque_coeff,
                max_spin_rate: wmax,
            })
        } else if self.propsize.is_some() {
            None
        } else {
            return Err(missing("constants"));
        };

        let spin: SpinSense = rotation
            .parse()
            .map_err(|token| ConfigError::InvalidSpinSense { token, index })?;

        let location = vector3(loc, "loc", index)?;
        let direction = vector3(dir, "dir", index)?;

        let prop = match (thrust, self.propsize) {
            (Some(thrust), size) => PropellerSpec {
                size,
                ..PropellerSpec::new(location, direction, spin, thrust)
            },
            (None, Some(size)) => PropellerSpec::sized(location, direction, spin, size)?,
            (None, None) => return Err(missing("constants")),
        };
        prop.validate(index)?;
        Ok(prop)
    }
}

impl RawAirframe {
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Checks every propeller in order and stops at the first problem.
    pub fn validate(&self) -> Result<Vec<PropellerSpec>, ConfigError> {
        if self.props.is_empty() {
            return Err(ConfigError::ValidationError(
                "airframe has no propellers".to_string(),
            ));
        }
        self.props
            .iter()
            .enumerate()
            .map(|(index, prop)| prop.validate(index))
            .collect()
    }

    fn mass_model(&self, props: &[PropellerSpec]) -> Result<(MassModel, Vector3<f64>), ConfigError> {
        let Some(mass) = self.mass else {
            if self.Ix.is_some() || self.Iy.is_some() || self.Iz.is_some() {
                return Err(ConfigError::MissingAirframeField("mass"));
            }
            return MassModel::from_layout(props);
        };

        let ixx = self.Ix.ok_or(ConfigError::MissingAirframeField("Ix"))?;
        let iyy = self.Iy.ok_or(ConfigError::MissingAirframeField("Iy"))?;
        let izz = self.Iz.ok_or(ConfigError::MissingAirframeField("Iz"))?;
        let cg = match self.cg.as_deref() {
            None => Vector3::zeros(),
            Some([x, y, z]) => Vector3::new(*x, *y, *z),
            Some(other) => {
                return Err(ConfigError::ValidationError(format!(
                    "cg needs 3 components, got {}",
                    other.len()
                )))
            }
        };
        let model = MassModel::new(mass, ixx, iyy, izz, self.Ixy, self.Ixz, self.Iyz);
        Ok((model, cg))
    }
}

impl TryFrom<RawAirframe> for AirframeSpec {
    type Error = ConfigError;

    fn try_from(raw: RawAirframe) -> Result<Self, Self::Error> {
        let props = raw.validate()?;
        let (mass, cg) = raw.mass_model(&props)?;
        AirframeSpec::new(raw.name, mass, cg, props)
    }
}
