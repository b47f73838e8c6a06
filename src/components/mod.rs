pub mod airframe;
pub mod hover;

pub use airframe::{
    AirframeSpec, ConfigError, MassModel, PropellerSpec, PropellerThrust, RawAirframe,
    RawPropeller, SpinSense, StandardAirframe,
};
pub use hover::{CommandBounds, HoverResult, HoverSolverConfig, HoverStatus};
