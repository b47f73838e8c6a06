pub mod components;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{
    AirframeSpec, CommandBounds, ConfigError, HoverResult, HoverSolverConfig, HoverStatus,
    RawAirframe, StandardAirframe,
};
pub use systems::{survey, sweep_arm_length, EffectivenessMatrices, Hover, HoverMode};
pub use utils::HoverError;
