mod frame;
mod loader;
mod mass;
mod propeller;
mod standard;

pub use frame::AirframeSpec;
pub use loader::{ConfigError, RawAirframe, RawPropeller};
pub use mass::MassModel;
pub use propeller::{PropellerSpec, PropellerThrust, SpinSense};
pub use standard::StandardAirframe;
