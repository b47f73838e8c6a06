pub const GRAVITY: f64 = 9.81; // m/s^2

// Command bounds as fractions of the maximum spin rate
pub const DEFAULT_COMMAND_MIN: f64 = 0.02; // idle
pub const DEFAULT_COMMAND_MAX: f64 = 1.0; // saturation

// Standard airframe physical model
pub const CONTROLLER_MASS: f64 = 0.177; // kg, flight controller with a 4S 1600 mAh pack
pub const CONTROLLER_DIMENSIONS: [f64; 3] = [0.090, 0.035, 0.025]; // m, x/y/z box
pub const BEAM_LINEAR_DENSITY: f64 = 1650.0 * 0.005 * 0.01; // kg/m, 5 mm x 10 mm carbon plate

// Below this a thrust axis is treated as zero length
pub const MIN_DIRECTION_NORM: f64 = 1e-12;
