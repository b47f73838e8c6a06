mod config;
mod state;

pub use config::{CommandBounds, HoverSolverConfig};
pub use state::{HoverResult, HoverStatus};
