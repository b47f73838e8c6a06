use thiserror::Error;

use crate::components::ConfigError;

#[derive(Error, Debug)]
pub enum HoverError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Inertia tensor is singular: {0}")]
    SingularInertia(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Optimizer error: {0}")]
    Optimizer(String),
}

impl From<argmin::core::Error> for HoverError {
    fn from(err: argmin::core::Error) -> Self {
        HoverError::Optimizer(err.to_string())
    }
}
