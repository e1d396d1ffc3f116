//! Error types for the host-facing surfaces.
//!
//! Generation itself never fails; only parsing and writing parameters can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("parameter preset error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("unknown growth parameter '{0}'")]
    UnknownParameter(String),

    #[error("invalid value {value} for growth parameter '{name}'")]
    InvalidValue { name: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, TreeError>;
