//! Error types for airframe generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while normalizing parameters or building geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A scalar input is non-numeric or outside its domain.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Field name as it appears in the parameter file.
        name: &'static str,
        /// The offending value, rendered for display.
        value: String,
    },

    /// The derived body length is negative (nose longer than the airframe).
    #[error("invalid geometry: body length {body_length:.2} is negative")]
    InvalidGeometry {
        /// The derived `length - nose_length`.
        body_length: f64,
    },

    /// An outline collapsed or self-intersects.
    #[error("degenerate outline: {0}")]
    DegenerateOutline(String),
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors from loading the parameter file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the expected layout.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors at the aerodynamic prediction boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// A request field is not a finite number.
    #[error("request field `{0}` is not a number")]
    InvalidInput(&'static str),

    /// The service answered with an error message.
    #[error("prediction service error: {0}")]
    Service(String),

    /// A successful response lacked a coefficient.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}
