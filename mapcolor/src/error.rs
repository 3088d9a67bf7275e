//! Error types for the fallible edges of the crate (ingestion, config, palettes).
//!
//! The coloring algorithms themselves never fail; they degrade instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A palette entry is not a `#rgb`, `#rrggbb` or `#rrggbbaa` string.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Input JSON does not have the expected feature shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{what} limit exceeded: {got} > {max}")]
    LimitExceeded {
        what: &'static str,
        max: usize,
        got: usize,
    },

    /// Two distinct input regions resolved to the same id.
    #[error("duplicate region id '{id}' at positions {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable code, used by the wasm result envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidColor(_) | Error::InvalidPalette(_) => "invalid_palette",
            Error::InvalidConfig(_) => "invalid_config",
            Error::InvalidInput(_) | Error::Json(_) => "invalid_input",
            Error::LimitExceeded { .. } => "limit_exceeded",
            Error::DuplicateId { .. } => "duplicate_id",
        }
    }
}
