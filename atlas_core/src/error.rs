//! Error types for the atlas engine.

use thiserror::Error;

/// Result type for fallible engine setup.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures loading or validating a `LayoutConfig`.
///
/// Filtering and simulation themselves never fail; degenerate inputs yield
/// empty selections or clamped coordinates instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A parameter is outside its accepted range.
    #[error("invalid layout parameter `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
