//! Error types for configuration resolution and validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problems; all of them are detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was blank or absent.
    #[error("{field} cannot be blank")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A field held a value outside its allowed set.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Human-readable description of the accepted values.
        reason: &'static str,
    },
    /// The plan does not allow the requested alert type and interval.
    #[error(
        "smart alerts on plan '{plan}' are not available for interval '{interval}': basic alerts are available for any snitch, smart alerts for hourly, daily, weekly and monthly snitches on the large plan and for monthly snitches on the small and medium plans"
    )]
    PlanCombination {
        /// Plan the combination was checked against.
        plan: String,
        /// Interval that was rejected, or `unspecified`.
        interval: String,
    },
    /// A textual action name did not map to a known action.
    #[error("unsupported action '{action}'")]
    UnsupportedAction {
        /// The rejected action name.
        action: String,
    },
    /// A configured endpoint was not a valid absolute URL.
    #[error("invalid URL for {field} '{value}'")]
    InvalidUrl {
        /// Field holding the URL.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Parser error detail.
        source: url::ParseError,
    },
    /// Reading the config file failed.
    #[error("failed to read config file {}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The config file was not valid YAML for the expected shape.
    #[error("failed to parse config file {}", path.display())]
    Yaml {
        /// File that failed to parse.
        path: PathBuf,
        /// Source YAML error.
        source: serde_yaml::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
