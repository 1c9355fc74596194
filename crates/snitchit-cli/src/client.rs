//! Shared client context and the CLI error type.

use std::fmt::{self, Display, Formatter};

use snitchit_config::{ConfigError, RunConfig};

use crate::cli::OutputFormat;
use crate::error::SnitchError;
use crate::service::SnitchClient;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<SnitchError> for CliError {
    fn from(err: SnitchError) -> Self {
        match err {
            SnitchError::Configuration(err) => err.into(),
            other => Self::failure(other),
        }
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext<T> {
    pub(crate) client: SnitchClient<T>,
    pub(crate) config: RunConfig,
    pub(crate) output: OutputFormat,
}

impl<T> AppContext<T> {
    /// Print a one-line success message unless the run is silent.
    pub(crate) fn notify(&self, message: impl Display) {
        if !self.config.silent {
            println!("{message}");
        }
    }
}
