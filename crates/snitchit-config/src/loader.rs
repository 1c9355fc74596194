//! YAML config-file discovery and decoding.
//!
//! # Design
//! - A missing file is normal (first run, flags-only usage) and yields `None`.
//! - A present but unreadable or malformed file is a hard configuration error.
//! - Values are kept raw here; parsing into typed values happens during
//!   resolution so flag and file values share one validation path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::DesiredConfig;

/// Settings recognised in `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Management API key.
    pub apikey: Option<String>,
    /// Token used by `ping`/`show` when no `--snitch` is given.
    pub defaultsnitch: Option<String>,
    /// Billing plan.
    pub plan: Option<String>,
    /// Default alert type for `create`.
    pub alert: Option<String>,
    /// Default interval for `create`.
    pub interval: Option<String>,
    /// Default notes for `create`.
    pub notes: Option<String>,
    /// Default tags for `create`.
    pub tags: Option<TagList>,
    /// Default ping message.
    pub message: Option<String>,
    /// Suppress success output.
    pub silent: Option<bool>,
    /// Emit request and diff details.
    pub verbose: Option<bool>,
    /// Management API base URL override.
    pub api_url: Option<String>,
    /// Ping host base URL override.
    pub ping_url: Option<String>,
    /// Action run when no subcommand is given.
    pub action: Option<String>,
}

/// Tags written either as `"a,b"` or as a YAML sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagList {
    /// Comma-separated form.
    Joined(String),
    /// Sequence form.
    List(Vec<String>),
}

impl TagList {
    /// Normalised tag list with blanks removed.
    #[must_use]
    pub fn into_tags(self) -> Vec<String> {
        match self {
            Self::Joined(raw) => DesiredConfig::parse_tags(&raw),
            Self::List(tags) => tags
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

/// Path of the config file named `file` inside `dir`.
///
/// A name without an extension gets `.yaml` appended.
#[must_use]
pub fn config_file_path(dir: &Path, file: &Path) -> PathBuf {
    let mut path = dir.join(file);
    if path.extension().is_none() {
        path.set_extension("yaml");
    }
    path
}

/// Load and decode the config file at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file exists but cannot be read and
/// [`ConfigError::Yaml`] when its content does not decode.
pub fn load_file_config(path: &Path) -> ConfigResult<Option<FileConfig>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        debug!(path = %path.display(), "config file is empty");
        return Ok(Some(FileConfig::default()));
    }

    let config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "config file loaded");
    Ok(Some(config))
}
