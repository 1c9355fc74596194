//! Typed run configuration handed from the CLI layer to the snitch client.
//!
//! # Design
//! - One `RunConfig` value is resolved at startup and passed down explicitly;
//!   nothing below the CLI reads ambient process state.
//! - Optional fields use `Option` so "unspecified" differs from "set to empty".

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snitchit_api_models::{AlertType, Interval, ParseEnumError};
use url::Url;

use crate::defaults::{DEFAULT_API_URL, DEFAULT_PING_URL};
use crate::error::{ConfigError, ConfigResult};

/// Billing tier; gates which alert type and interval combinations are legal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// No smart alerts at all.
    #[default]
    Free,
    /// Smart alerts on monthly snitches only.
    Small,
    /// Smart alerts on monthly snitches only.
    Medium,
    /// Smart alerts on hourly and slower snitches.
    Large,
}

impl Plan {
    /// Every plan.
    pub const ALL: [Self; 4] = [Self::Free, Self::Small, Self::Medium, Self::Large];

    /// Lower-case representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Whether this plan allows `alert` on a snitch with `interval`.
    ///
    /// An unspecified interval only passes for smart alerts on the large plan.
    #[must_use]
    pub const fn permits(self, alert: AlertType, interval: Option<Interval>) -> bool {
        match alert {
            AlertType::Basic => true,
            AlertType::Smart => match (self, interval) {
                (Self::Free, _)
                | (_, Some(Interval::FifteenMinute | Interval::ThirtyMinute)) => false,
                (Self::Large, _) => true,
                (Self::Small | Self::Medium, interval) => {
                    matches!(interval, Some(Interval::Monthly))
                }
            },
        }
    }
}

impl Display for Plan {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str() == lowered)
            .ok_or_else(|| ParseEnumError::new("plan", value))
    }
}

/// Fields the caller wants a snitch to have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredConfig {
    /// Display name.
    pub name: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Expected cadence.
    pub interval: Option<Interval>,
    /// Alerting strategy.
    pub alert_type: Option<AlertType>,
    /// Complete tag set; `Some(vec![])` clears all tags.
    pub tags: Option<Vec<String>>,
}

impl DesiredConfig {
    /// Split a comma-separated tag list, trimming whitespace and dropping empties.
    #[must_use]
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The single operation a run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a heartbeat for the token.
    Ping {
        /// Snitch token.
        token: String,
    },
    /// List every snitch, or fetch one.
    Show {
        /// Token to fetch; `None` lists all.
        token: Option<String>,
    },
    /// Create a snitch from the desired configuration.
    Create,
    /// Reconcile the remote snitch with the desired configuration.
    Update {
        /// Snitch token.
        token: String,
    },
    /// Delete the snitch.
    Delete {
        /// Snitch token.
        token: String,
    },
    /// Pause monitoring of the snitch.
    Pause {
        /// Snitch token.
        token: String,
    },
    /// Resume monitoring by pinging the snitch.
    Unpause {
        /// Snitch token.
        token: String,
    },
    /// Print the resolved configuration.
    DisplayConfig,
}

impl Action {
    /// Short label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ping { .. } => "ping",
            Self::Show { .. } => "show",
            Self::Create => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Pause { .. } => "pause",
            Self::Unpause { .. } => "unpause",
            Self::DisplayConfig => "config",
        }
    }

    /// Whether the action talks to the management API and therefore needs an API key.
    #[must_use]
    pub const fn needs_api_key(&self) -> bool {
        !matches!(
            self,
            Self::Ping { .. } | Self::Unpause { .. } | Self::DisplayConfig
        )
    }
}

/// Action named in text, before a target token is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// See [`Action::Ping`].
    Ping,
    /// See [`Action::Show`].
    Show,
    /// See [`Action::Create`].
    Create,
    /// See [`Action::Update`].
    Update,
    /// See [`Action::Delete`].
    Delete,
    /// See [`Action::Pause`].
    Pause,
    /// See [`Action::Unpause`].
    Unpause,
    /// See [`Action::DisplayConfig`].
    DisplayConfig,
}

impl FromStr for ActionKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ping" | "send" => Ok(Self::Ping),
            "show" | "read" => Ok(Self::Show),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "pause" => Ok(Self::Pause),
            "unpause" => Ok(Self::Unpause),
            "config" | "displayconfig" => Ok(Self::DisplayConfig),
            _ => Err(ConfigError::UnsupportedAction {
                action: value.to_string(),
            }),
        }
    }
}

/// Base URLs of the two service hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Management API base (`/v1/snitches` is appended).
    pub api: Url,
    /// Ping host base (the token is appended).
    pub ping: Url,
}

impl Endpoints {
    /// Parse endpoint overrides, falling back to the public service hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when an override is not an absolute URL.
    pub fn resolve(api: Option<&str>, ping: Option<&str>) -> ConfigResult<Self> {
        Ok(Self {
            api: parse_url("api_url", api.unwrap_or(DEFAULT_API_URL))?,
            ping: parse_url("ping_url", ping.unwrap_or(DEFAULT_PING_URL))?,
        })
    }
}

fn parse_url(field: &'static str, value: &str) -> ConfigResult<Url> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}

/// Everything one invocation needs, resolved once from flags, environment and file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Operation to perform.
    pub action: Action,
    /// Management API key, used as the HTTP Basic username.
    pub api_key: Option<String>,
    /// Ping message.
    pub message: String,
    /// Desired snitch fields for create and update.
    pub desired: DesiredConfig,
    /// Billing plan used for validation.
    pub plan: Plan,
    /// Suppress success output.
    pub silent: bool,
    /// Emit request and diff details.
    pub verbose: bool,
    /// Service hosts.
    pub endpoints: Endpoints,
    /// Config file that contributed values, if one was found.
    pub config_file: Option<PathBuf>,
}

impl RunConfig {
    /// The API key, or a configuration error when the action needs one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when no non-blank key is configured.
    pub fn require_api_key(&self) -> ConfigResult<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingField { field: "api key" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_parses_case_insensitively() {
        assert_eq!("LARGE".parse::<Plan>(), Ok(Plan::Large));
        assert!("enterprise".parse::<Plan>().is_err());
    }

    #[test]
    fn plan_matrix_for_unspecified_interval() {
        assert!(Plan::Large.permits(AlertType::Smart, None));
        assert!(!Plan::Small.permits(AlertType::Smart, None));
        assert!(Plan::Free.permits(AlertType::Basic, None));
    }

    #[test]
    fn parse_tags_drops_blank_entries() {
        assert_eq!(
            DesiredConfig::parse_tags(" ops, db ,,"),
            vec!["ops".to_string(), "db".to_string()]
        );
        assert!(DesiredConfig::parse_tags("").is_empty());
    }

    #[test]
    fn action_kind_rejects_unknown_names() {
        assert_eq!("Pause".parse::<ActionKind>().ok(), Some(ActionKind::Pause));
        assert_eq!("read".parse::<ActionKind>().ok(), Some(ActionKind::Show));
        let err = "explode".parse::<ActionKind>().expect_err("unknown action");
        assert!(matches!(err, ConfigError::UnsupportedAction { action } if action == "explode"));
    }

    #[test]
    fn endpoints_default_to_distinct_hosts() {
        let endpoints = Endpoints::resolve(None, None).expect("defaults parse");
        assert_eq!(endpoints.api.host_str(), Some("api.deadmanssnitch.com"));
        assert_eq!(endpoints.ping.host_str(), Some("nosnch.in"));
    }

    #[test]
    fn endpoints_reject_relative_urls() {
        let err = Endpoints::resolve(Some("not a url"), None).expect_err("invalid URL");
        assert!(matches!(err, ConfigError::InvalidUrl { field: "api_url", .. }));
    }

    #[test]
    fn require_api_key_rejects_blank_keys() {
        let mut config = RunConfig {
            action: Action::Show { token: None },
            api_key: Some("   ".to_string()),
            message: String::new(),
            desired: DesiredConfig::default(),
            plan: Plan::Free,
            silent: false,
            verbose: false,
            endpoints: Endpoints::resolve(None, None).expect("defaults parse"),
            config_file: None,
        };
        assert!(config.require_api_key().is_err());
        config.api_key = Some("key".to_string());
        assert_eq!(config.require_api_key().ok(), Some("key"));
        assert!(config.action.needs_api_key());
    }
}
