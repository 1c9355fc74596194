#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub, unused)]
//! Wire DTOs for the Dead Man's Snitch management and ping APIs.
//!
//! Field names are wire-exact. The service owns these records; the CLI only
//! ever holds a transient snapshot per invocation, so every type here is a
//! plain value with no behaviour beyond parsing and comparison helpers.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Expected heartbeat cadence of a snitch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Interval {
    /// Every fifteen minutes.
    #[serde(rename = "15_minute")]
    FifteenMinute,
    /// Every thirty minutes.
    #[serde(rename = "30_minute")]
    ThirtyMinute,
    /// Once per hour.
    #[serde(rename = "hourly")]
    Hourly,
    /// Once per day.
    #[serde(rename = "daily")]
    Daily,
    /// Once per week.
    #[serde(rename = "weekly")]
    Weekly,
    /// Once per month.
    #[serde(rename = "monthly")]
    Monthly,
}

impl Interval {
    /// Every interval, in ascending cadence order.
    pub const ALL: [Self; 6] = [
        Self::FifteenMinute,
        Self::ThirtyMinute,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
    ];

    /// Lower-case wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FifteenMinute => "15_minute",
            Self::ThirtyMinute => "30_minute",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl Display for Interval {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == lowered)
            .ok_or_else(|| ParseEnumError::new("interval", value))
    }
}

/// Alerting strategy applied when a snitch misses a check-in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Alert as soon as a check-in is missed.
    #[default]
    Basic,
    /// Anomaly-aware alerting; gated by plan and interval.
    Smart,
}

impl AlertType {
    /// Every alert type.
    pub const ALL: [Self; 2] = [Self::Basic, Self::Smart];

    /// Lower-case wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Smart => "smart",
        }
    }
}

impl Display for AlertType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|alert| alert.as_str() == lowered)
            .ok_or_else(|| ParseEnumError::new("alert type", value))
    }
}

/// Raised when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// Human-readable name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    /// Build an error for `kind` rejecting `value`.
    #[must_use]
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl Display for ParseEnumError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "invalid {} '{}'", self.kind, self.value)
    }
}

impl Error for ParseEnumError {}

/// A monitored heartbeat check as returned by `GET /v1/snitches[/{token}]`.
///
/// `interval`, `alert_type` and `status` stay as strings: the service is the
/// authority on their vocabulary and an unfamiliar value must not make the
/// whole record undecodable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snitch {
    /// Opaque primary key.
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
    /// Canonical API location of the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-form labels; order is preserved for display only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Free-form notes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    /// Service-defined health status (`healthy`, `failing`, `paused`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Time of the most recent check-in, absent before the first one.
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Expected cadence, as reported by the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub interval: String,
    /// Alert type, as reported by the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert_type: String,
}

impl Snitch {
    /// Parsed interval when the service reported a known value.
    #[must_use]
    pub fn interval_kind(&self) -> Option<Interval> {
        self.interval.parse().ok()
    }

    /// Parsed alert type when the service reported a known value.
    #[must_use]
    pub fn alert_kind(&self) -> Option<AlertType> {
        self.alert_type.parse().ok()
    }
}

/// Payload for `POST /v1/snitches`. Every field is always serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnitchCreateRequest {
    /// Display name; must not be blank.
    pub name: String,
    /// Alerting strategy.
    pub alert_type: AlertType,
    /// Expected cadence.
    pub interval: Interval,
    /// Free-form notes.
    pub notes: String,
    /// Labels attached to the snitch.
    pub tags: Vec<String>,
}

/// Payload for `PATCH /v1/snitches/{token}`.
///
/// Only fields that differ from the remote record are present; the service
/// treats an absent field as "no change".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnitchPatch {
    /// Replacement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement alert type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<AlertType>,
    /// Replacement interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    /// Replacement notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Replacement tag set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SnitchPatch {
    /// `true` when no field is staged.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.alert_type.is_none()
            && self.interval.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
    }
}

/// Error envelope returned by the management API on 4xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceError {
    /// Machine-readable error type.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Human-readable error message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interval_parses_case_insensitively() {
        assert_eq!("HOURLY".parse::<Interval>(), Ok(Interval::Hourly));
        assert_eq!("15_Minute".parse::<Interval>(), Ok(Interval::FifteenMinute));
        let err = "fortnightly"
            .parse::<Interval>()
            .expect_err("unknown interval should fail");
        assert_eq!(err.to_string(), "invalid interval 'fortnightly'");
    }

    #[test]
    fn alert_type_round_trips_through_display() {
        for alert in AlertType::ALL {
            assert_eq!(alert.to_string().parse::<AlertType>(), Ok(alert));
        }
        assert!("clever".parse::<AlertType>().is_err());
    }

    #[test]
    fn snitch_decodes_service_payload() {
        let snitch: Snitch = serde_json::from_value(json!({
            "token": "c2354d53d2",
            "href": "/v1/snitches/c2354d53d2",
            "name": "Critical System Reports",
            "tags": ["critical", "reports"],
            "notes": null,
            "status": "healthy",
            "checked_in_at": "2014-01-01T12:00:00.000Z",
            "created_at": "2014-01-01T08:00:00.000Z",
            "interval": "daily",
            "alert_type": "basic"
        }))
        .expect("payload should decode");

        assert_eq!(snitch.token, "c2354d53d2");
        assert_eq!(snitch.notes, "");
        assert_eq!(snitch.tags, vec!["critical", "reports"]);
        assert_eq!(snitch.interval_kind(), Some(Interval::Daily));
        assert_eq!(snitch.alert_kind(), Some(AlertType::Basic));
        assert!(snitch.checked_in_at.is_some());
    }

    #[test]
    fn snitch_tolerates_missing_timestamps_and_unknown_interval() {
        let snitch: Snitch = serde_json::from_value(json!({
            "token": "abc",
            "status": "pending",
            "interval": "quarterly",
            "checked_in_at": null
        }))
        .expect("payload should decode");

        assert!(snitch.checked_in_at.is_none());
        assert!(snitch.created_at.is_none());
        assert_eq!(snitch.interval_kind(), None);
    }

    #[test]
    fn create_payload_reads_back_as_snitch() {
        let request = SnitchCreateRequest {
            name: "nightly-backup".to_string(),
            alert_type: AlertType::Smart,
            interval: Interval::Monthly,
            notes: "rotate keys".to_string(),
            tags: vec!["ops".to_string(), "db".to_string()],
        };

        let encoded = serde_json::to_string(&request).expect("encode");
        let snitch: Snitch = serde_json::from_str(&encoded).expect("decode");

        assert_eq!(snitch.name, request.name);
        assert_eq!(snitch.interval_kind(), Some(request.interval));
        assert_eq!(snitch.alert_kind(), Some(request.alert_type));
        assert_eq!(snitch.tags, request.tags);
        assert!(snitch.token.is_empty());
        assert!(snitch.status.is_empty());
    }

    #[test]
    fn patch_omits_unstaged_fields() {
        let patch = SnitchPatch {
            name: Some("renamed".to_string()),
            ..SnitchPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).expect("encode"),
            json!({"name": "renamed"})
        );
        assert!(!patch.is_empty());
        assert!(SnitchPatch::default().is_empty());
    }

    #[test]
    fn service_error_defaults_missing_fields() {
        let envelope: ServiceError =
            serde_json::from_value(json!({"type": "resource_not_found"})).expect("decode");
        assert_eq!(envelope.kind, "resource_not_found");
        assert_eq!(envelope.error, "");
    }
}
