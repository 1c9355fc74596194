//! Validation rules for alert types, intervals and plan combinations.
//!
//! The boolean predicates are pure and total; the `parse_*`/`ensure_*`
//! helpers wrap them into [`ConfigError`]s for callers that must stop before
//! any request is issued.

use snitchit_api_models::{AlertType, Interval};

use crate::error::{ConfigError, ConfigResult};
use crate::model::Plan;

const ALERT_TYPE_CHOICES: &str = "choose either \"basic\" or \"smart\"";
const INTERVAL_CHOICES: &str =
    "choose either \"15_minute\", \"30_minute\", \"hourly\", \"daily\", \"weekly\", or \"monthly\"";
const PLAN_CHOICES: &str = "choose either \"free\", \"small\", \"medium\" or \"large\"";
const TOKEN_RULE: &str = "a token cannot be \".\" or \"..\"";

/// `true` iff `value` names an alert type, ignoring case.
#[must_use]
pub fn validate_alert_type(value: &str) -> bool {
    value.parse::<AlertType>().is_ok()
}

/// `true` iff `value` names an interval, ignoring case.
#[must_use]
pub fn validate_interval(value: &str) -> bool {
    value.parse::<Interval>().is_ok()
}

/// `true` iff `plan` allows `alert_type` on a snitch with `interval`.
///
/// Basic alerts pass regardless of the other two values. For smart alerts an
/// unknown plan or a non-blank unknown interval fails; a blank interval counts
/// as unspecified.
#[must_use]
pub fn validate_plan_combination(plan: &str, alert_type: &str, interval: &str) -> bool {
    let Ok(alert) = alert_type.parse::<AlertType>() else {
        return false;
    };
    if alert == AlertType::Basic {
        return true;
    }
    let Ok(plan) = plan.parse::<Plan>() else {
        return false;
    };
    let interval = if interval.trim().is_empty() {
        None
    } else {
        match interval.parse::<Interval>() {
            Ok(interval) => Some(interval),
            Err(_) => return false,
        }
    };
    plan.permits(alert, interval)
}

/// Parse an alert type, mapping failure to a configuration error.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for values outside `basic|smart`.
pub fn parse_alert_type(value: &str) -> ConfigResult<AlertType> {
    value.parse().map_err(|_| ConfigError::InvalidField {
        field: "alert type",
        value: value.to_ascii_lowercase(),
        reason: ALERT_TYPE_CHOICES,
    })
}

/// Parse an interval, mapping failure to a configuration error.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for values outside the interval set.
pub fn parse_interval(value: &str) -> ConfigResult<Interval> {
    value.parse().map_err(|_| ConfigError::InvalidField {
        field: "interval",
        value: value.to_ascii_lowercase(),
        reason: INTERVAL_CHOICES,
    })
}

/// Parse a plan, mapping failure to a configuration error.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for values outside the plan set.
pub fn parse_plan(value: &str) -> ConfigResult<Plan> {
    value.parse().map_err(|_| ConfigError::InvalidField {
        field: "plan",
        value: value.to_ascii_lowercase(),
        reason: PLAN_CHOICES,
    })
}

/// Check that `value` can stand as its own URL path segment.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] for a blank token and
/// [`ConfigError::InvalidField`] for the dot segments `.` and `..`, which URL
/// normalisation would otherwise fold into the parent path.
pub fn parse_token(value: &str) -> ConfigResult<&str> {
    match value.trim() {
        "" => Err(ConfigError::MissingField { field: "token" }),
        "." | ".." => Err(ConfigError::InvalidField {
            field: "token",
            value: value.to_string(),
            reason: TOKEN_RULE,
        }),
        token => Ok(token),
    }
}

/// Fail unless `plan` allows `alert` with `interval`.
///
/// # Errors
///
/// Returns [`ConfigError::PlanCombination`] when the plan matrix rejects the triple.
pub fn ensure_plan_permits(
    plan: Plan,
    alert: AlertType,
    interval: Option<Interval>,
) -> ConfigResult<()> {
    if plan.permits(alert, interval) {
        Ok(())
    } else {
        Err(ConfigError::PlanCombination {
            plan: plan.to_string(),
            interval: interval.map_or_else(|| "unspecified".to_string(), |i| i.to_string()),
        })
    }
}
