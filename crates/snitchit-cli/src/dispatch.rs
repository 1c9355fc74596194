//! The action table: one function per action, each producing the single
//! [`ActionRequest`] that carries it out.

use reqwest::Method;
use serde::Serialize;
use snitchit_api_models::{AlertType, SnitchCreateRequest, SnitchPatch};
use snitchit_config::defaults::UNPAUSE_MESSAGE_PREFIX;
use snitchit_config::{ConfigError, DesiredConfig, Plan, ensure_plan_permits};

use crate::error::{SnitchError, SnitchResult};
use crate::transport::{ActionRequest, RequestBody, ServiceHost};

const API_VERSION: &str = "v1";
const COLLECTION: &str = "snitches";
const PING_MESSAGE_FIELD: &str = "m";

fn snitch_segments(token: Option<&str>, suffix: Option<&str>) -> Vec<String> {
    [Some(API_VERSION), Some(COLLECTION), token, suffix]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

fn json_body<T: Serialize>(operation: &'static str, payload: &T) -> SnitchResult<RequestBody> {
    serde_json::to_value(payload)
        .map(RequestBody::Json)
        .map_err(|source| SnitchError::Decode { operation, source })
}

/// `POST <ping-host>/<token>` with form field `m`.
pub(crate) fn ping(token: &str, message: &str) -> ActionRequest {
    ActionRequest {
        operation: "ping",
        method: Method::POST,
        host: ServiceHost::Ping,
        segments: vec![token.to_string()],
        body: RequestBody::Form(vec![(
            PING_MESSAGE_FIELD.to_string(),
            message.to_string(),
        )]),
    }
}

/// A ping whose message records that the snitch is being resumed.
pub(crate) fn unpause(token: &str, message: &str) -> ActionRequest {
    let mut request = ping(token, &format!("{UNPAUSE_MESSAGE_PREFIX}{message}"));
    request.operation = "unpause";
    request
}

/// `GET /v1/snitches` or `GET /v1/snitches/<token>`.
pub(crate) fn read(token: Option<&str>) -> ActionRequest {
    ActionRequest {
        operation: "read",
        method: Method::GET,
        host: ServiceHost::Api,
        segments: snitch_segments(token, None),
        body: RequestBody::None,
    }
}

/// `POST /v1/snitches` with every create field.
///
/// # Errors
///
/// Fails without touching the network when the name or interval is blank or
/// the plan does not allow the alert type and interval.
pub(crate) fn create(desired: &DesiredConfig, plan: Plan) -> SnitchResult<ActionRequest> {
    let name = desired
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ConfigError::MissingField { field: "name" })?;
    let interval = desired
        .interval
        .ok_or(ConfigError::MissingField { field: "interval" })?;
    let alert_type = desired.alert_type.unwrap_or(AlertType::Basic);
    ensure_plan_permits(plan, alert_type, Some(interval))?;

    let payload = SnitchCreateRequest {
        name: name.to_string(),
        alert_type,
        interval,
        notes: desired.notes.clone().unwrap_or_default(),
        tags: desired.tags.clone().unwrap_or_default(),
    };
    Ok(ActionRequest {
        operation: "create",
        method: Method::POST,
        host: ServiceHost::Api,
        segments: snitch_segments(None, None),
        body: json_body("create", &payload)?,
    })
}

/// `PATCH /v1/snitches/<token>` carrying only the staged fields.
pub(crate) fn update(token: &str, patch: &SnitchPatch) -> SnitchResult<ActionRequest> {
    Ok(ActionRequest {
        operation: "update",
        method: Method::PATCH,
        host: ServiceHost::Api,
        segments: snitch_segments(Some(token), None),
        body: json_body("update", patch)?,
    })
}

/// `DELETE /v1/snitches/<token>`.
pub(crate) fn delete(token: &str) -> ActionRequest {
    ActionRequest {
        operation: "delete",
        method: Method::DELETE,
        host: ServiceHost::Api,
        segments: snitch_segments(Some(token), None),
        body: RequestBody::None,
    }
}

/// `POST /v1/snitches/<token>/pause` with no body.
pub(crate) fn pause(token: &str) -> ActionRequest {
    ActionRequest {
        operation: "pause",
        method: Method::POST,
        host: ServiceHost::Api,
        segments: snitch_segments(Some(token), Some("pause")),
        body: RequestBody::None,
    }
}
