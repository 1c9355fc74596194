//! Classification of raw responses into typed outcomes.

use reqwest::StatusCode;
use serde_json::Value;
use snitchit_api_models::ServiceError;

use crate::error::{SnitchError, SnitchResult};
use crate::transport::RawResponse;

/// Result of one call as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    /// 2xx; `body` holds the decoded JSON when there was any.
    Success {
        status: StatusCode,
        body: Option<Value>,
    },
    /// 4xx with whatever the error envelope carried.
    ClientError {
        status: StatusCode,
        service_type: String,
        service_message: String,
    },
    /// 5xx or any other status outside 2xx/4xx.
    ServerError { status: StatusCode },
}

impl Outcome {
    /// Classify a raw response. Never fails: undecodable bodies degrade to
    /// `None` or empty strings.
    pub(crate) fn classify(response: &RawResponse) -> Self {
        let status = response.status;
        if status.is_success() {
            let body = if response.body.iter().all(u8::is_ascii_whitespace) {
                None
            } else {
                serde_json::from_slice(&response.body).ok()
            };
            Self::Success { status, body }
        } else if status.is_client_error() {
            let envelope = serde_json::from_slice::<ServiceError>(&response.body).unwrap_or_default();
            Self::ClientError {
                status,
                service_type: envelope.kind,
                service_message: envelope.error,
            }
        } else {
            Self::ServerError { status }
        }
    }

    pub(crate) const fn status(&self) -> StatusCode {
        match self {
            Self::Success { status, .. }
            | Self::ClientError { status, .. }
            | Self::ServerError { status } => *status,
        }
    }

    /// Success body, or the matching [`SnitchError`] for `operation`.
    pub(crate) fn into_result(self, operation: &'static str) -> SnitchResult<Option<Value>> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::ClientError {
                status,
                service_type,
                service_message,
            } => Err(SnitchError::Client {
                operation,
                status,
                service_type,
                service_message,
            }),
            Self::ServerError { status } => Err(SnitchError::Server { operation, status }),
        }
    }
}
