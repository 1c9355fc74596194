//! Error taxonomy for calls against the snitch service.

use reqwest::StatusCode;
use snitchit_config::ConfigError;
use thiserror::Error;

/// Failures raised while dispatching an action.
#[derive(Debug, Error)]
pub(crate) enum SnitchError {
    /// Invalid input detected before any request was sent.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// The request never produced an HTTP response (DNS, refused, timeout).
    #[error("request to {operation} failed")]
    Transport {
        /// Action being executed.
        operation: &'static str,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// A base URL cannot carry path segments.
    #[error("endpoint '{url}' cannot be used as a base URL")]
    InvalidEndpoint {
        /// Offending base URL.
        url: String,
    },
    /// No snitch with the requested token exists.
    #[error("snitch '{token}' not found")]
    NotFound {
        /// Requested token.
        token: String,
    },
    /// The service rejected the request with a 4xx status.
    #[error("{operation} rejected with status {status}{}", service_detail(.service_type, .service_message))]
    Client {
        /// Action being executed.
        operation: &'static str,
        /// Response status.
        status: StatusCode,
        /// Service error type, empty when the body did not decode.
        service_type: String,
        /// Service error message, empty when the body did not decode.
        service_message: String,
    },
    /// The service failed with a 5xx (or otherwise unexpected) status.
    #[error("{operation} failed with server status {status}")]
    Server {
        /// Action being executed.
        operation: &'static str,
        /// Response status.
        status: StatusCode,
    },
    /// A request payload could not be serialized.
    #[error("failed to encode {operation} payload")]
    Decode {
        /// Action being executed.
        operation: &'static str,
        /// Serializer error.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for service call results.
pub(crate) type SnitchResult<T> = Result<T, SnitchError>;

fn service_detail(service_type: &str, service_message: &str) -> String {
    match (service_type.is_empty(), service_message.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!(": {service_message}"),
        (false, true) => format!(" ({service_type})"),
        (false, false) => format!(": {service_message} ({service_type})"),
    }
}
