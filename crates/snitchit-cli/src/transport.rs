//! HTTP transport seam.
//!
//! # Design
//! - An [`ActionRequest`] fully describes one call; the transport only adds
//!   the base URL, credentials and timeout.
//! - 4xx/5xx responses are returned as data; only failures to obtain a
//!   response are errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use snitchit_config::{Endpoints, parse_token};
use tracing::debug;
use url::Url;

use crate::error::{SnitchError, SnitchResult};

/// Per-request timeout.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Which of the two service hosts a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServiceHost {
    /// Management API; requests carry Basic auth.
    Api,
    /// Check-in host; requests are unauthenticated.
    Ping,
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RequestBody {
    None,
    Json(Value),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Content type implied by the body kind.
    pub(crate) const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some(CONTENT_TYPE_JSON),
            Self::Form(_) => Some(CONTENT_TYPE_FORM),
        }
    }
}

/// One HTTP call, independent of where the hosts live.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ActionRequest {
    /// Action label used in logs and errors.
    pub(crate) operation: &'static str,
    pub(crate) method: Method,
    pub(crate) host: ServiceHost,
    /// Unencoded path segments appended to the host's base URL.
    pub(crate) segments: Vec<String>,
    pub(crate) body: RequestBody,
}

impl ActionRequest {
    /// Absolute URL for this request; every segment is percent-encoded.
    ///
    /// Blank and dot segments are rejected: the URL serializer would fold
    /// them into the parent path and retarget the request.
    pub(crate) fn url(&self, endpoints: &Endpoints) -> SnitchResult<Url> {
        for segment in &self.segments {
            parse_token(segment)?;
        }
        let mut url = match self.host {
            ServiceHost::Api => endpoints.api.clone(),
            ServiceHost::Ping => endpoints.ping.clone(),
        };
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|()| SnitchError::InvalidEndpoint { url: base })?
            .pop_if_empty()
            .extend(&self.segments);
        Ok(url)
    }
}

/// Status and body exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub(crate) status: StatusCode,
    pub(crate) body: Vec<u8>,
}

/// Executes exactly one HTTP call per request.
#[async_trait]
pub(crate) trait Transport: Send + Sync {
    /// Send `request` and capture the full response.
    async fn execute(&self, request: &ActionRequest) -> SnitchResult<RawResponse>;
}

/// reqwest-backed transport.
pub(crate) struct HttpTransport {
    client: Client,
    endpoints: Endpoints,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Build a transport with the standard timeout.
    pub(crate) fn new(endpoints: Endpoints, api_key: Option<String>) -> SnitchResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("snitchit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SnitchError::Transport {
                operation: "client setup",
                source,
            })?;
        Ok(Self {
            client,
            endpoints,
            api_key,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ActionRequest) -> SnitchResult<RawResponse> {
        let url = request.url(&self.endpoints)?;
        debug!(
            operation = request.operation,
            method = %request.method,
            url = %url,
            content_type = request.body.content_type().unwrap_or("none"),
            "sending request"
        );

        let mut builder = self.client.request(request.method.clone(), url);
        if request.host == ServiceHost::Api
            && let Some(key) = &self.api_key
        {
            builder = builder.basic_auth(key, None::<&str>);
        }
        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        let transport_error = |source| SnitchError::Transport {
            operation: request.operation,
            source,
        };
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();
        debug!(
            operation = request.operation,
            status = status.as_u16(),
            bytes = body.len(),
            "received response"
        );
        Ok(RawResponse { status, body })
    }
}
