//! Snitch lifecycle operations over a [`Transport`].

use serde::Deserialize;
use serde_json::Value;
use snitchit_api_models::{Snitch, SnitchPatch};
use snitchit_config::{DesiredConfig, Plan};
use tracing::{debug, info, warn};

use crate::dispatch;
use crate::error::{SnitchError, SnitchResult};
use crate::outcome::Outcome;
use crate::reconcile::{compute_patch, validate_patch};
use crate::transport::{ActionRequest, Transport};

/// What an update sent and how the service answered.
#[derive(Debug, Clone)]
pub(crate) struct UpdateReport {
    pub(crate) patch: SnitchPatch,
    pub(crate) outcome: Outcome,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReadBody {
    Many(Vec<Snitch>),
    One(Box<Snitch>),
}

/// Client for one service account.
pub(crate) struct SnitchClient<T> {
    transport: T,
}

impl<T: Transport> SnitchClient<T> {
    pub(crate) const fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub(crate) const fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(&self, request: ActionRequest) -> SnitchResult<Outcome> {
        let response = self.transport.execute(&request).await?;
        let outcome = Outcome::classify(&response);
        debug!(
            operation = request.operation,
            status = outcome.status().as_u16(),
            "request classified"
        );
        Ok(outcome)
    }

    pub(crate) async fn ping(&self, token: &str, message: &str) -> SnitchResult<Outcome> {
        self.execute(dispatch::ping(token, message)).await
    }

    pub(crate) async fn unpause(&self, token: &str, message: &str) -> SnitchResult<Outcome> {
        self.execute(dispatch::unpause(token, message)).await
    }

    /// Fetch every snitch, or the one named by `token`.
    ///
    /// A 2xx body that does not decode is logged and treated as no records;
    /// so are decoded records without a token.
    /// A 404 on a single-token lookup is reported as [`SnitchError::NotFound`].
    pub(crate) async fn read(&self, token: Option<&str>) -> SnitchResult<Vec<Snitch>> {
        let outcome = self.execute(dispatch::read(token)).await?;
        if let (Some(token), Outcome::ClientError { status, .. }) = (token, &outcome)
            && *status == reqwest::StatusCode::NOT_FOUND
        {
            return Err(SnitchError::NotFound {
                token: token.to_string(),
            });
        }
        let body = outcome.into_result("read")?;
        Ok(decode_snitches("read", body))
    }

    pub(crate) async fn create(&self, desired: &DesiredConfig, plan: Plan) -> SnitchResult<Outcome> {
        let request = dispatch::create(desired, plan)?;
        self.execute(request).await
    }

    /// Fetch the remote snitch, stage the differing fields and send them.
    pub(crate) async fn update(
        &self,
        token: &str,
        desired: &DesiredConfig,
        plan: Plan,
    ) -> SnitchResult<UpdateReport> {
        let remote = self
            .read(Some(token))
            .await?
            .into_iter()
            .find(|snitch| snitch.token == token)
            .ok_or_else(|| SnitchError::NotFound {
                token: token.to_string(),
            })?;

        let patch = compute_patch(&remote, desired);
        validate_patch(&remote, &patch, plan)?;
        if patch.is_empty() {
            info!(token, "remote snitch already matches; sending empty patch");
        } else {
            debug!(token, patch = ?patch, "staged update");
        }

        let outcome = self.execute(dispatch::update(token, &patch)?).await?;
        Ok(UpdateReport { patch, outcome })
    }

    pub(crate) async fn delete(&self, token: &str) -> SnitchResult<Outcome> {
        self.execute(dispatch::delete(token)).await
    }

    pub(crate) async fn pause(&self, token: &str) -> SnitchResult<Outcome> {
        self.execute(dispatch::pause(token)).await
    }
}

fn decode_snitches(operation: &'static str, body: Option<Value>) -> Vec<Snitch> {
    let Some(body) = body else {
        warn!(operation, "response carried no JSON body");
        return Vec::new();
    };
    let decoded = match serde_json::from_value::<ReadBody>(body) {
        Ok(ReadBody::Many(snitches)) => snitches,
        Ok(ReadBody::One(snitch)) => vec![*snitch],
        Err(err) => {
            warn!(operation, error = %err, "failed to decode snitch records");
            return Vec::new();
        }
    };
    let total = decoded.len();
    let snitches: Vec<Snitch> = decoded
        .into_iter()
        .filter(|snitch| !snitch.token.trim().is_empty())
        .collect();
    if snitches.len() < total {
        warn!(
            operation,
            dropped = total - snitches.len(),
            "ignoring snitch records without a token"
        );
    }
    snitches
}

/// Decode a single snitch from a success body, if one is there.
pub(crate) fn decode_snitch(operation: &'static str, body: Option<Value>) -> Option<Snitch> {
    decode_snitches(operation, body).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Method, StatusCode};
    use serde_json::json;
    use snitchit_api_models::{AlertType, Interval};
    use snitchit_config::{ConfigError, Endpoints};
    use snitchit_test_support::fixtures::snitch_json;

    use crate::transport::fake::{RecordingTransport, json_response, text_response};
    use crate::transport::{HttpTransport, RequestBody};
    use httpmock::prelude::*;

    fn http_client(server: &MockServer) -> SnitchClient<HttpTransport> {
        let base = server.base_url();
        let endpoints = Endpoints::resolve(Some(&base), Some(&base)).expect("endpoints");
        SnitchClient::new(HttpTransport::new(endpoints, Some("key".to_string())).expect("client"))
    }

    #[tokio::test]
    async fn pause_posts_once_without_body() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/snitches/abc123/pause")
                .header("authorization", "Basic a2V5Og==")
                .body("");
            then.status(200);
        });

        let outcome = http_client(&server).pause("abc123").await.expect("pause");

        mock.assert();
        assert!(matches!(outcome, Outcome::Success { status, .. } if status == StatusCode::OK));
    }

    #[tokio::test]
    async fn pause_of_unknown_token_is_a_client_error() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/snitches/abc123/pause");
            then.status(404)
                .json_body(json!({"type": "resource_not_found", "error": "Not found"}));
        });

        let outcome = http_client(&server).pause("abc123").await.expect("response");

        mock.assert_calls(1);
        assert_eq!(
            outcome,
            Outcome::ClientError {
                status: StatusCode::NOT_FOUND,
                service_type: "resource_not_found".to_string(),
                service_message: "Not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn dot_token_delete_is_refused_before_sending() {
        let server = MockServer::start_async().await;
        let collection = server.mock(|when, then| {
            when.method(DELETE).path("/v1/snitches");
            then.status(204);
        });

        let err = http_client(&server).delete(".").await.expect_err("dot token");

        assert!(matches!(
            err,
            SnitchError::Configuration(ConfigError::InvalidField { field: "token", .. })
        ));
        collection.assert_calls(0);
    }

    #[tokio::test]
    async fn ping_posts_the_message_as_a_form() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/zz9")
                .header("content-type", "application/x-www-form-urlencoded")
                .body("m=2024-01-01T00%3A00%3A00Z");
            then.status(202);
        });

        let outcome = http_client(&server)
            .ping("zz9", "2024-01-01T00:00:00Z")
            .await
            .expect("ping");

        mock.assert();
        assert!(matches!(outcome, Outcome::Success { .. }));
    }

    #[tokio::test]
    async fn read_decodes_lists_and_single_records() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/snitches");
            then.status(200)
                .json_body(json!([snitch_json("abc123"), snitch_json("def456")]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/snitches/abc123");
            then.status(200).json_body(snitch_json("abc123"));
        });

        let client = http_client(&server);
        let all = client.read(None).await.expect("list");
        assert_eq!(all.len(), 2);
        let one = client.read(Some("abc123")).await.expect("single");
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].token, "abc123");
    }

    #[tokio::test]
    async fn read_of_undecodable_body_is_empty() {
        let transport = RecordingTransport::with_responses([text_response(200, "<html>")]);
        let client = SnitchClient::new(transport);
        assert!(client.read(None).await.expect("not an error").is_empty());
    }

    #[tokio::test]
    async fn read_drops_records_without_a_token() {
        let transport = RecordingTransport::with_responses([
            json_response(200, &json!({"unexpected": true})),
            json_response(200, &json!([snitch_json("abc123"), {"name": "orphan"}])),
        ]);
        let client = SnitchClient::new(transport);

        assert!(client.read(Some("abc123")).await.expect("single").is_empty());
        let listed = client.read(None).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].token, "abc123");
    }

    #[test]
    fn decode_snitch_needs_a_token() {
        assert!(decode_snitch("create", Some(json!({"status": "ok"}))).is_none());
        assert!(decode_snitch("create", None).is_none());
        let created = decode_snitch("create", Some(snitch_json("new1"))).expect("record");
        assert_eq!(created.token, "new1");
    }

    #[tokio::test]
    async fn read_of_missing_token_is_not_found() {
        let transport = RecordingTransport::with_responses([json_response(
            404,
            &json!({"type": "resource_not_found", "error": "Not found"}),
        )]);
        let client = SnitchClient::new(transport);
        let err = client.read(Some("nope")).await.expect_err("404");
        assert!(matches!(err, SnitchError::NotFound { token } if token == "nope"));
    }

    #[tokio::test]
    async fn create_with_blank_name_never_reaches_the_transport() {
        let client = SnitchClient::new(RecordingTransport::default());
        let desired = DesiredConfig {
            name: Some(String::new()),
            interval: Some(Interval::Daily),
            ..DesiredConfig::default()
        };

        let err = client.create(&desired, Plan::Free).await.expect_err("blank name");

        assert!(matches!(
            err,
            SnitchError::Configuration(ConfigError::MissingField { field: "name" })
        ));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn update_stages_only_the_changed_name() {
        let transport = RecordingTransport::with_responses([
            json_response(200, &snitch_json("abc123")),
            json_response(200, &snitch_json("abc123")),
        ]);
        let client = SnitchClient::new(transport);
        let desired = DesiredConfig {
            name: Some("Weekly Backups".to_string()),
            tags: Some(vec!["nightly".to_string(), "ops".to_string()]),
            ..DesiredConfig::default()
        };

        let report = client
            .update("abc123", &desired, Plan::Free)
            .await
            .expect("update");

        assert!(matches!(report.outcome, Outcome::Success { .. }));
        let requests = client.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[1].method, Method::PATCH);
        assert_eq!(
            requests[1].body,
            RequestBody::Json(json!({"name": "Weekly Backups"}))
        );
    }

    #[tokio::test]
    async fn update_of_matching_state_sends_an_empty_patch() {
        let transport = RecordingTransport::with_responses([
            json_response(200, &snitch_json("abc123")),
            json_response(200, &snitch_json("abc123")),
        ]);
        let client = SnitchClient::new(transport);
        let desired = DesiredConfig {
            name: Some("Nightly Backups".to_string()),
            interval: Some(Interval::Daily),
            alert_type: Some(AlertType::Basic),
            ..DesiredConfig::default()
        };

        let report = client
            .update("abc123", &desired, Plan::Free)
            .await
            .expect("update");

        assert!(report.patch.is_empty());
        assert_eq!(
            client.transport().requests()[1].body,
            RequestBody::Json(json!({}))
        );
    }

    #[tokio::test]
    async fn update_rejects_a_mismatched_token() {
        let transport =
            RecordingTransport::with_responses([json_response(200, &snitch_json("other"))]);
        let client = SnitchClient::new(transport);

        let err = client
            .update("abc123", &DesiredConfig::default(), Plan::Free)
            .await
            .expect_err("token mismatch");

        assert!(matches!(err, SnitchError::NotFound { .. }));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn update_rejects_an_invalid_effective_triple_before_patching() {
        let transport =
            RecordingTransport::with_responses([json_response(200, &snitch_json("abc123"))]);
        let client = SnitchClient::new(transport);
        let desired = DesiredConfig {
            alert_type: Some(AlertType::Smart),
            ..DesiredConfig::default()
        };

        let err = client
            .update("abc123", &desired, Plan::Small)
            .await
            .expect_err("daily smart on small");

        assert!(matches!(
            err,
            SnitchError::Configuration(ConfigError::PlanCombination { .. })
        ));
        assert_eq!(client.transport().requests().len(), 1);
    }
}
