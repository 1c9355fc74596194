use snitchit_telemetry::record_token;

use crate::client::{AppContext, CliResult};
use crate::transport::Transport;

pub(crate) async fn handle_ping<T: Transport>(ctx: &AppContext<T>, token: &str) -> CliResult<()> {
    record_token(token);
    ctx.client
        .ping(token, &ctx.config.message)
        .await?
        .into_result("ping")?;
    ctx.notify(format_args!("Pinged snitch {token}"));
    Ok(())
}

pub(crate) async fn handle_unpause<T: Transport>(
    ctx: &AppContext<T>,
    token: &str,
) -> CliResult<()> {
    record_token(token);
    ctx.client
        .unpause(token, &ctx.config.message)
        .await?
        .into_result("unpause")?;
    ctx.notify(format_args!("Unpaused snitch {token}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snitchit_config::Action;

    use crate::client::CliError;
    use crate::commands::test_support::{context, run_config};
    use crate::transport::fake::{RecordingTransport, text_response};
    use crate::transport::{RequestBody, ServiceHost};

    #[tokio::test]
    async fn ping_sends_the_configured_message() {
        let ctx = context(
            RecordingTransport::default(),
            run_config(Action::Ping {
                token: "zz9".to_string(),
            }),
        );

        handle_ping(&ctx, "zz9").await.expect("ping");

        let requests = ctx.client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].host, ServiceHost::Ping);
        assert_eq!(
            requests[0].body,
            RequestBody::Form(vec![("m".to_string(), "2024-01-01T00:00:00Z".to_string())])
        );
    }

    #[tokio::test]
    async fn unpause_prefixes_the_message() {
        let ctx = context(
            RecordingTransport::default(),
            run_config(Action::Unpause {
                token: "zz9".to_string(),
            }),
        );

        handle_unpause(&ctx, "zz9").await.expect("unpause");

        let requests = ctx.client.transport().requests();
        assert_eq!(
            requests[0].body,
            RequestBody::Form(vec![(
                "m".to_string(),
                "Unpausing: 2024-01-01T00:00:00Z".to_string()
            )])
        );
    }

    #[tokio::test]
    async fn failed_ping_is_a_failure_exit() {
        let ctx = context(
            RecordingTransport::with_responses([text_response(503, "down")]),
            run_config(Action::Ping {
                token: "zz9".to_string(),
            }),
        );

        let err = handle_ping(&ctx, "zz9").await.expect_err("server error");
        assert!(matches!(err, CliError::Failure(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
