use anyhow::anyhow;
use snitchit_telemetry::record_token;
use tracing::info;

use crate::client::{AppContext, CliError, CliResult};
use crate::error::SnitchError;
use crate::output::{render_snitch, render_snitches};
use crate::service::decode_snitch;
use crate::transport::Transport;

pub(crate) async fn handle_show<T: Transport>(
    ctx: &AppContext<T>,
    token: Option<&str>,
) -> CliResult<()> {
    if let Some(token) = token {
        record_token(token);
    }
    let snitches = ctx.client.read(token).await?;
    match (token, snitches.as_slice()) {
        (Some(token), []) => Err(SnitchError::NotFound {
            token: token.to_string(),
        }
        .into()),
        (None, []) => Err(CliError::failure(anyhow!("no snitches found"))),
        (Some(_), [snitch, ..]) => render_snitch(snitch, ctx.output),
        (None, all) => render_snitches(all, ctx.output),
    }
}

pub(crate) async fn handle_create<T: Transport>(ctx: &AppContext<T>) -> CliResult<()> {
    let body = ctx
        .client
        .create(&ctx.config.desired, ctx.config.plan)
        .await?
        .into_result("create")?;
    match decode_snitch("create", body) {
        Some(snitch) => {
            ctx.notify(format_args!("Created snitch {}", snitch.token));
            if !ctx.config.silent {
                render_snitch(&snitch, ctx.output)?;
            }
        }
        None => ctx.notify("Created snitch"),
    }
    Ok(())
}

pub(crate) async fn handle_update<T: Transport>(ctx: &AppContext<T>, token: &str) -> CliResult<()> {
    record_token(token);
    let report = ctx
        .client
        .update(token, &ctx.config.desired, ctx.config.plan)
        .await?;
    if ctx.config.verbose {
        info!(token, patch = ?report.patch, "update sent");
    }
    report.outcome.into_result("update")?;
    if report.patch.is_empty() {
        ctx.notify(format_args!("Snitch {token} already up to date"));
    } else {
        ctx.notify(format_args!("Updated snitch {token}"));
    }
    Ok(())
}

pub(crate) async fn handle_delete<T: Transport>(ctx: &AppContext<T>, token: &str) -> CliResult<()> {
    record_token(token);
    ctx.client.delete(token).await?.into_result("delete")?;
    ctx.notify(format_args!("Deleted snitch {token}"));
    Ok(())
}

pub(crate) async fn handle_pause<T: Transport>(ctx: &AppContext<T>, token: &str) -> CliResult<()> {
    record_token(token);
    ctx.client.pause(token).await?.into_result("pause")?;
    ctx.notify(format_args!("Paused snitch {token}"));
    Ok(())
}
