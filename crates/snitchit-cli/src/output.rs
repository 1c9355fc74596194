//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use snitchit_api_models::Snitch;
use snitchit_config::RunConfig;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const NEVER: &str = "never";
const UNSET: &str = "<unset>";

pub(crate) fn render_snitches(snitches: &[Snitch], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&snitches)?,
        OutputFormat::Table => print!("{}", snitch_table(snitches)),
    }
    Ok(())
}

pub(crate) fn render_snitch(snitch: &Snitch, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(snitch)?,
        OutputFormat::Table => {
            println!("token: {}", snitch.token);
            println!("name: {}", snitch.name);
            println!("status: {}", snitch.status);
            println!("interval: {}", snitch.interval);
            println!("alert type: {}", snitch.alert_type);
            println!("last check-in: {}", format_timestamp(snitch.checked_in_at));
            if !snitch.notes.is_empty() {
                println!("notes: {}", snitch.notes);
            }
            if !snitch.tags.is_empty() {
                println!("tags: {}", snitch.tags.join(", "));
            }
            if let Some(href) = &snitch.href {
                println!("href: {href}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_run_config(config: &RunConfig, format: OutputFormat) -> CliResult<()> {
    let api_key = config.api_key.as_deref().map_or_else(|| UNSET.to_string(), redact_key);
    let config_file = config
        .config_file
        .as_ref()
        .map_or_else(|| UNSET.to_string(), |path| path.display().to_string());
    let desired = &config.desired;
    match format {
        OutputFormat::Json => print_json(&json!({
            "action": config.action.label(),
            "api_key": api_key,
            "plan": config.plan,
            "message": config.message,
            "silent": config.silent,
            "verbose": config.verbose,
            "api_url": config.endpoints.api.as_str(),
            "ping_url": config.endpoints.ping.as_str(),
            "config_file": config_file,
            "name": desired.name,
            "interval": desired.interval,
            "alert_type": desired.alert_type,
            "notes": desired.notes,
            "tags": desired.tags,
        }))?,
        OutputFormat::Table => {
            println!("action: {}", config.action.label());
            println!("api key: {api_key}");
            println!("plan: {}", config.plan);
            println!("api url: {}", config.endpoints.api);
            println!("ping url: {}", config.endpoints.ping);
            println!("config file: {config_file}");
            println!("silent: {}", config.silent);
            println!("verbose: {}", config.verbose);
            if let Some(interval) = desired.interval {
                println!("interval: {interval}");
            }
            if let Some(alert) = desired.alert_type {
                println!("alert type: {alert}");
            }
            if let Some(tags) = &desired.tags {
                println!("tags: {}", tags.join(", "));
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

#[must_use]
pub(crate) fn snitch_table(snitches: &[Snitch]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<28} {:<9} {:<20} {:<10} {:<6} {:<24} TAGS",
        "TOKEN", "NAME", "STATUS", "LAST CHECK-IN", "INTERVAL", "ALERT", "NOTES"
    );
    for snitch in snitches {
        let _ = writeln!(
            out,
            "{:<12} {:<28} {:<9} {:<20} {:<10} {:<6} {:<24} {}",
            snitch.token,
            truncate(&snitch.name, 28),
            snitch.status,
            format_timestamp(snitch.checked_in_at),
            snitch.interval,
            snitch.alert_type,
            truncate(&snitch.notes, 24),
            snitch.tags.join(",")
        );
    }
    out
}

#[must_use]
pub(crate) fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || NEVER.to_string(),
        |at| at.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Keep the last four characters of a key, mask the rest.
#[must_use]
pub(crate) fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn truncate(value: &str, width: usize) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Snitch {
        Snitch {
            token: "abc123".to_string(),
            name: "Nightly Backups".to_string(),
            tags: vec!["ops".to_string(), "db".to_string()],
            notes: "line one\nline two".to_string(),
            status: "healthy".to_string(),
            checked_in_at: Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 13).single(),
            interval: "daily".to_string(),
            alert_type: "basic".to_string(),
            ..Snitch::default()
        }
    }

    #[test]
    fn table_has_header_and_one_row_per_snitch() {
        let table = snitch_table(&[sample(), Snitch::default()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("TOKEN"));
        assert!(lines[1].contains("Nightly Backups"));
        assert!(lines[1].contains("2024-01-01 02:00:13"));
        assert!(lines[1].contains("line one line two"));
        assert!(lines[1].ends_with("ops,db"));
        assert!(lines[2].contains(NEVER));
    }

    #[test]
    fn long_values_are_truncated() {
        let value = "x".repeat(40);
        let cut = truncate(&value, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn keys_are_redacted() {
        assert_eq!(redact_key("abcdef123456"), "****3456");
        assert_eq!(redact_key("abc"), "****");
    }

    #[test]
    fn missing_check_in_reads_never() {
        assert_eq!(format_timestamp(None), "never");
    }
}
