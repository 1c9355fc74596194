//! Sample service payloads and config-file helpers.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

/// Config file exercising every key the loader understands.
pub const SAMPLE_CONFIG_YAML: &str = "\
apikey: test-api-key
defaultsnitch: zz9
plan: large
alert: smart
interval: hourly
notes: created by fixtures
tags: ops,nightly
silent: false
verbose: false
";

/// Write `contents` to `dir/name` and return the path.
///
/// # Panics
///
/// Panics when the file cannot be written; only meant for tests.
#[must_use]
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Err(err) = fs::write(&path, contents) {
        panic!("failed to write fixture {}: {err}", path.display());
    }
    path
}

/// A snitch record as the management API returns it.
#[must_use]
pub fn snitch_json(token: &str) -> Value {
    json!({
        "token": token,
        "href": format!("/v1/snitches/{token}"),
        "name": "Nightly Backups",
        "tags": ["ops", "nightly"],
        "notes": "Runs at 02:00 UTC",
        "status": "healthy",
        "checked_in_at": "2024-01-01T02:00:13.000Z",
        "created_at": "2023-06-01T10:00:00.000Z",
        "interval": "daily",
        "alert_type": "basic"
    })
}

/// The service's 4xx error envelope.
#[must_use]
pub fn service_error_json(kind: &str, message: &str) -> Value {
    json!({ "type": kind, "error": message })
}
