//! Built-in defaults applied when neither flags nor the config file say otherwise.
//!
//! # Design
//! - Keep the service hosts in one place so the ping and management endpoints
//!   can never drift into each other.

/// Base URL of the management API.
pub const DEFAULT_API_URL: &str = "https://api.deadmanssnitch.com/";
/// Base URL of the ping (check-in) host.
pub const DEFAULT_PING_URL: &str = "https://nosnch.in/";
/// Config file name looked up inside the config directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Directory searched for the config file.
pub const DEFAULT_CONFIG_DIR: &str = ".";
/// Action run when no subcommand is given and the file names none.
pub const DEFAULT_ACTION: &str = "ping";
/// Prefix prepended to the message when a snitch is unpaused by pinging it.
pub const UNPAUSE_MESSAGE_PREFIX: &str = "Unpausing: ";
