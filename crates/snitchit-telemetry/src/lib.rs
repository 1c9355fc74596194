#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub, unused)]

//! Logging setup shared by the snitchit binaries.
//!
//! Layout: init.rs (subscriber installation and verbosity), context.rs
//! (per-command span), error.rs (telemetry error type).

pub mod context;
pub mod error;
pub mod init;

pub use context::{CommandSpanGuard, record_token};
pub use error::{Result, TelemetryError};
pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, Verbosity, build_sha, init_logging,
};
