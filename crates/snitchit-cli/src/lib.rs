#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub, unused)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for the Dead Man's Snitch monitoring service.
//!
//! Layout:
//! - `cli.rs`: argument parsing, run-configuration resolution and dispatch
//! - `commands/`: command handlers grouped by concern
//! - `client.rs`: shared handler context and the CLI error type
//! - `service.rs`: snitch lifecycle operations
//! - `dispatch.rs`: action table (verb, path and body per action)
//! - `reconcile.rs`: minimal update patch computation
//! - `outcome.rs`: response classification
//! - `transport.rs`: HTTP transport seam
//! - `error.rs`: service error taxonomy
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod dispatch;
pub(crate) mod error;
pub(crate) mod outcome;
pub(crate) mod output;
pub(crate) mod reconcile;
pub(crate) mod service;
pub(crate) mod transport;

pub use cli::run;
