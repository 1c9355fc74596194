#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub, unused)]

//! Run configuration, validation rules and config-file loading for snitchit.
//!
//! Layout: `model.rs` (typed run configuration), `validate.rs` (alert type,
//! interval and plan rules), `loader.rs` (YAML file discovery), `defaults.rs`
//! (service hosts and file names).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{FileConfig, TagList, config_file_path, load_file_config};
pub use model::{Action, ActionKind, DesiredConfig, Endpoints, Plan, RunConfig};
pub use validate::{
    ensure_plan_permits, parse_alert_type, parse_interval, parse_plan, parse_token,
    validate_alert_type, validate_interval, validate_plan_combination,
};
