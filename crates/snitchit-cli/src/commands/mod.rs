//! Command handlers grouped by concern.

pub(crate) mod config;
pub(crate) mod ping;
pub(crate) mod snitches;

pub(crate) use config::handle_display_config;
pub(crate) use ping::{handle_ping, handle_unpause};
pub(crate) use snitches::{
    handle_create, handle_delete, handle_pause, handle_show, handle_update,
};

#[cfg(test)]
pub(crate) mod test_support {
    use snitchit_config::{Action, DesiredConfig, Endpoints, Plan, RunConfig};

    use crate::cli::OutputFormat;
    use crate::client::AppContext;
    use crate::service::SnitchClient;
    use crate::transport::Transport;

    pub(crate) fn run_config(action: Action) -> RunConfig {
        RunConfig {
            action,
            api_key: Some("key".to_string()),
            message: "2024-01-01T00:00:00Z".to_string(),
            desired: DesiredConfig::default(),
            plan: Plan::Free,
            silent: true,
            verbose: false,
            endpoints: Endpoints::resolve(None, None).expect("defaults"),
            config_file: None,
        }
    }

    pub(crate) fn context<T: Transport>(transport: T, config: RunConfig) -> AppContext<T> {
        AppContext {
            client: SnitchClient::new(transport),
            config,
            output: OutputFormat::Table,
        }
    }
}
