//! Argument parsing, run-configuration resolution and command dispatch.

use std::path::PathBuf;

use anyhow::anyhow;
use chrono::{Local, SecondsFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use snitchit_config::defaults::{DEFAULT_ACTION, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE};
use snitchit_config::{
    Action, ActionKind, DesiredConfig, Endpoints, FileConfig, Plan, RunConfig, TagList,
    config_file_path, load_file_config, parse_alert_type, parse_interval, parse_plan, parse_token,
};
use snitchit_telemetry::{CommandSpanGuard, LogFormat, LoggingConfig, Verbosity, init_logging};
use tracing::info;

use crate::client::{AppContext, CliError, CliResult};
use crate::commands::{
    handle_create, handle_delete, handle_display_config, handle_pause, handle_ping, handle_show,
    handle_unpause, handle_update,
};
use crate::service::SnitchClient;
use crate::transport::{HttpTransport, Transport};

const BUILD_SHA: &str = match option_env!("SNITCHIT_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Parses CLI arguments, resolves the run configuration and executes the
/// requested action. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    match execute(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli) -> CliResult<()> {
    let path = config_file_path(&cli.path, &cli.config);
    let file = load_file_config(&path)?;
    let config_file = file.as_ref().map(|_| path.clone());
    let log_format = cli.log_format;
    let output = cli.output;
    let config = resolve_run_config(cli, file.unwrap_or_default(), config_file, now_rfc3339())?;

    let verbosity = Verbosity::from_flags(config.silent, config.verbose);
    init_logging(&LoggingConfig {
        level: verbosity.level(),
        format: log_format,
        build_sha: BUILD_SHA,
    })
    .map_err(|err| CliError::failure(anyhow!("failed to initialise logging: {err}")))?;
    if config.config_file.is_none() {
        info!(path = %path.display(), "no config file found; using flags and defaults");
    }

    let transport = transport_for(&config)?;
    let _span = CommandSpanGuard::enter(config.action.label());
    let ctx = AppContext {
        client: SnitchClient::new(transport),
        config,
        output,
    };
    dispatch(&ctx).await
}

fn now_rfc3339() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Build the HTTP transport, insisting on an API key for management actions.
fn transport_for(config: &RunConfig) -> CliResult<HttpTransport> {
    let api_key = if config.action.needs_api_key() {
        let key = config.require_api_key().map_err(|_| {
            CliError::validation(
                "API key is required (pass --api-key, set SNITCHIT_API_KEY or add `apikey` to the config file)",
            )
        })?;
        Some(key.to_string())
    } else {
        None
    };
    Ok(HttpTransport::new(config.endpoints.clone(), api_key)?)
}

pub(crate) async fn dispatch<T: Transport>(ctx: &AppContext<T>) -> CliResult<()> {
    match &ctx.config.action {
        Action::Ping { token } => handle_ping(ctx, token).await,
        Action::Show { token } => handle_show(ctx, token.as_deref()).await,
        Action::Create => handle_create(ctx).await,
        Action::Update { token } => handle_update(ctx, token).await,
        Action::Delete { token } => handle_delete(ctx, token).await,
        Action::Pause { token } => handle_pause(ctx, token).await,
        Action::Unpause { token } => handle_unpause(ctx, token).await,
        Action::DisplayConfig => handle_display_config(ctx),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "snitchit",
    version,
    about = "Command-line client for the Dead Man's Snitch monitoring service"
)]
pub(crate) struct Cli {
    /// Management API key.
    #[arg(long, global = true, env = "SNITCHIT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Config file name, looked up inside --path.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Directory holding the config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_DIR)]
    path: PathBuf,
    /// Billing plan used to validate alert type and interval (free, small, medium, large).
    #[arg(long, global = true)]
    plan: Option<String>,
    /// Suppress success output.
    #[arg(long, short, global = true)]
    silent: bool,
    /// Log request and diff details.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    /// Log line format on stderr (pretty or json).
    #[arg(long, global = true, value_parser = parse_log_format, default_value = "pretty")]
    log_format: LogFormat,
    /// Management API base URL.
    #[arg(long, global = true, env = "SNITCHIT_API_URL")]
    api_url: Option<String>,
    /// Ping host base URL.
    #[arg(long, global = true, env = "SNITCHIT_PING_URL")]
    ping_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a heartbeat for a snitch.
    Ping(PingArgs),
    /// List every snitch, or show one.
    Show(ShowArgs),
    /// Create a snitch.
    Create(SnitchFieldArgs),
    /// Update a snitch, sending only the fields that differ.
    Update(UpdateArgs),
    /// Delete a snitch.
    Delete(TokenArgs),
    /// Pause monitoring of a snitch.
    Pause(TokenArgs),
    /// Resume monitoring by pinging a paused snitch.
    Unpause(PingArgs),
    /// Print the resolved configuration.
    Config,
}

#[derive(Args, Debug, Default)]
struct TokenArgs {
    /// Snitch token; defaults to `defaultsnitch` from the config file.
    token: Option<String>,
}

#[derive(Args, Debug, Default)]
struct ShowArgs {
    /// Snitch token; defaults to `defaultsnitch` from the config file.
    token: Option<String>,
    /// List every snitch even when a default snitch is configured.
    #[arg(long, conflicts_with = "token")]
    all: bool,
}

#[derive(Args, Debug, Default)]
struct PingArgs {
    /// Snitch token; defaults to `defaultsnitch` from the config file.
    token: Option<String>,
    /// Check-in message; defaults to the current time.
    #[arg(long, short)]
    message: Option<String>,
}

#[derive(Args, Debug, Default)]
struct SnitchFieldArgs {
    /// Display name.
    #[arg(long, short)]
    name: Option<String>,
    /// Expected cadence (15_minute, 30_minute, hourly, daily, weekly, monthly).
    #[arg(long, short)]
    interval: Option<String>,
    /// Alert type (basic or smart).
    #[arg(long, short, alias = "alert-type")]
    alert: Option<String>,
    /// Free-form notes.
    #[arg(long)]
    notes: Option<String>,
    /// Comma-separated tags; an empty value clears them.
    #[arg(long)]
    tags: Option<String>,
}

#[derive(Args, Debug, Default)]
struct UpdateArgs {
    /// Snitch token; defaults to `defaultsnitch` from the config file.
    token: Option<String>,
    #[command(flatten)]
    fields: SnitchFieldArgs,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse().map_err(|err| format!("{err}"))
}

/// Merge flags, environment (already folded in by clap) and the config file
/// into one [`RunConfig`].
fn resolve_run_config(
    cli: Cli,
    file: FileConfig,
    config_file: Option<PathBuf>,
    now: String,
) -> CliResult<RunConfig> {
    let plan = non_blank(cli.plan.or_else(|| file.plan.clone()))
        .map(|plan| parse_plan(&plan))
        .transpose()?
        .unwrap_or(Plan::Free);
    let endpoints = Endpoints::resolve(
        non_blank(cli.api_url.or_else(|| file.api_url.clone())).as_deref(),
        non_blank(cli.ping_url.or_else(|| file.ping_url.clone())).as_deref(),
    )?;
    let default_token = non_blank(file.defaultsnitch.clone());
    let token = |explicit: Option<String>| require_token(explicit, default_token.as_deref());

    let mut message = None;
    let (action, desired) = match cli.command {
        Some(Command::Ping(args)) => {
            message = args.message;
            (Action::Ping { token: token(args.token)? }, DesiredConfig::default())
        }
        Some(Command::Unpause(args)) => {
            message = args.message;
            (Action::Unpause { token: token(args.token)? }, DesiredConfig::default())
        }
        Some(Command::Show(args)) => {
            let token = if args.all {
                None
            } else {
                optional_token(args.token, default_token.as_deref())?
            };
            (Action::Show { token }, DesiredConfig::default())
        }
        Some(Command::Create(fields)) => (Action::Create, desired_for_create(fields, &file)?),
        Some(Command::Update(args)) => (
            Action::Update { token: token(args.token)? },
            desired_from_flags(args.fields)?,
        ),
        Some(Command::Delete(args)) => (
            Action::Delete { token: token(args.token)? },
            DesiredConfig::default(),
        ),
        Some(Command::Pause(args)) => (
            Action::Pause { token: token(args.token)? },
            DesiredConfig::default(),
        ),
        Some(Command::Config) => (Action::DisplayConfig, DesiredConfig::default()),
        None => {
            let kind: ActionKind = file.action.as_deref().unwrap_or(DEFAULT_ACTION).parse()?;
            let desired = if matches!(kind, ActionKind::Create | ActionKind::Update) {
                desired_for_create(SnitchFieldArgs::default(), &file)?
            } else {
                DesiredConfig::default()
            };
            let action = match kind {
                ActionKind::Ping => Action::Ping { token: token(None)? },
                ActionKind::Show => Action::Show {
                    token: optional_token(None, default_token.as_deref())?,
                },
                ActionKind::Create => Action::Create,
                ActionKind::Update => Action::Update { token: token(None)? },
                ActionKind::Delete => Action::Delete { token: token(None)? },
                ActionKind::Pause => Action::Pause { token: token(None)? },
                ActionKind::Unpause => Action::Unpause { token: token(None)? },
                ActionKind::DisplayConfig => Action::DisplayConfig,
            };
            (action, desired)
        }
    };

    Ok(RunConfig {
        action,
        api_key: non_blank(cli.api_key).or_else(|| non_blank(file.apikey.clone())),
        message: non_blank(message)
            .or_else(|| non_blank(file.message.clone()))
            .unwrap_or(now),
        desired,
        plan,
        silent: cli.silent || file.silent.unwrap_or(false),
        verbose: cli.verbose || file.verbose.unwrap_or(false),
        endpoints,
        config_file,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Explicit token, else the default snitch; either must be a usable path segment.
fn optional_token(explicit: Option<String>, default: Option<&str>) -> CliResult<Option<String>> {
    non_blank(explicit)
        .or_else(|| default.map(str::to_string))
        .map(|token| Ok::<_, CliError>(parse_token(&token)?.to_string()))
        .transpose()
}

fn require_token(explicit: Option<String>, default: Option<&str>) -> CliResult<String> {
    optional_token(explicit, default)?.ok_or_else(|| {
        CliError::validation(
            "snitch token is required (pass it as an argument or set `defaultsnitch` in the config file)",
        )
    })
}

fn desired_from_flags(fields: SnitchFieldArgs) -> CliResult<DesiredConfig> {
    Ok(DesiredConfig {
        name: fields.name,
        notes: fields.notes,
        interval: non_blank(fields.interval)
            .map(|value| parse_interval(&value))
            .transpose()?,
        alert_type: non_blank(fields.alert)
            .map(|value| parse_alert_type(&value))
            .transpose()?,
        tags: fields.tags.map(|raw| DesiredConfig::parse_tags(&raw)),
    })
}

/// Flags first, then the file's create defaults for anything left unset.
fn desired_for_create(fields: SnitchFieldArgs, file: &FileConfig) -> CliResult<DesiredConfig> {
    let tags_flag_given = fields.tags.is_some();
    let mut desired = desired_from_flags(SnitchFieldArgs {
        name: fields.name,
        interval: fields.interval.or_else(|| file.interval.clone()),
        alert: fields.alert.or_else(|| file.alert.clone()),
        notes: fields.notes.or_else(|| file.notes.clone()),
        tags: fields.tags,
    })?;
    if !tags_flag_given {
        desired.tags = file.tags.clone().map(TagList::into_tags);
    }
    Ok(desired)
}
