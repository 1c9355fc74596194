use crate::client::{AppContext, CliResult};
use crate::output::render_run_config;

pub(crate) fn handle_display_config<T>(ctx: &AppContext<T>) -> CliResult<()> {
    render_run_config(&ctx.config, ctx.output)
}
