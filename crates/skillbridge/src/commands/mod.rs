//! Command dispatch: bridges CLI args -> bridge calls -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod discover;
pub mod handle;
pub mod serve;

use skillbridge_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Dispatch a bridge-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let bridge = config::build_bridge(global, cfg)?;
    let format = config::output_format(global, cfg);

    match cmd {
        Command::Handle(args) => handle::handle(&args, &bridge, format, global.quiet),
        Command::Serve(args) => serve::handle(&args, bridge).await,
        Command::Discover(args) => discover::handle(&args, &bridge, format, global.quiet),
        Command::Catalog(args) => catalog::handle(&args, &bridge, format, global.quiet),
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}
