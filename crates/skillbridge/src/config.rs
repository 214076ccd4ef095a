//! CLI-side configuration: `--config` / `--catalog` aware wrappers around
//! `skillbridge-config`.

use std::path::PathBuf;
use std::sync::Arc;

use skillbridge_config::Config;
use skillbridge_core::devices::InMemoryGrants;
use skillbridge_core::{Bridge, CatalogSource};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Config file in effect: `--config`, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(skillbridge_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_path(global);
    tracing::debug!(path = %path.display(), "loading configuration");
    Ok(skillbridge_config::load_config_from(&path)?)
}

/// Output format: `--output`, else `defaults.output`, else JSON.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    if let Some(format) = global.output {
        return format;
    }
    match cfg.defaults.output.as_str() {
        "json-compact" => OutputFormat::JsonCompact,
        "yaml" => OutputFormat::Yaml,
        "table" => OutputFormat::Table,
        _ => OutputFormat::Json,
    }
}

/// Build the bridge from config plus CLI overrides.
pub fn build_bridge(global: &GlobalOpts, cfg: &Config) -> Result<Bridge, CliError> {
    let mut bridge_config = cfg.to_bridge_config()?;
    if let Some(path) = &global.catalog {
        bridge_config.catalog = CatalogSource::File(path.clone());
    }
    let bridge = Bridge::from_config(&bridge_config)?
        .with_grant_recorder(Arc::new(InMemoryGrants::new()));
    Ok(bridge)
}
