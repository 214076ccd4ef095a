//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};

use skillbridge_config::Config;
use skillbridge_core::ThermostatMode;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Blank answers mean "unset".
fn optional_path(answer: String) -> Option<PathBuf> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn prompt_config() -> Result<Config, CliError> {
    let mut cfg = Config::default();

    let catalog: String = Input::new()
        .with_prompt("Appliance catalog JSON (blank for the built-in sample)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    cfg.catalog.path = optional_path(catalog);

    let store: String = Input::new()
        .with_prompt("Temperature reading store (blank for a fixed reading)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    cfg.sensor.store = optional_path(store);

    if cfg.sensor.store.is_some() {
        cfg.sensor.partition = Input::new()
            .with_prompt("Reading store partition")
            .default(cfg.sensor.partition.clone())
            .interact_text()
            .map_err(prompt_err)?;
    } else {
        cfg.sensor.fixed_celsius = Input::new()
            .with_prompt("Fixed ambient temperature (°C)")
            .default(cfg.sensor.fixed_celsius)
            .interact_text()
            .map_err(prompt_err)?;
    }

    let state_file: String = Input::new()
        .with_prompt("Device state file (blank to keep state in memory)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    cfg.device.state_file = optional_path(state_file);

    cfg.device.initial_celsius = Input::new()
        .with_prompt("Initial target temperature (°C)")
        .default(cfg.device.initial_celsius)
        .interact_text()
        .map_err(prompt_err)?;

    let modes = [ThermostatMode::Cool, ThermostatMode::Heat];
    let selection = Select::new()
        .with_prompt("Initial thermostat mode")
        .items(&["COOL", "HEAT"])
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    cfg.device.initial_mode = modes[selection];

    // Reject what the bridge would reject at startup.
    cfg.to_bridge_config()?;
    Ok(cfg)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { defaults, force } => {
            let path = config::config_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = if defaults {
                Config::default()
            } else {
                eprintln!("skillbridge configuration");
                eprintln!("   Config path: {}\n", path.display());
                prompt_config()?
            };

            skillbridge_config::save_config_to(&cfg, &path)?;
            tracing::info!(path = %path.display(), "configuration written");
            if !global.quiet {
                eprintln!("Configuration saved to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let format = config::output_format(global, &cfg);
            let out = match format {
                OutputFormat::Table => toml::to_string_pretty(&cfg)
                    .map_err(|e| CliError::Serialization(e.to_string()))?,
                other => output::render_single(other, &cfg, |_| String::new())?,
            };
            output::print_output(&out, global.quiet)
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string(), global.quiet)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answers_leave_paths_unset() {
        assert_eq!(optional_path("   ".into()), None);
        assert_eq!(
            optional_path(" /tmp/catalog.json ".into()),
            Some(PathBuf::from("/tmp/catalog.json"))
        );
    }
}
