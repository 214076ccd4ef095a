//! Clap derive structures for the `skillbridge` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This file is also compiled by `build.rs` for man page generation, so it
//! may only depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// skillbridge -- translate smart home directives across API generations
#[derive(Debug, Parser)]
#[command(
    name = "skillbridge",
    version,
    about = "Bridge legacy (v2) and current (v3) smart home directives",
    long_about = "Detects the API generation of an inbound smart home directive,\n\
        routes it to the simulated thermostat, and prints a schema-correct response.\n\n\
        Logs go to stderr; stdout carries only responses.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SKILLBRIDGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Appliance catalog file (overrides catalog.path)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output format (defaults to defaults.output, then json)
    #[arg(long, short = 'o', env = "SKILLBRIDGE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Log line format on stderr
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Log Enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Human-readable table
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Handle one directive and print its response
    #[command(alias = "h")]
    Handle(HandleArgs),

    /// Read newline-delimited directives from stdin, answer on stdout
    Serve(ServeArgs),

    /// Print a discovery response for the catalog
    Discover(DiscoverArgs),

    /// Inspect the appliance catalog
    #[command(alias = "cat")]
    Catalog(CatalogArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Handle / Serve ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HandleArgs {
    /// Directive JSON file; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Directives handled concurrently; responses keep input order
    #[arg(long, default_value = "8", value_parser = clap::value_parser!(u16).range(1..))]
    pub max_in_flight: u16,
}

// ── Discover ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Answer with a legacy DiscoverAppliancesResponse
    #[arg(long)]
    pub legacy: bool,
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List appliances
    #[command(alias = "ls")]
    List,

    /// Show one appliance and its endpoint projection
    Show {
        /// Appliance / endpoint id
        id: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a config file with guided setup
    Init {
        /// Write defaults without prompting
        #[arg(long)]
        defaults: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
