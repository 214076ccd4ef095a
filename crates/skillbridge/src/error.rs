//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use skillbridge_config::ConfigError;
use skillbridge_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const INVALID_DIRECTIVE: i32 = 3;
    pub const UNSUPPORTED: i32 = 4;
    pub const NOT_FOUND: i32 = 5;
    pub const DEVICE: i32 = 6;
    pub const CONFIG: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Directive ────────────────────────────────────────────────────
    #[error("Malformed directive: {reason}")]
    #[diagnostic(
        code(skillbridge::malformed_directive),
        help(
            "A v3 directive looks like {{\"directive\": {{\"header\": ..., \"payload\": ...}}}},\n\
             a v2 directive like {{\"header\": ..., \"payload\": ...}}."
        )
    )]
    MalformedDirective { reason: String },

    #[error("Cannot route directive with payload version '{found}'")]
    #[diagnostic(
        code(skillbridge::unknown_version),
        help(
            "Set directive.header.payloadVersion to \"3\" or header.payloadVersion to \"2\"."
        )
    )]
    UnknownVersion { found: String },

    #[error("Unsupported v{version} directive {namespace}/{name}")]
    #[diagnostic(
        code(skillbridge::unsupported_directive),
        help("Run: skillbridge catalog show <ID> to see the interfaces an endpoint supports")
    )]
    UnsupportedDirective {
        version: String,
        namespace: String,
        name: String,
    },

    #[error("Endpoint '{endpoint_id}' not found")]
    #[diagnostic(
        code(skillbridge::endpoint_not_found),
        help("Run: skillbridge catalog list to see available endpoints")
    )]
    EndpointNotFound { endpoint_id: String },

    // ── Collaborators ────────────────────────────────────────────────
    #[error("Device communication failed: {message}")]
    #[diagnostic(
        code(skillbridge::device),
        help("Check device.state_file and sensor.store in your config.")
    )]
    Device { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Catalog error: {message}")]
    #[diagnostic(
        code(skillbridge::catalog),
        help("The catalog is a JSON array of appliances in v2 discovery syntax.")
    )]
    Catalog { message: String },

    #[error(transparent)]
    #[diagnostic(
        code(skillbridge::config),
        help("Inspect the file with: skillbridge config show")
    )]
    Config(#[from] ConfigError),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(skillbridge::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(skillbridge::validation))]
    Validation { field: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error("Cannot read {path}: {source}")]
    #[diagnostic(code(skillbridge::io))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Output serialization failed: {0}")]
    #[diagnostic(code(skillbridge::serialization))]
    Serialization(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(skillbridge::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedDirective { .. } | Self::UnknownVersion { .. } => {
                exit_code::INVALID_DIRECTIVE
            }
            Self::UnsupportedDirective { .. } => exit_code::UNSUPPORTED,
            Self::EndpointNotFound { .. } => exit_code::NOT_FOUND,
            Self::Device { .. } => exit_code::DEVICE,
            Self::Catalog { .. } | Self::Config(_) | Self::ConfigExists { .. } => exit_code::CONFIG,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedDirective { reason } => Self::MalformedDirective { reason },
            CoreError::UnknownVersion { found } => Self::UnknownVersion { found },
            CoreError::UnsupportedDirective {
                version,
                namespace,
                name,
            } => Self::UnsupportedDirective {
                version,
                namespace,
                name,
            },
            CoreError::EndpointNotFound { endpoint_id } => Self::EndpointNotFound { endpoint_id },
            CoreError::DeviceCommunication { message } => Self::Device { message },
            CoreError::Catalog { message } => Self::Catalog { message },
            CoreError::Serialization(e) => Self::Serialization(e.to_string()),
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
