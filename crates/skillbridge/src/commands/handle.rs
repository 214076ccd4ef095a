//! `skillbridge handle`: one directive in, one response out.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tabled::Tabled;

use skillbridge_core::{Bridge, ResponseEnvelope};

use crate::cli::{HandleArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(
    args: &HandleArgs,
    bridge: &Bridge,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let raw = read_input(args.file.as_deref())?;
    let directive: Value =
        serde_json::from_str(&raw).map_err(|e| CliError::MalformedDirective {
            reason: format!("invalid JSON: {e}"),
        })?;
    let response = bridge.handle(&directive)?;
    let out = output::render_single(format, &response, response_detail)?;
    output::print_output(&out, quiet)
}

/// Read the whole directive from a file, or stdin for `None` / `-`.
fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(raw)
        }
    }
}

// ── Table view ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Property")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Sampled")]
    time_of_sample: String,
}

pub(crate) fn response_detail(response: &ResponseEnvelope) -> String {
    let mut pairs = vec![
        ("Event", format!("{}/{}", response.namespace(), response.name())),
        ("Message ID", response.message_id().to_owned()),
    ];
    if let ResponseEnvelope::Current(envelope) = response {
        if let Some(token) = &envelope.event.header.correlation_token {
            pairs.push(("Correlation", token.clone()));
        }
        if let Some(endpoint) = &envelope.event.endpoint {
            pairs.push(("Endpoint", endpoint.endpoint_id.clone()));
        }
    }

    let mut out = output::render_pairs(&pairs);
    let rows: Vec<PropertyRow> = response
        .properties()
        .iter()
        .map(|p| PropertyRow {
            namespace: p.namespace.clone(),
            name: p.name.clone(),
            value: serde_json::to_string(&p.value).unwrap_or_default(),
            time_of_sample: p.time_of_sample.clone(),
        })
        .collect();
    if !rows.is_empty() {
        out.push_str("\n\n");
        out.push_str(&output::render_table(&rows));
    }
    out
}
