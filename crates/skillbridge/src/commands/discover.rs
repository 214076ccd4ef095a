//! `skillbridge discover`: answer a synthetic discovery directive.

use serde_json::{Value, json};

use skillbridge_core::Bridge;
use skillbridge_core::model::MessageId;

use crate::cli::{DiscoverArgs, OutputFormat};
use crate::commands::handle::response_detail;
use crate::error::CliError;
use crate::output;

pub fn handle(
    args: &DiscoverArgs,
    bridge: &Bridge,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let response = bridge.handle(&discovery_directive(args.legacy))?;
    let out = output::render_single(format, &response, response_detail)?;
    output::print_output(&out, quiet)
}

fn discovery_directive(legacy: bool) -> Value {
    let message_id = MessageId::random().to_string();
    if legacy {
        json!({
            "header": {
                "namespace": "Alexa.ConnectedHome.Discovery",
                "name": "DiscoverAppliancesRequest",
                "payloadVersion": "2",
                "messageId": message_id
            },
            "payload": {}
        })
    } else {
        json!({
            "directive": {
                "header": {
                    "namespace": "Alexa.Discovery",
                    "name": "Discover",
                    "payloadVersion": "3",
                    "messageId": message_id
                },
                "payload": {}
            }
        })
    }
}
