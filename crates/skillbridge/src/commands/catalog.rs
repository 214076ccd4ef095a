//! `skillbridge catalog`: appliance listing and endpoint projections.

use serde::Serialize;
use tabled::Tabled;

use skillbridge_core::{Appliance, Bridge, Endpoint};

use crate::cli::{CatalogArgs, CatalogCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ApplianceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Reachable")]
    reachable: String,
    #[tabled(rename = "Categories")]
    categories: String,
}

#[derive(Tabled)]
struct CapabilityRow {
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Properties")]
    properties: String,
    #[tabled(rename = "Configuration")]
    configuration: String,
}

/// `catalog show` payload: the stored appliance and its projection.
#[derive(Serialize)]
struct ApplianceDetail<'a> {
    appliance: &'a Appliance,
    endpoint: Endpoint,
}

pub fn handle(
    args: &CatalogArgs,
    bridge: &Bridge,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let catalog = bridge.catalog();
    let out = match &args.command {
        CatalogCommand::List => {
            let appliances: Vec<&Appliance> = catalog.appliances().collect();
            output::render_list(format, &appliances, |a| ApplianceRow {
                id: a.id.to_string(),
                name: a.friendly_name.clone(),
                model: a.model_name.clone(),
                reachable: if a.reachable { "yes" } else { "no" }.into(),
                categories: Endpoint::from(*a)
                    .display_categories
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?
        }
        CatalogCommand::Show { id } => {
            let appliance = catalog.get(id).ok_or_else(|| CliError::EndpointNotFound {
                endpoint_id: id.clone(),
            })?;
            let detail = ApplianceDetail {
                appliance,
                endpoint: Endpoint::from(appliance),
            };
            output::render_single(format, &detail, detail_view)?
        }
    };
    output::print_output(&out, quiet)
}

fn detail_view(detail: &ApplianceDetail<'_>) -> String {
    let a = detail.appliance;
    let pairs = [
        ("ID", a.id.to_string()),
        ("Name", a.friendly_name.clone()),
        ("Description", a.friendly_description.clone()),
        ("Manufacturer", a.manufacturer_name.clone()),
        ("Model", a.model_name.clone()),
        ("Reachable", a.reachable.to_string()),
        (
            "Actions",
            a.actions.iter().cloned().collect::<Vec<_>>().join(", "),
        ),
    ];
    let rows: Vec<CapabilityRow> = detail
        .endpoint
        .capabilities
        .iter()
        .map(|c| CapabilityRow {
            interface: c.interface.to_string(),
            properties: c.supported_properties().join(", "),
            configuration: c
                .configuration
                .as_ref()
                .map(|cfg| {
                    let modes: Vec<String> =
                        cfg.supported_modes.iter().map(ToString::to_string).collect();
                    format!("modes: {}", modes.join("/"))
                })
                .unwrap_or_default(),
        })
        .collect();
    format!(
        "{}\n\n{}",
        output::render_pairs(&pairs),
        output::render_table(&rows)
    )
}
