//! Virtual appliance command implementations

use crate::cli::{OutputFormat, VappCommands};
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::print_resources;
use abiquo_core::dto::VirtualApplianceDto;
use abiquo_core::{DomainObject, VirtualAppliance, predicates};
use serde::Serialize;

#[derive(Serialize)]
struct VappRow<'a> {
    id: Option<i32>,
    name: &'a str,
    state: &'a str,
}

fn row(dto: &VirtualApplianceDto) -> VappRow<'_> {
    VappRow {
        id: dto.id,
        name: &dto.name,
        state: dto.state.as_deref().unwrap_or("-"),
    }
}

pub async fn handle_vapp_command(
    cmd: &VappCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output_format: OutputFormat,
) -> CliResult<()> {
    let cloud = conn_mgr.cloud_service(profile)?;

    match cmd {
        VappCommands::List { name, state } => {
            let by_name = name.clone().map(predicates::name_is::<VirtualAppliance>);
            let by_state = state.clone().map(predicates::vapp_state);
            let vapps = cloud
                .list_virtual_appliances_matching(move |vapp: &VirtualAppliance| {
                    by_name.as_ref().is_none_or(|matches| matches(vapp))
                        && by_state.as_ref().is_none_or(|matches| matches(vapp))
                })
                .await?;
            print_vapps(&vapps, output_format)
        }
    }
}

pub(crate) fn print_vapps(vapps: &[VirtualAppliance], output_format: OutputFormat) -> CliResult<()> {
    let dtos: Vec<&VirtualApplianceDto> = vapps.iter().map(DomainObject::dto).collect();
    print_resources(&dtos, output_format, |dto| row(*dto))?;
    Ok(())
}
