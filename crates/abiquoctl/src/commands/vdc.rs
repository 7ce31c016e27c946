//! Virtual datacenter command implementations

use crate::cli::{OutputFormat, VdcCommands};
use crate::connection::ConnectionManager;
use crate::error::{AbiquoCtlError, Result as CliResult};
use crate::output::{print_output, print_resources};
use abiquo_core::dto::VirtualDatacenterDto;
use abiquo_core::{DomainObject, VirtualDatacenter, predicates, service};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Serialize)]
struct VdcRow<'a> {
    id: Option<i32>,
    name: &'a str,
    hypervisor: &'a str,
}

fn row(dto: &VirtualDatacenterDto) -> VdcRow<'_> {
    VdcRow {
        id: dto.id,
        name: &dto.name,
        hypervisor: dto.hypervisor_type.as_deref().unwrap_or("-"),
    }
}

pub async fn handle_vdc_command(
    cmd: &VdcCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output_format: OutputFormat,
) -> CliResult<()> {
    let cloud = conn_mgr.cloud_service(profile)?;

    match cmd {
        VdcCommands::List { enterprise, name } => {
            let vdcs = match enterprise {
                Some(enterprise_id) => {
                    let enterprise = cloud
                        .get_enterprise(*enterprise_id)
                        .await?
                        .ok_or_else(|| AbiquoCtlError::not_found("Enterprise", *enterprise_id))?;
                    let mut vdcs = cloud.list_virtual_datacenters_for(&enterprise).await?;
                    if let Some(name) = name {
                        vdcs.retain(predicates::name_is::<VirtualDatacenter>(name.as_str()));
                    }
                    vdcs
                }
                None => match name {
                    Some(name) => {
                        let by_name = predicates::name_is::<VirtualDatacenter>(name.as_str());
                        cloud.list_virtual_datacenters_matching(by_name).await?
                    }
                    None => cloud.list_virtual_datacenters().await?,
                },
            };
            debug!("Listed {} virtual datacenters", vdcs.len());
            print_vdcs(&vdcs, output_format)
        }
        VdcCommands::Get { id } => {
            let vdc = cloud
                .get_virtual_datacenter(*id)
                .await?
                .ok_or_else(|| AbiquoCtlError::not_found("Virtual datacenter", *id))?;
            print_output(vdc.dto(), output_format)?;
            Ok(())
        }
        VdcCommands::GetMany { ids } => {
            let vdcs = cloud.get_virtual_datacenters(ids).await?;
            let found = service::ids(&vdcs);
            for id in ids.iter().filter(|id| !found.contains(id)) {
                warn!("Virtual datacenter {} not found", id);
            }
            print_vdcs(&vdcs, output_format)
        }
        VdcCommands::Appliances { id } => {
            let vdc = cloud
                .get_virtual_datacenter(*id)
                .await?
                .ok_or_else(|| AbiquoCtlError::not_found("Virtual datacenter", *id))?;
            let vapps = vdc.list_virtual_appliances().await?;
            super::vapp::print_vapps(&vapps, output_format)
        }
    }
}

fn print_vdcs(vdcs: &[VirtualDatacenter], output_format: OutputFormat) -> CliResult<()> {
    let dtos: Vec<&VirtualDatacenterDto> = vdcs.iter().map(DomainObject::dto).collect();
    print_resources(&dtos, output_format, |dto| row(*dto))?;
    Ok(())
}
