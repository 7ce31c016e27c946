//! Virtual machine command implementations

use crate::cli::{OutputFormat, VmCommands};
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::print_resources;
use abiquo_core::dto::VirtualMachineDto;
use abiquo_core::{DomainObject, VirtualMachine, predicates};
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct VmRow<'a> {
    id: Option<i32>,
    name: &'a str,
    label: &'a str,
    state: &'a str,
    cpu: Option<i32>,
    ram: Option<i32>,
    node: &'a str,
}

fn row(dto: &VirtualMachineDto) -> VmRow<'_> {
    VmRow {
        id: dto.id,
        name: &dto.name,
        label: dto.label.as_deref().unwrap_or("-"),
        state: dto.state.as_deref().unwrap_or("-"),
        cpu: dto.cpu,
        ram: dto.ram,
        node: dto.node_name.as_deref().unwrap_or("-"),
    }
}

pub async fn handle_vm_command(
    cmd: &VmCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output_format: OutputFormat,
) -> CliResult<()> {
    let cloud = conn_mgr.cloud_service(profile)?;

    match cmd {
        VmCommands::List { name, state } => {
            let by_name = name.clone().map(predicates::name_is::<VirtualMachine>);
            let by_state = state.clone().map(predicates::vm_state);
            let vms = cloud
                .list_virtual_machines_matching(move |vm: &VirtualMachine| {
                    by_name.as_ref().is_none_or(|matches| matches(vm))
                        && by_state.as_ref().is_none_or(|matches| matches(vm))
                })
                .await?;
            debug!("Found {} virtual machines", vms.len());

            let dtos: Vec<&VirtualMachineDto> = vms.iter().map(DomainObject::dto).collect();
            print_resources(&dtos, output_format, |dto| row(*dto))?;
            Ok(())
        }
    }
}
