//! Virtual machine template command implementations

use crate::cli::{OutputFormat, RepositoryArgs, TemplateCommands};
use crate::connection::ConnectionManager;
use crate::error::{AbiquoCtlError, Result as CliResult};
use crate::output::{print_output, print_resources};
use abiquo_core::dto::{ConversionDto, VirtualMachineTemplateDto};
use abiquo_core::{
    CloudService, ConversionOptions, DomainObject, Enterprise, VirtualMachineTemplate,
    VirtualMachineTemplateOptions,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Serialize)]
struct TemplateRow<'a> {
    id: Option<i32>,
    name: &'a str,
    disk_format: &'a str,
    cpu: Option<i32>,
    ram: Option<i32>,
    state: &'a str,
}

fn template_row(dto: &VirtualMachineTemplateDto) -> TemplateRow<'_> {
    TemplateRow {
        id: dto.id,
        name: &dto.name,
        disk_format: dto.disk_format_type.as_deref().unwrap_or("-"),
        cpu: dto.cpu_required,
        ram: dto.ram_required,
        state: dto.state.as_deref().unwrap_or("-"),
    }
}

#[derive(Serialize)]
struct ConversionRow<'a> {
    source: &'a str,
    target: &'a str,
    state: &'a str,
    path: &'a str,
}

fn conversion_row(dto: &ConversionDto) -> ConversionRow<'_> {
    ConversionRow {
        source: dto.source_format.as_deref().unwrap_or("-"),
        target: dto.target_format.as_deref().unwrap_or("-"),
        state: dto.state.as_deref().unwrap_or("-"),
        path: dto.target_path.as_deref().unwrap_or("-"),
    }
}

pub async fn handle_template_command(
    cmd: &TemplateCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output_format: OutputFormat,
) -> CliResult<()> {
    let cloud = conn_mgr.cloud_service(profile)?;

    match cmd {
        TemplateCommands::List {
            repository,
            hypervisor,
            category,
        } => {
            let enterprise = enterprise(&cloud, repository).await?;
            let options = VirtualMachineTemplateOptions {
                hypervisor_type: hypervisor.clone(),
                category_name: category.clone(),
                ..Default::default()
            };
            let templates = enterprise
                .list_templates_in_repository_with(repository.repository, &options)
                .await?;
            debug!("Found {} templates", templates.len());

            let dtos: Vec<&VirtualMachineTemplateDto> =
                templates.iter().map(DomainObject::dto).collect();
            print_resources(&dtos, output_format, |dto| template_row(*dto))?;
            Ok(())
        }
        TemplateCommands::Get { repository, id } => {
            let template = template(&cloud, repository, *id).await?;
            print_output(template.dto(), output_format)?;
            Ok(())
        }
        TemplateCommands::Conversions {
            repository,
            id,
            hypervisor,
            state,
        } => {
            let template = template(&cloud, repository, *id).await?;
            let options = ConversionOptions {
                hypervisor_type: hypervisor.clone(),
                state: state.clone(),
            };
            let conversions = template.list_conversions_with(&options).await?;

            let dtos: Vec<&ConversionDto> = conversions.iter().map(DomainObject::dto).collect();
            print_resources(&dtos, output_format, |dto| conversion_row(*dto))?;
            Ok(())
        }
        TemplateCommands::Convert {
            repository,
            id,
            format,
        } => {
            let template = template(&cloud, repository, *id).await?;
            let accepted = template.request_conversion(format).await?;
            info!("Conversion of template {} to {} accepted", id, format);

            match output_format {
                OutputFormat::Json | OutputFormat::Yaml => {
                    print_output(accepted.dto(), output_format)?;
                }
                OutputFormat::Auto | OutputFormat::Table => match accepted.status_link() {
                    Some(status) => println!("Conversion to {} accepted: {}", format, status),
                    None => println!("Conversion to {} accepted", format),
                },
            }
            Ok(())
        }
        TemplateCommands::Delete { repository, id } => {
            let template = template(&cloud, repository, *id).await?;
            let name = template.name().to_string();
            template.delete().await?;
            println!("Template '{}' ({}) deleted", name, id);
            Ok(())
        }
    }
}

async fn enterprise(cloud: &CloudService, repository: &RepositoryArgs) -> CliResult<Enterprise> {
    cloud
        .get_enterprise(repository.enterprise)
        .await?
        .ok_or_else(|| AbiquoCtlError::not_found("Enterprise", repository.enterprise))
}

async fn template(
    cloud: &CloudService,
    repository: &RepositoryArgs,
    id: i32,
) -> CliResult<VirtualMachineTemplate> {
    enterprise(cloud, repository)
        .await?
        .get_template_in_repository(repository.repository, id)
        .await?
        .ok_or_else(|| AbiquoCtlError::not_found("Virtual machine template", id))
}
