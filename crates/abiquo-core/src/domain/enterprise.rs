//! Enterprises and their view of the apps library

use super::{
    AcceptedRequest, DomainObject, Named, VirtualMachineTemplate, domain_object, require_id, wrap,
    wrap_all,
};
use crate::api::VirtualMachineTemplateOptions;
use crate::context::ApiContext;
use crate::dto::{
    EnterpriseDto, VirtualMachineTemplatePersistentDto, VirtualMachineTemplateRequestDto,
};
use crate::error::Result;
use tracing::debug;

domain_object!(
    /// A tenant of the platform
    Enterprise,
    EnterpriseDto,
    i32,
    "Enterprise",
    |dto| dto.id
);

impl Enterprise {
    /// A local enterprise that has not been created on the server
    ///
    /// It has no identity, so operations that address it remotely fail with
    /// a validation error.
    pub fn unsaved(context: ApiContext, name: impl Into<String>) -> Self {
        Self::bind(
            context,
            EnterpriseDto {
                name: name.into(),
                ..Default::default()
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn is_reservation_restricted(&self) -> bool {
        self.dto.is_reservation_restricted.unwrap_or(false)
    }

    pub async fn list_templates_in_repository(
        &self,
        datacenter_repository_id: i32,
    ) -> Result<Vec<VirtualMachineTemplate>> {
        self.list_templates_in_repository_with(
            datacenter_repository_id,
            &VirtualMachineTemplateOptions::default(),
        )
        .await
    }

    /// List templates in a repository, filtered server side
    pub async fn list_templates_in_repository_with(
        &self,
        datacenter_repository_id: i32,
        options: &VirtualMachineTemplateOptions,
    ) -> Result<Vec<VirtualMachineTemplate>> {
        let id = require_id(self)?;
        debug!(
            "Listing templates of enterprise {} in repository {}",
            id, datacenter_repository_id
        );
        let templates = self
            .context
            .api()
            .list_virtual_machine_templates(id, datacenter_repository_id, options)
            .await?;
        wrap_all(&self.context, templates.collection)
    }

    pub async fn get_template_in_repository(
        &self,
        datacenter_repository_id: i32,
        template_id: i32,
    ) -> Result<Option<VirtualMachineTemplate>> {
        let id = require_id(self)?;
        self.context
            .api()
            .get_virtual_machine_template(id, datacenter_repository_id, template_id)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }

    /// Download a template definition or promote an instance into the repository
    pub async fn create_template_in_repository(
        &self,
        datacenter_repository_id: i32,
        request: &VirtualMachineTemplateRequestDto,
    ) -> Result<AcceptedRequest> {
        let id = require_id(self)?;
        let accepted = self
            .context
            .api()
            .create_virtual_machine_template(id, datacenter_repository_id, request)
            .await?;
        Ok(AcceptedRequest::from(accepted))
    }

    pub async fn create_persistent_template(
        &self,
        datacenter_repository_id: i32,
        persistent: &VirtualMachineTemplatePersistentDto,
    ) -> Result<AcceptedRequest> {
        let id = require_id(self)?;
        let accepted = self
            .context
            .api()
            .create_persistent_virtual_machine_template(id, datacenter_repository_id, persistent)
            .await?;
        Ok(AcceptedRequest::from(accepted))
    }
}

impl Named for Enterprise {
    fn name(&self) -> &str {
        &self.dto.name
    }
}
