//! The Abiquo REST API client
//!
//! [`AbiquoApi`] is the boundary between this crate and the HTTP transport:
//! each method maps to one REST resource operation, takes and returns
//! transfer objects, and reports failures as [`ApiError`]. Single-resource
//! lookups return `None` when the server answers 404.
//!
//! [`AbiquoClient`] is the reqwest-backed implementation. Tests and
//! alternative transports can provide their own implementation.

pub mod client;
pub mod error;
pub mod media_types;
pub mod options;

pub use client::{AbiquoClient, AbiquoClientBuilder};
pub use error::{ApiError, ApiResult};
pub use options::{
    ConversionOptions, VirtualDatacenterOptions, VirtualMachineTemplateOptions, encode_query,
};

use crate::dto::{
    AcceptedRequestDto, ConversionDto, ConversionsDto, EnterpriseDto, VirtualApplianceDto,
    VirtualAppliancesDto, VirtualDatacenterDto, VirtualDatacentersDto, VirtualMachineTemplateDto,
    VirtualMachineTemplatePersistentDto, VirtualMachineTemplateRequestDto,
    VirtualMachineTemplatesDto, VirtualMachinesDto,
};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AbiquoApi: Send + Sync {
    /* Cloud */

    /// List the virtual datacenters visible to the caller, narrowed by `options`
    async fn list_virtual_datacenters(
        &self,
        options: &VirtualDatacenterOptions,
    ) -> ApiResult<VirtualDatacentersDto>;

    async fn get_virtual_datacenter(&self, id: i32) -> ApiResult<Option<VirtualDatacenterDto>>;

    async fn list_virtual_appliances(
        &self,
        virtual_datacenter_id: i32,
    ) -> ApiResult<VirtualAppliancesDto>;

    async fn get_virtual_appliance(
        &self,
        virtual_datacenter_id: i32,
        id: i32,
    ) -> ApiResult<Option<VirtualApplianceDto>>;

    /// List every virtual machine visible to the caller, across all appliances
    async fn list_all_virtual_machines(&self) -> ApiResult<VirtualMachinesDto>;

    async fn list_virtual_machines(
        &self,
        virtual_datacenter_id: i32,
        virtual_appliance_id: i32,
    ) -> ApiResult<VirtualMachinesDto>;

    /* Enterprise */

    async fn get_enterprise(&self, id: i32) -> ApiResult<Option<EnterpriseDto>>;

    /* Virtual machine templates */

    async fn list_virtual_machine_templates(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        options: &VirtualMachineTemplateOptions,
    ) -> ApiResult<VirtualMachineTemplatesDto>;

    async fn get_virtual_machine_template(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        id: i32,
    ) -> ApiResult<Option<VirtualMachineTemplateDto>>;

    /// Update a template through its `edit` link
    async fn update_virtual_machine_template(
        &self,
        template: &VirtualMachineTemplateDto,
    ) -> ApiResult<VirtualMachineTemplateDto>;

    /// Delete a template through its `edit` link
    async fn delete_virtual_machine_template(
        &self,
        template: &VirtualMachineTemplateDto,
    ) -> ApiResult<()>;

    /// Download a template definition or promote a template instance
    async fn create_virtual_machine_template(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        request: &VirtualMachineTemplateRequestDto,
    ) -> ApiResult<AcceptedRequestDto>;

    async fn create_persistent_virtual_machine_template(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        persistent: &VirtualMachineTemplatePersistentDto,
    ) -> ApiResult<AcceptedRequestDto>;

    async fn list_conversions(
        &self,
        template: &VirtualMachineTemplateDto,
        options: &ConversionOptions,
    ) -> ApiResult<ConversionsDto>;

    async fn get_conversion(
        &self,
        template: &VirtualMachineTemplateDto,
        target_format: &str,
    ) -> ApiResult<Option<ConversionDto>>;

    /// Start a V2V conversion to `target_format`, or retry a failed one
    async fn request_conversion(
        &self,
        template: &VirtualMachineTemplateDto,
        target_format: &str,
        conversion: &ConversionDto,
    ) -> ApiResult<AcceptedRequestDto>;
}
