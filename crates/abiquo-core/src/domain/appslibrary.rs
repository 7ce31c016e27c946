//! Virtual machine templates and their disk format conversions

use super::{AcceptedRequest, Named, domain_object, wrap, wrap_all};
use crate::api::ConversionOptions;
use crate::dto::{ConversionDto, VirtualMachineTemplateDto};
use crate::error::Result;
use tracing::debug;

domain_object!(
    /// A disk image in a datacenter repository that virtual machines are deployed from
    VirtualMachineTemplate,
    VirtualMachineTemplateDto,
    i32,
    "VirtualMachineTemplate",
    |dto| dto.id
);

impl VirtualMachineTemplate {
    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn description(&self) -> Option<&str> {
        self.dto.description.as_deref()
    }

    pub fn disk_format_type(&self) -> Option<&str> {
        self.dto.disk_format_type.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.dto.state.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.dto.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.dto.description = Some(description.into());
    }

    pub fn set_cost_code(&mut self, cost_code: impl Into<String>) {
        self.dto.cost_code = Some(cost_code.into());
    }

    /// Push local changes and refresh from the server's answer
    pub async fn update(&mut self) -> Result<()> {
        debug!("Updating template {:?}", self.dto.id);
        self.dto = self
            .context
            .api()
            .update_virtual_machine_template(&self.dto)
            .await?;
        Ok(())
    }

    pub async fn delete(self) -> Result<()> {
        debug!("Deleting template {:?}", self.dto.id);
        self.context
            .api()
            .delete_virtual_machine_template(&self.dto)
            .await?;
        Ok(())
    }

    pub async fn list_conversions(&self) -> Result<Vec<Conversion>> {
        self.list_conversions_with(&ConversionOptions::default())
            .await
    }

    /// Conversions compatible with a hypervisor or in a given state
    pub async fn list_conversions_with(
        &self,
        options: &ConversionOptions,
    ) -> Result<Vec<Conversion>> {
        let conversions = self
            .context
            .api()
            .list_conversions(&self.dto, options)
            .await?;
        wrap_all(&self.context, conversions.collection)
    }

    pub async fn get_conversion(&self, target_format: &str) -> Result<Option<Conversion>> {
        self.context
            .api()
            .get_conversion(&self.dto, target_format)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }

    /// Start converting to `target_format`, or retry a failed conversion
    pub async fn request_conversion(&self, target_format: &str) -> Result<AcceptedRequest> {
        let conversion = ConversionDto {
            source_format: self.dto.disk_format_type.clone(),
            target_format: Some(target_format.to_string()),
            ..Default::default()
        };
        debug!(
            "Requesting {} conversion of template {:?}",
            target_format, self.dto.id
        );
        let accepted = self
            .context
            .api()
            .request_conversion(&self.dto, target_format, &conversion)
            .await?;
        Ok(AcceptedRequest::from(accepted))
    }
}

impl Named for VirtualMachineTemplate {
    fn name(&self) -> &str {
        &self.dto.name
    }
}

domain_object!(
    /// A template converted to another disk format, identified by that format
    Conversion,
    ConversionDto,
    String,
    "Conversion",
    |dto| dto.target_format.clone()
);

impl Conversion {
    pub fn source_format(&self) -> Option<&str> {
        self.dto.source_format.as_deref()
    }

    pub fn target_format(&self) -> Option<&str> {
        self.dto.target_format.as_deref()
    }

    pub fn target_path(&self) -> Option<&str> {
        self.dto.target_path.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.dto.state.as_deref()
    }

    pub fn is_failed(&self) -> bool {
        self.state() == Some("FAILED")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockAbiquoApi};
    use crate::context::ApiContext;
    use crate::domain::DomainObject;
    use crate::dto::{AcceptedRequestDto, Collection, RestLink};
    use mockall::predicate::{always, eq, function};

    fn template_dto() -> VirtualMachineTemplateDto {
        VirtualMachineTemplateDto {
            id: Some(9),
            name: "ubuntu".to_string(),
            disk_format_type: Some("VMDK_STREAM_OPTIMIZED".to_string()),
            links: vec![RestLink::new(
                "edit",
                "http://abiquo/api/admin/enterprises/1/datacenterrepositories/2/virtualmachinetemplates/9",
            )],
            ..Default::default()
        }
    }

    fn conversion(format: &str, state: &str) -> ConversionDto {
        ConversionDto {
            target_format: Some(format.to_string()),
            state: Some(state.to_string()),
            ..Default::default()
        }
    }

    fn template(api: MockAbiquoApi) -> VirtualMachineTemplate {
        wrap(&ApiContext::new(api), template_dto()).unwrap()
    }

    #[tokio::test]
    async fn test_update_refreshes_dto() {
        let mut api = MockAbiquoApi::new();
        api.expect_update_virtual_machine_template()
            .withf(|dto| dto.name == "renamed")
            .times(1)
            .returning(|dto| {
                let mut updated = dto.clone();
                updated.state = Some("DONE".to_string());
                Ok(updated)
            });

        let mut template = template(api);
        template.set_name("renamed");
        template.update().await.unwrap();

        assert_eq!(template.name(), "renamed");
        assert_eq!(template.state(), Some("DONE"));
    }

    #[tokio::test]
    async fn test_delete_propagates_transport_errors() {
        let mut api = MockAbiquoApi::new();
        api.expect_delete_virtual_machine_template()
            .times(1)
            .returning(|_| Err(ApiError::http(409, "TEMPLATE-4: template in use")));

        let err = template(api).delete().await.unwrap_err();
        assert!(matches!(
            err,
            crate::CoreError::Transport(ApiError::Http { status: 409, .. })
        ));
    }

    #[tokio::test]
    async fn test_list_conversions_keeps_order() {
        let mut api = MockAbiquoApi::new();
        api.expect_list_conversions()
            .with(always(), eq(ConversionOptions::new().with_state("FAILED")))
            .returning(|_, _| {
                Ok(Collection::new(vec![
                    conversion("VDI_FLAT", "FAILED"),
                    conversion("QCOW2_SPARSE", "FAILED"),
                ]))
            });

        let conversions = template(api)
            .list_conversions_with(&ConversionOptions::new().with_state("FAILED"))
            .await
            .unwrap();

        let formats: Vec<_> = conversions.iter().filter_map(|c| c.id()).collect();
        assert_eq!(formats, ["VDI_FLAT", "QCOW2_SPARSE"]);
        assert!(conversions.iter().all(Conversion::is_failed));
    }

    #[tokio::test]
    async fn test_get_missing_conversion_is_none() {
        let mut api = MockAbiquoApi::new();
        api.expect_get_conversion()
            .with(always(), eq("RAW"))
            .returning(|_, _| Ok(None));

        assert!(template(api).get_conversion("RAW").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_request_conversion_sends_target_format() {
        let mut api = MockAbiquoApi::new();
        api.expect_request_conversion()
            .with(
                always(),
                eq("VDI_FLAT"),
                function(|c: &ConversionDto| {
                    c.target_format.as_deref() == Some("VDI_FLAT")
                        && c.source_format.as_deref() == Some("VMDK_STREAM_OPTIMIZED")
                }),
            )
            .times(1)
            .returning(|_, _, _| {
                Ok(AcceptedRequestDto {
                    entity: None,
                    links: vec![RestLink::new("status", "http://abiquo/api/tasks/1")],
                })
            });

        let accepted = template(api).request_conversion("VDI_FLAT").await.unwrap();
        assert_eq!(accepted.status_link(), Some("http://abiquo/api/tasks/1"));
    }

    #[test]
    fn test_conversion_without_format_is_invalid() {
        let context = ApiContext::new(MockAbiquoApi::new());
        let err = wrap::<Conversion>(&context, ConversionDto::default()).unwrap_err();
        assert!(err.to_string().contains("Conversion"));
    }
}
