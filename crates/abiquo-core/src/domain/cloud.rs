//! Cloud resources: virtual datacenters, virtual appliances and virtual machines

use super::{Enterprise, Named, domain_object, require_id, require_link, wrap, wrap_all};
use crate::dto::{HasLinks, VirtualApplianceDto, VirtualDatacenterDto, VirtualMachineDto};
use crate::error::Result;
use tracing::{debug, warn};

domain_object!(
    /// A virtual datacenter: the unit of tenancy on a physical datacenter
    VirtualDatacenter,
    VirtualDatacenterDto,
    i32,
    "VirtualDatacenter",
    |dto| dto.id
);

impl VirtualDatacenter {
    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn hypervisor_type(&self) -> Option<&str> {
        self.dto.hypervisor_type.as_deref()
    }

    /// The owning enterprise, following the `enterprise` link
    ///
    /// `None` when the link is missing or the enterprise no longer exists.
    pub async fn enterprise(&self) -> Result<Option<Enterprise>> {
        let Some(enterprise_id) = self.dto.search_link("enterprise").and_then(|l| l.id()) else {
            warn!(
                "Virtual datacenter {:?} has no usable enterprise link",
                self.dto.id
            );
            return Ok(None);
        };

        debug!("Resolving enterprise {} of virtual datacenter", enterprise_id);
        self.context
            .api()
            .get_enterprise(enterprise_id)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }

    pub async fn list_virtual_appliances(&self) -> Result<Vec<VirtualAppliance>> {
        let id = require_id(self)?;
        let appliances = self.context.api().list_virtual_appliances(id).await?;
        wrap_all(&self.context, appliances.collection)
    }

    pub async fn get_virtual_appliance(&self, id: i32) -> Result<Option<VirtualAppliance>> {
        let vdc_id = require_id(self)?;
        self.context
            .api()
            .get_virtual_appliance(vdc_id, id)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }
}

domain_object!(
    /// A set of virtual machines deployed together inside a virtual datacenter
    VirtualAppliance,
    VirtualApplianceDto,
    i32,
    "VirtualAppliance",
    |dto| dto.id
);

impl VirtualAppliance {
    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn state(&self) -> Option<&str> {
        self.dto.state.as_deref()
    }

    fn virtual_datacenter_id(&self) -> Result<i32> {
        let link = require_link(&self.dto, "virtualdatacenter")?;
        link.id().ok_or_else(|| {
            crate::api::ApiError::MissingLink {
                rel: "virtualdatacenter".to_string(),
            }
            .into()
        })
    }

    /// The parent virtual datacenter; `None` if it was removed meanwhile
    pub async fn virtual_datacenter(&self) -> Result<Option<VirtualDatacenter>> {
        let vdc_id = self.virtual_datacenter_id()?;
        self.context
            .api()
            .get_virtual_datacenter(vdc_id)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }

    pub async fn list_virtual_machines(&self) -> Result<Vec<VirtualMachine>> {
        let id = require_id(self)?;
        let vdc_id = self.virtual_datacenter_id()?;
        let machines = self.context.api().list_virtual_machines(vdc_id, id).await?;
        wrap_all(&self.context, machines.collection)
    }
}

domain_object!(
    VirtualMachine,
    VirtualMachineDto,
    i32,
    "VirtualMachine",
    |dto| dto.id
);

impl VirtualMachine {
    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn label(&self) -> Option<&str> {
        self.dto.label.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.dto.state.as_deref()
    }

    pub fn uuid(&self) -> Option<&str> {
        self.dto.uuid.as_deref()
    }

    /// The appliance this machine belongs to, through the `virtualappliance` link
    pub async fn virtual_appliance(&self) -> Result<Option<VirtualAppliance>> {
        let link = require_link(&self.dto, "virtualappliance")?;
        let (Some(vdc_id), Some(vapp_id)) = (link.id_after("virtualdatacenters"), link.id())
        else {
            warn!("Malformed virtualappliance link: {}", link.href);
            return Ok(None);
        };

        self.context
            .api()
            .get_virtual_appliance(vdc_id, vapp_id)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }
}

impl Named for VirtualDatacenter {
    fn name(&self) -> &str {
        &self.dto.name
    }
}

impl Named for VirtualAppliance {
    fn name(&self) -> &str {
        &self.dto.name
    }
}

impl Named for VirtualMachine {
    fn name(&self) -> &str {
        &self.dto.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockAbiquoApi};
    use crate::context::ApiContext;
    use crate::domain::DomainObject;
    use crate::domain::tests::vdc_dto;
    use crate::dto::{Collection, EnterpriseDto, RestLink};
    use mockall::predicate::eq;

    fn vapp_dto(vdc_id: i32, id: i32, name: &str) -> VirtualApplianceDto {
        VirtualApplianceDto {
            id: Some(id),
            name: name.to_string(),
            links: vec![RestLink::new(
                "virtualdatacenter",
                format!("http://abiquo/api/cloud/virtualdatacenters/{vdc_id}"),
            )],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_vdc_enterprise_follows_link() {
        let mut api = MockAbiquoApi::new();
        api.expect_get_enterprise()
            .with(eq(5))
            .times(1)
            .returning(|id| {
                Ok(Some(EnterpriseDto {
                    id: Some(id),
                    name: "Abiquo".to_string(),
                    ..Default::default()
                }))
            });
        let context = ApiContext::new(api);

        let mut dto = vdc_dto(1, "vdc");
        dto.links.push(RestLink::new(
            "enterprise",
            "http://abiquo/api/admin/enterprises/5",
        ));
        let vdc: VirtualDatacenter = wrap(&context, dto).unwrap();

        let enterprise = vdc.enterprise().await.unwrap().unwrap();
        assert_eq!(enterprise.id(), Some(5));
        assert_eq!(enterprise.name(), "Abiquo");
    }

    #[tokio::test]
    async fn test_vdc_enterprise_without_link_is_none() {
        let context = ApiContext::new(MockAbiquoApi::new());
        let vdc: VirtualDatacenter = wrap(&context, vdc_dto(1, "vdc")).unwrap();
        assert!(vdc.enterprise().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_vdc_lists_its_appliances() {
        let mut api = MockAbiquoApi::new();
        api.expect_list_virtual_appliances()
            .with(eq(3))
            .times(1)
            .returning(|vdc| {
                Ok(Collection::new(vec![
                    vapp_dto(vdc, 10, "web"),
                    vapp_dto(vdc, 11, "db"),
                ]))
            });
        let context = ApiContext::new(api);
        let vdc: VirtualDatacenter = wrap(&context, vdc_dto(3, "vdc")).unwrap();

        let appliances = vdc.list_virtual_appliances().await.unwrap();
        let names: Vec<_> = appliances.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["web", "db"]);
    }

    #[tokio::test]
    async fn test_vdc_get_missing_appliance_is_none() {
        let mut api = MockAbiquoApi::new();
        api.expect_get_virtual_appliance()
            .with(eq(3), eq(99))
            .returning(|_, _| Ok(None));
        let context = ApiContext::new(api);
        let vdc: VirtualDatacenter = wrap(&context, vdc_dto(3, "vdc")).unwrap();

        assert!(vdc.get_virtual_appliance(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unsaved_vdc_fails_validation() {
        let context = ApiContext::new(MockAbiquoApi::new());
        let vdc = VirtualDatacenter::bind(context, VirtualDatacenterDto::default());

        let err = vdc.list_virtual_appliances().await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_vapp_lists_machines_with_parent_id() {
        let mut api = MockAbiquoApi::new();
        api.expect_list_virtual_machines()
            .with(eq(3), eq(10))
            .times(1)
            .returning(|_, _| {
                Ok(Collection::new(vec![VirtualMachineDto {
                    id: Some(100),
                    name: "vm".to_string(),
                    ..Default::default()
                }]))
            });
        let context = ApiContext::new(api);
        let vapp: VirtualAppliance = wrap(&context, vapp_dto(3, 10, "web")).unwrap();

        let machines = vapp.list_virtual_machines().await.unwrap();
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].id(), Some(100));
    }

    #[tokio::test]
    async fn test_vapp_without_parent_link() {
        let context = ApiContext::new(MockAbiquoApi::new());
        let dto = VirtualApplianceDto {
            id: Some(1),
            ..Default::default()
        };
        let vapp: VirtualAppliance = wrap(&context, dto).unwrap();

        let err = vapp.virtual_datacenter().await.unwrap_err();
        assert!(matches!(
            err,
            crate::CoreError::Transport(ApiError::MissingLink { .. })
        ));
    }

    #[tokio::test]
    async fn test_vm_resolves_appliance_from_link() {
        let mut api = MockAbiquoApi::new();
        api.expect_get_virtual_appliance()
            .with(eq(3), eq(10))
            .times(1)
            .returning(|vdc, id| Ok(Some(vapp_dto(vdc, id, "web"))));
        let context = ApiContext::new(api);
        let dto = VirtualMachineDto {
            id: Some(100),
            links: vec![RestLink::new(
                "virtualappliance",
                "http://abiquo/api/cloud/virtualdatacenters/3/virtualappliances/10",
            )],
            ..Default::default()
        };
        let vm: VirtualMachine = wrap(&context, dto).unwrap();

        let vapp = vm.virtual_appliance().await.unwrap().unwrap();
        assert_eq!(vapp.id(), Some(10));
    }
}
