use crate::api::VirtualDatacenterOptions;
use crate::context::ApiContext;
use crate::domain::{
    DomainObject, Enterprise, VirtualAppliance, VirtualDatacenter, VirtualMachine, require_id,
    wrap, wrap_all,
};
use crate::error::Result;
use crate::strategy::{ListStrategy, ListVirtualAppliances, ListVirtualDatacenters};
use tracing::debug;

/// Entry point for cloud resources: virtual datacenters, appliances and machines
///
/// Listing goes through the strategies; single lookups call the API
/// directly. Results keep the order the server returned them in.
#[derive(Debug, Clone)]
pub struct CloudService {
    context: ApiContext,
    list_virtual_datacenters: ListVirtualDatacenters,
    list_virtual_appliances: ListVirtualAppliances,
}

impl CloudService {
    pub fn new(context: ApiContext) -> Self {
        Self {
            list_virtual_datacenters: ListVirtualDatacenters::new(context.clone()),
            list_virtual_appliances: ListVirtualAppliances::new(context.clone()),
            context,
        }
    }

    pub fn context(&self) -> &ApiContext {
        &self.context
    }

    /* Virtual datacenters */

    pub async fn list_virtual_datacenters(&self) -> Result<Vec<VirtualDatacenter>> {
        self.list_virtual_datacenters.execute().await
    }

    /// Virtual datacenters owned by `enterprise`
    ///
    /// The enterprise must exist on the server; one without an id is
    /// rejected before any request is sent.
    pub async fn list_virtual_datacenters_for(
        &self,
        enterprise: &Enterprise,
    ) -> Result<Vec<VirtualDatacenter>> {
        let enterprise_id = require_id(enterprise)?;
        let options = VirtualDatacenterOptions::new().with_enterprise(enterprise_id);
        self.list_virtual_datacenters
            .execute_with_options(&options)
            .await
    }

    pub async fn list_virtual_datacenters_matching<F>(
        &self,
        predicate: F,
    ) -> Result<Vec<VirtualDatacenter>>
    where
        F: Fn(&VirtualDatacenter) -> bool + Send + Sync,
    {
        self.list_virtual_datacenters
            .execute_filtered(predicate)
            .await
    }

    /// A single virtual datacenter; `None` if it doesn't exist
    pub async fn get_virtual_datacenter(&self, id: i32) -> Result<Option<VirtualDatacenter>> {
        debug!("Fetching virtual datacenter {}", id);
        self.context
            .api()
            .get_virtual_datacenter(id)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }

    /// Virtual datacenters among `ids`; unknown ids are skipped
    pub async fn get_virtual_datacenters(&self, ids: &[i32]) -> Result<Vec<VirtualDatacenter>> {
        self.list_virtual_datacenters.execute_ids(ids).await
    }

    pub async fn find_virtual_datacenter<F>(
        &self,
        predicate: F,
    ) -> Result<Option<VirtualDatacenter>>
    where
        F: Fn(&VirtualDatacenter) -> bool + Send + Sync,
    {
        Ok(self
            .list_virtual_datacenters_matching(predicate)
            .await?
            .into_iter()
            .next())
    }

    /* Virtual appliances */

    pub async fn list_virtual_appliances(&self) -> Result<Vec<VirtualAppliance>> {
        self.list_virtual_appliances.execute().await
    }

    pub async fn list_virtual_appliances_matching<F>(
        &self,
        predicate: F,
    ) -> Result<Vec<VirtualAppliance>>
    where
        F: Fn(&VirtualAppliance) -> bool + Send + Sync,
    {
        self.list_virtual_appliances.execute_filtered(predicate).await
    }

    pub async fn find_virtual_appliance<F>(&self, predicate: F) -> Result<Option<VirtualAppliance>>
    where
        F: Fn(&VirtualAppliance) -> bool + Send + Sync,
    {
        Ok(self
            .list_virtual_appliances_matching(predicate)
            .await?
            .into_iter()
            .next())
    }

    /* Virtual machines */

    /// Every virtual machine visible to the caller, in one request
    pub async fn list_virtual_machines(&self) -> Result<Vec<VirtualMachine>> {
        let vms = self.context.api().list_all_virtual_machines().await?;
        debug!("Listed {} virtual machines", vms.collection.len());
        wrap_all(&self.context, vms.collection)
    }

    pub async fn list_virtual_machines_matching<F>(
        &self,
        predicate: F,
    ) -> Result<Vec<VirtualMachine>>
    where
        F: Fn(&VirtualMachine) -> bool + Send + Sync,
    {
        let mut vms = self.list_virtual_machines().await?;
        vms.retain(|vm| predicate(vm));
        Ok(vms)
    }

    pub async fn find_virtual_machine<F>(&self, predicate: F) -> Result<Option<VirtualMachine>>
    where
        F: Fn(&VirtualMachine) -> bool + Send + Sync,
    {
        Ok(self
            .list_virtual_machines_matching(predicate)
            .await?
            .into_iter()
            .next())
    }

    /// An enterprise by id; `None` if it doesn't exist
    pub async fn get_enterprise(&self, id: i32) -> Result<Option<Enterprise>> {
        self.context
            .api()
            .get_enterprise(id)
            .await?
            .map(|dto| wrap(&self.context, dto))
            .transpose()
    }
}

/// Identity of a domain object, for callers building id lists
pub fn ids<T: DomainObject>(objects: &[T]) -> Vec<T::Id> {
    objects.iter().filter_map(DomainObject::id).collect()
}
