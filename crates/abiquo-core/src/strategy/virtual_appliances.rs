use super::{ListStrategy, ListVirtualDatacenters};
use crate::context::ApiContext;
use crate::domain::{VirtualAppliance, VirtualDatacenter};
use crate::error::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::debug;

/// Lists virtual appliances across every visible virtual datacenter
///
/// Appliances of each datacenter are fetched concurrently; the result is in
/// datacenter order, then appliance order.
#[derive(Debug, Clone)]
pub struct ListVirtualAppliances {
    virtual_datacenters: ListVirtualDatacenters,
}

impl ListVirtualAppliances {
    pub fn new(context: ApiContext) -> Self {
        Self {
            virtual_datacenters: ListVirtualDatacenters::new(context),
        }
    }

    /// Appliances of a single virtual datacenter
    pub async fn execute_in(&self, parent: &VirtualDatacenter) -> Result<Vec<VirtualAppliance>> {
        parent.list_virtual_appliances().await
    }
}

#[async_trait]
impl ListStrategy for ListVirtualAppliances {
    type Item = VirtualAppliance;

    async fn execute(&self) -> Result<Vec<VirtualAppliance>> {
        let vdcs = self.virtual_datacenters.execute().await?;
        debug!("Listing virtual appliances of {} virtual datacenters", vdcs.len());

        let per_vdc = try_join_all(vdcs.iter().map(|vdc| self.execute_in(vdc))).await?;
        Ok(per_vdc.into_iter().flatten().collect())
    }
}
