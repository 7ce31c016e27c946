use super::ListStrategy;
use crate::api::VirtualDatacenterOptions;
use crate::context::ApiContext;
use crate::domain::{VirtualDatacenter, wrap_all};
use crate::error::Result;
use async_trait::async_trait;
use tracing::{debug, trace};

/// Lists virtual datacenters, optionally scoped on the server
#[derive(Debug, Clone)]
pub struct ListVirtualDatacenters {
    context: ApiContext,
}

impl ListVirtualDatacenters {
    pub fn new(context: ApiContext) -> Self {
        Self { context }
    }

    /// List virtual datacenters matching server-side options
    ///
    /// Used to scope by enterprise or physical datacenter without fetching
    /// everything.
    pub async fn execute_with_options(
        &self,
        options: &VirtualDatacenterOptions,
    ) -> Result<Vec<VirtualDatacenter>> {
        debug!("Listing virtual datacenters with {:?}", options);
        let vdcs = self
            .context
            .api()
            .list_virtual_datacenters(options)
            .await?;
        trace!("Received {} virtual datacenters", vdcs.collection.len());
        wrap_all(&self.context, vdcs.collection)
    }
}

#[async_trait]
impl ListStrategy for ListVirtualDatacenters {
    type Item = VirtualDatacenter;

    async fn execute(&self) -> Result<Vec<VirtualDatacenter>> {
        self.execute_with_options(&VirtualDatacenterOptions::default())
            .await
    }
}
