//! Listing strategies
//!
//! A strategy knows how to fetch one kind of resource collection and lift it
//! into domain objects. Filtering by predicate or by id happens client side
//! on the full listing, keeping the order the server returned.

mod virtual_appliances;
mod virtual_datacenters;

pub use virtual_appliances::ListVirtualAppliances;
pub use virtual_datacenters::ListVirtualDatacenters;

use crate::domain::DomainObject;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ListStrategy: Send + Sync {
    type Item: DomainObject + Send;

    /// Fetch and wrap every item
    async fn execute(&self) -> Result<Vec<Self::Item>>;

    /// Items satisfying `predicate`, in listing order
    async fn execute_filtered<F>(&self, predicate: F) -> Result<Vec<Self::Item>>
    where
        F: Fn(&Self::Item) -> bool + Send + Sync,
    {
        let mut items = self.execute().await?;
        items.retain(|item| predicate(item));
        Ok(items)
    }

    /// Items whose identity is in `ids`
    ///
    /// Ids with no matching item are ignored. The result follows listing
    /// order, not the order of `ids`.
    async fn execute_ids(
        &self,
        ids: &[<Self::Item as DomainObject>::Id],
    ) -> Result<Vec<Self::Item>> {
        self.execute_filtered(|item| item.id().is_some_and(|id| ids.contains(&id)))
            .await
    }
}
