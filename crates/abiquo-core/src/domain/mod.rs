//! Domain objects
//!
//! A domain object is a transfer object bound to the [`ApiContext`] it was
//! fetched with, so it can navigate to related resources and run mutations
//! without the caller threading the client around.
//!
//! [`wrap`] and [`wrap_all`] lift raw transfer objects into domain objects.
//! The target type is picked at compile time through [`DomainObject`]:
//!
//! ```rust,ignore
//! let vdcs: Vec<VirtualDatacenter> = wrap_all(&context, dto.collection)?;
//! ```
//!
//! Wrapping never touches the network. A transfer object without an identity
//! can't be wrapped and yields [`CoreError::InvalidDto`].

pub mod accepted;
pub mod appslibrary;
pub mod cloud;
pub mod enterprise;

pub use accepted::AcceptedRequest;
pub use appslibrary::{Conversion, VirtualMachineTemplate};
pub use cloud::{VirtualAppliance, VirtualDatacenter, VirtualMachine};
pub use enterprise::Enterprise;

use crate::api::ApiError;
use crate::context::ApiContext;
use crate::dto::{HasLinks, RestLink};
use crate::error::{CoreError, Result};
use std::fmt;

/// A transfer object bound to an API context
pub trait DomainObject: Sized + Send + Sync {
    /// The wire representation
    type Dto: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Identity type; numeric for most resources
    type Id: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Resource name used in error messages
    const RESOURCE: &'static str;

    /// Identity carried by a transfer object, if it has been persisted
    fn dto_id(dto: &Self::Dto) -> Option<Self::Id>;

    /// Bind a transfer object to a context without any validation
    ///
    /// Prefer [`wrap`], which rejects transfer objects lacking an identity.
    fn bind(context: ApiContext, dto: Self::Dto) -> Self;

    /// The underlying transfer object
    fn dto(&self) -> &Self::Dto;

    fn context(&self) -> &ApiContext;

    fn id(&self) -> Option<Self::Id> {
        Self::dto_id(self.dto())
    }
}

/// Wrap one transfer object
pub fn wrap<T: DomainObject>(context: &ApiContext, dto: T::Dto) -> Result<T> {
    if T::dto_id(&dto).is_none() {
        return Err(CoreError::InvalidDto {
            resource: T::RESOURCE,
        });
    }
    Ok(T::bind(context.clone(), dto))
}

/// Wrap every transfer object, keeping their order
///
/// Fails on the first transfer object without an identity.
pub fn wrap_all<T, I>(context: &ApiContext, dtos: I) -> Result<Vec<T>>
where
    T: DomainObject,
    I: IntoIterator<Item = T::Dto>,
{
    dtos.into_iter().map(|dto| wrap(context, dto)).collect()
}

/// Identity of an object that must already exist on the server
pub(crate) fn require_id<T: DomainObject>(object: &T) -> Result<T::Id> {
    object
        .id()
        .ok_or_else(|| CoreError::missing_field(T::RESOURCE, "id"))
}

/// Link with the given relation, or a `MissingLink` transport error
pub(crate) fn require_link<'a>(dto: &'a impl HasLinks, rel: &str) -> Result<&'a RestLink> {
    dto.search_link(rel).ok_or_else(|| {
        ApiError::MissingLink {
            rel: rel.to_string(),
        }
        .into()
    })
}

/// Generates the struct plumbing shared by every domain object: the
/// `DomainObject` impl and identity-based equality.
macro_rules! domain_object {
    ($(#[$meta:meta])* $ty:ident, $dto:ty, $id:ty, $resource:literal, |$d:ident| $id_expr:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            context: $crate::context::ApiContext,
            dto: $dto,
        }

        impl $crate::domain::DomainObject for $ty {
            type Dto = $dto;
            type Id = $id;

            const RESOURCE: &'static str = $resource;

            fn dto_id($d: &$dto) -> Option<$id> {
                $id_expr
            }

            fn bind(context: $crate::context::ApiContext, dto: $dto) -> Self {
                Self { context, dto }
            }

            fn dto(&self) -> &$dto {
                &self.dto
            }

            fn context(&self) -> &$crate::context::ApiContext {
                &self.context
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                use $crate::domain::DomainObject;
                match (self.id(), other.id()) {
                    (Some(a), Some(b)) => a == b,
                    _ => self.dto == other.dto,
                }
            }
        }
    };
}

pub(crate) use domain_object;

/// Types that expose a display name, for name-based predicates
pub trait Named {
    fn name(&self) -> &str;
}
