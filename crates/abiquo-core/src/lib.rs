//! # abiquo-core
//!
//! Client binding for the Abiquo cloud management REST API.
//!
//! The crate is layered:
//!
//! - [`api`]: the [`AbiquoApi`] trait, one method per REST operation, and
//!   [`AbiquoClient`], its reqwest implementation. Everything here speaks in
//!   transfer objects from [`dto`].
//! - [`domain`]: transfer objects bound to an [`ApiContext`], with navigation
//!   between related resources. [`domain::wrap`] and [`domain::wrap_all`]
//!   lift raw transfer objects.
//! - [`strategy`]: listing strategies that fetch, wrap and filter
//!   collections.
//! - [`service`]: the [`CloudService`] facade built on the strategies.
//! - [`config`]: connection profiles and credential resolution.
//!
//! ## Example
//!
//! ```rust,no_run
//! use abiquo_core::{AbiquoClient, ApiContext, CloudService, VirtualDatacenter, predicates};
//!
//! # async fn run() -> abiquo_core::Result<()> {
//! let client = AbiquoClient::builder("https://abiquo.example.com/api")
//!     .credentials("admin", "xabiquo")
//!     .build()?;
//! let cloud = CloudService::new(ApiContext::new(client));
//!
//! for vdc in cloud.list_virtual_datacenters().await? {
//!     println!("{}", vdc.name());
//! }
//!
//! let prod = cloud
//!     .find_virtual_datacenter(predicates::name_is::<VirtualDatacenter>("prod"))
//!     .await?;
//! # let _ = prod;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod dto;
pub mod error;
pub mod predicates;
pub mod service;
pub mod strategy;

pub use api::{
    AbiquoApi, AbiquoClient, AbiquoClientBuilder, ApiError, ApiResult, ConversionOptions,
    VirtualDatacenterOptions, VirtualMachineTemplateOptions,
};
pub use config::{Config, ConfigError, Profile};
pub use context::ApiContext;
pub use domain::{
    AcceptedRequest, Conversion, DomainObject, Enterprise, VirtualAppliance, VirtualDatacenter,
    VirtualMachine, VirtualMachineTemplate,
};
pub use error::{CoreError, Result};
pub use service::CloudService;
pub use strategy::{ListStrategy, ListVirtualAppliances, ListVirtualDatacenters};
