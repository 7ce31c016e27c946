//! The shared API context
//!
//! An [`ApiContext`] bundles the configured API client (which owns the
//! endpoint and credentials). It is built once, never mutated, and cloned
//! into every domain object, strategy and service.

use crate::api::{AbiquoApi, AbiquoClient};
use crate::config::Profile;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ApiContext {
    api: Arc<dyn AbiquoApi>,
}

impl ApiContext {
    /// Wrap any API implementation
    pub fn new(api: impl AbiquoApi + 'static) -> Self {
        Self { api: Arc::new(api) }
    }

    /// Share an already reference-counted API implementation
    pub fn from_arc(api: Arc<dyn AbiquoApi>) -> Self {
        Self { api }
    }

    /// Build an HTTP-backed context from a configuration profile
    ///
    /// Credentials are resolved through the environment and, when enabled,
    /// the OS keyring before the client is created.
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        let credentials = profile.resolve_credentials()?;
        debug!("Creating Abiquo client for {}", credentials.url);

        let client = AbiquoClient::builder(credentials.url)
            .credentials(credentials.username, credentials.password)
            .insecure(credentials.insecure)
            .build()?;

        Ok(Self::new(client))
    }

    /// The API client
    pub fn api(&self) -> &dyn AbiquoApi {
        self.api.as_ref()
    }
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext").finish_non_exhaustive()
    }
}
