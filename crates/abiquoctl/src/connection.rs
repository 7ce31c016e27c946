//! Building API contexts from profiles

use crate::error::Result as CliResult;
use abiquo_core::config::{ENV_API_URL, ENV_USERNAME};
use abiquo_core::{ApiContext, CloudService, Config, Profile};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl ConnectionManager {
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> CliResult<()> {
        match &self.config_path {
            Some(path) => self.config.save_to_path(path)?,
            None => self.config.save()?,
        }
        Ok(())
    }

    /// The file profiles are read from and written to
    pub fn effective_config_path(&self) -> CliResult<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Build an API context for the selected profile
    ///
    /// With no profiles configured and no explicit profile, the connection
    /// can come entirely from `ABIQUO_API_URL`, `ABIQUO_USERNAME` and
    /// `ABIQUO_PASSWORD`.
    pub fn context(&self, profile_name: Option<&str>) -> CliResult<ApiContext> {
        if profile_name.is_none()
            && self.config.profiles.is_empty()
            && let Some(profile) = Self::profile_from_env()
        {
            info!("Using Abiquo credentials from environment variables");
            return Ok(ApiContext::from_profile(&profile)?);
        }

        let resolved = self.config.resolve_profile(profile_name)?;
        let profile = self.config.profile(&resolved)?;
        info!("Using profile: {}", resolved);
        debug!("Endpoint: {}", profile.url);

        Ok(ApiContext::from_profile(profile)?)
    }

    pub fn cloud_service(&self, profile_name: Option<&str>) -> CliResult<CloudService> {
        Ok(CloudService::new(self.context(profile_name)?))
    }

    fn profile_from_env() -> Option<Profile> {
        let url = std::env::var(ENV_API_URL).ok()?;
        let username = std::env::var(ENV_USERNAME).ok()?;
        Some(Profile::new(url, username))
    }
}
