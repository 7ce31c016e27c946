//! Configuration management for Abiquo clients
//!
//! Handles configuration loading from files and environment variables.
//! Configuration is stored in TOML format with support for multiple named profiles.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};

/// Environment variable overriding the API endpoint of any profile
pub const ENV_API_URL: &str = "ABIQUO_API_URL";
/// Environment variable overriding the username of any profile
pub const ENV_USERNAME: &str = "ABIQUO_USERNAME";
/// Environment variable overriding the password of any profile
pub const ENV_PASSWORD: &str = "ABIQUO_PASSWORD";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is given explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Connection settings for one Abiquo installation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    /// API root, e.g. `https://abiquo.example.com/api`
    pub url: String,
    pub username: String,
    /// Optional so it can come from the environment or the keyring only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Accept self-signed certificates
    #[serde(default)]
    pub insecure: bool,
}

/// Credentials with environment and keyring references resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCredentials {
    pub url: String,
    pub username: String,
    pub password: String,
    pub insecure: bool,
}

impl Profile {
    pub fn new(url: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: None,
            insecure: false,
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Check if this profile has a stored password
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Get resolved credentials (with environment and keyring support)
    pub fn resolve_credentials(&self) -> Result<ResolvedCredentials> {
        let store = CredentialStore::new();

        // Resolve each credential with environment variable fallback
        let url = store
            .get_credential(&self.url, Some(ENV_API_URL))
            .map_err(|e| ConfigError::CredentialError(format!("Failed to resolve URL: {}", e)))?;
        let username = store
            .get_credential(&self.username, Some(ENV_USERNAME))
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve username: {}", e))
            })?;
        let password = match &self.password {
            Some(p) => store.get_credential(p, Some(ENV_PASSWORD)).map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve password: {}", e))
            })?,
            None => std::env::var(ENV_PASSWORD).map_err(|_| {
                ConfigError::CredentialError(format!(
                    "No password configured and {} is not set",
                    ENV_PASSWORD
                ))
            })?,
        };

        Ok(ResolvedCredentials {
            url,
            username,
            password,
            insecure: self.insecure,
        })
    }
}

impl Config {
    /// Resolve the profile to use
    ///
    /// Explicit name first, then the configured default, then the first
    /// profile alphabetically.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(profile_name) = explicit_profile {
            return Ok(profile_name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| (*name).clone())
            .ok_or_else(|| ConfigError::NoProfiles {
                suggestion: "Use 'abiquoctl profile set' to create a profile.".to_string(),
            })
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        // Expand environment variables in the config content
        let expanded_content = Self::expand_env_vars(&content);

        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        // Profiles may hold plaintext passwords
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(config_path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                ConfigError::SaveError {
                    path: config_path.display().to_string(),
                    source: e,
                }
            })?;
        }

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, this supports both the standard macOS path and Linux-style ~/.config path:
    /// 1. Check ~/.config/abiquoctl/config.toml (Linux-style, preferred for consistency)
    /// 2. Fall back to ~/Library/Application Support/com.abiquo.abiquoctl/config.toml
    ///
    /// On Linux: ~/.config/abiquoctl/config.toml
    /// On Windows: %APPDATA%\abiquo\abiquoctl\config.toml
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("abiquoctl")
                    .join("config.toml");

                if linux_style_path
                    .parent()
                    .map(|p| p.exists())
                    .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("com", "abiquo", "abiquoctl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand environment variables in configuration content
    ///
    /// Supports ${VAR} and ${VAR:-default} syntax. Unset variables without a
    /// default are left as-is so profiles that are never used don't fail.
    ///
    /// Example:
    /// ```toml
    /// password = "${ABIQUO_PROD_PASSWORD}"
    /// url = "${ABIQUO_PROD_URL:-https://abiquo.example.com/api}"
    /// ```
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> Profile {
        Profile::new("https://abiquo.example.com/api", "admin").with_password("xabiquo")
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set_profile("prod".to_string(), make_profile());
        config.default_profile = Some("prod".to_string());

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.default_profile, deserialized.default_profile);
        assert_eq!(deserialized.profiles["prod"], make_profile());
    }

    #[test]
    fn test_profile_defaults() {
        let content = r#"
[profiles.lab]
url = "https://lab/api"
username = "cloudadmin"
"#;
        let config: Config = toml::from_str(content).unwrap();
        let profile = &config.profiles["lab"];
        assert!(!profile.insecure);
        assert!(!profile.has_password());
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_expansion() {
        unsafe {
            std::env::set_var("TEST_ABIQUO_URL", "https://expanded/api");
        }

        let content = r#"
[profiles.test]
url = "${TEST_ABIQUO_URL}"
username = "${TEST_ABIQUO_MISSING_USER}"
"#;

        let expanded = Config::expand_env_vars(content);
        assert!(expanded.contains("https://expanded/api"));
        // Unset variables are kept verbatim
        assert!(expanded.contains("${TEST_ABIQUO_MISSING_USER}"));

        unsafe {
            std::env::remove_var("TEST_ABIQUO_URL");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_expansion_with_defaults() {
        unsafe {
            std::env::remove_var("TEST_ABIQUO_NONEXISTENT");
        }

        let content = r#"url = "${TEST_ABIQUO_NONEXISTENT:-https://default/api}""#;
        let expanded = Config::expand_env_vars(content);
        assert_eq!(expanded, r#"url = "https://default/api""#);
    }

    #[test]
    fn test_profile_resolution_order() {
        let mut config = Config::default();
        config.set_profile("zeta".to_string(), make_profile());
        config.set_profile("alpha".to_string(), make_profile());

        // Explicit wins
        assert_eq!(config.resolve_profile(Some("other")).unwrap(), "other");
        // First alphabetically without a default
        assert_eq!(config.resolve_profile(None).unwrap(), "alpha");

        config.default_profile = Some("zeta".to_string());
        assert_eq!(config.resolve_profile(None).unwrap(), "zeta");
    }

    #[test]
    fn test_no_profile_errors() {
        let config = Config::default();
        let err = config.resolve_profile(None).unwrap_err();
        assert!(matches!(err, ConfigError::NoProfiles { .. }));
        assert!(err.to_string().contains("abiquoctl profile set"));

        let err = config.profile("missing").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound { .. }));
    }

    #[test]
    fn test_remove_default_profile_clears_default() {
        let mut config = Config::default();
        config.set_profile("prod".to_string(), make_profile());
        config.default_profile = Some("prod".to_string());

        assert!(config.remove_profile("prod").is_some());
        assert!(config.default_profile.is_none());
        assert!(config.remove_profile("prod").is_none());
    }

    #[test]
    #[serial_test::serial]
    fn test_resolve_credentials_plaintext() {
        unsafe {
            std::env::remove_var(ENV_API_URL);
            std::env::remove_var(ENV_USERNAME);
            std::env::remove_var(ENV_PASSWORD);
        }

        let resolved = make_profile().with_insecure(true).resolve_credentials().unwrap();
        assert_eq!(
            resolved,
            ResolvedCredentials {
                url: "https://abiquo.example.com/api".to_string(),
                username: "admin".to_string(),
                password: "xabiquo".to_string(),
                insecure: true,
            }
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_resolve_credentials_env_override() {
        unsafe {
            std::env::set_var(ENV_PASSWORD, "from-env");
        }

        let profile = Profile::new("https://abiquo.example.com/api", "admin");
        let resolved = profile.resolve_credentials().unwrap();
        assert_eq!(resolved.password, "from-env");

        unsafe {
            std::env::remove_var(ENV_PASSWORD);
        }

        let err = profile.resolve_credentials().unwrap_err();
        assert!(err.to_string().contains(ENV_PASSWORD));
    }
}
