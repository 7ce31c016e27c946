//! Connection profiles for Abiquo installations
//!
// Nested config module is intentional

#![allow(clippy::module_inception)]
//!
//! Profiles are stored as TOML with `${VAR}` expansion. Each profile holds
//! the API endpoint, the username and an optional password (plaintext or a
//! keyring reference). `ABIQUO_API_URL`, `ABIQUO_USERNAME` and
//! `ABIQUO_PASSWORD` override the stored values at resolution time.

pub mod config;
pub mod credential;
pub mod error;

pub use config::{
    Config, ENV_API_URL, ENV_PASSWORD, ENV_USERNAME, Profile, ResolvedCredentials,
};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
