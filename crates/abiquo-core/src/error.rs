//! Unified error handling for abiquo-core
//!
//! Wraps transport and configuration errors with consistent helper methods.
//!
//! # Example
//!
//! ```rust
//! use abiquo_core::{ApiError, CoreError};
//!
//! fn handle_error(err: CoreError) {
//!     if err.is_not_found() {
//!         println!("Resource not found");
//!     } else if err.is_validation() {
//!         println!("Fix the input and try again");
//!     }
//! }
//!
//! // Transport errors are automatically converted
//! let core_err: CoreError = ApiError::http(404, "VDC-4: not found").into();
//! assert!(core_err.is_not_found());
//! ```

use crate::api::ApiError;
use crate::config::ConfigError;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required input is missing; raised before any network call
    #[error("Missing required field {field} in {resource}")]
    Validation {
        resource: &'static str,
        field: &'static str,
    },

    /// The underlying API call failed; propagated unchanged
    #[error("Abiquo API error: {0}")]
    Transport(#[from] ApiError),

    /// A transfer object lacks its identity (upstream contract violation)
    #[error("Invalid {resource} transfer object: missing identity")]
    InvalidDto { resource: &'static str },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub(crate) fn missing_field(resource: &'static str, field: &'static str) -> Self {
        CoreError::Validation { resource, field }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::Transport(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CoreError::Transport(e) => e.is_unauthorized(),
            _ => false,
        }
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        match self {
            CoreError::Transport(e) => e.is_server_error(),
            _ => false,
        }
    }

    /// Returns true if this is a timeout error
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            CoreError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Returns true if the caller supplied incomplete input
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation { .. })
    }
}
