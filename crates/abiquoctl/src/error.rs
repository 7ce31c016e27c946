//! Error types for abiquoctl

use abiquo_core::{ConfigError, CoreError};
use colored::Colorize;
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: virtual datacenter 999 not found
///
///   tip: list available virtual datacenters:
///       abiquoctl vdc list
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for abiquoctl
#[derive(Error, Debug)]
pub enum AbiquoCtlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured")]
    NoProfileConfigured,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

pub type Result<T> = std::result::Result<T, AbiquoCtlError>;

impl AbiquoCtlError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        AbiquoCtlError::NotFound { resource, id }
    }

    /// Helpful next steps for this error
    pub fn suggestions(&self) -> Vec<(String, Vec<String>)> {
        match self {
            AbiquoCtlError::ProfileNotFound { name } => vec![
                (
                    "list available profiles:".to_string(),
                    vec!["abiquoctl profile list".to_string()],
                ),
                (
                    format!("create profile '{}':", name),
                    vec![format!(
                        "abiquoctl profile set {} --url <url> --username <user>",
                        name
                    )],
                ),
            ],
            AbiquoCtlError::NoProfileConfigured => vec![
                (
                    "create a profile:".to_string(),
                    vec!["abiquoctl profile set <name> --url <url> --username <user> --password <password>".to_string()],
                ),
                (
                    "or export ABIQUO_API_URL, ABIQUO_USERNAME and ABIQUO_PASSWORD".to_string(),
                    vec![],
                ),
            ],
            AbiquoCtlError::AuthenticationFailed { .. } => vec![(
                "check the credentials of the profile:".to_string(),
                vec!["abiquoctl profile show <profile>".to_string()],
            )],
            AbiquoCtlError::ConnectionError { message }
                if message.contains("certificate") || message.contains("SSL") =>
            {
                vec![(
                    "for self-signed certificates, mark the profile insecure:".to_string(),
                    vec!["abiquoctl profile set <name> --url <url> --username <user> --insecure"
                        .to_string()],
                )]
            }
            AbiquoCtlError::ConnectionError { .. } => vec![(
                "verify the API endpoint is correct and reachable:".to_string(),
                vec!["abiquoctl profile show <profile>".to_string()],
            )],
            AbiquoCtlError::NotFound { resource, .. } => {
                let listing = match *resource {
                    "Virtual datacenter" => Some("abiquoctl vdc list"),
                    "Virtual machine template" => {
                        Some("abiquoctl template list --enterprise <id> --repository <id>")
                    }
                    _ => None,
                };
                vec![(
                    "verify the id is correct and that you're using the right profile".to_string(),
                    listing.into_iter().map(String::from).collect(),
                )]
            }
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&self.to_string());

        if let AbiquoCtlError::NoProfileConfigured = self {
            diag = diag.detail("No profile was given and none is configured.");
        }

        for (description, commands) in self.suggestions() {
            let commands: Vec<&str> = commands.iter().map(String::as_str).collect();
            diag = diag.tip(&description, &commands);
        }

        diag.print();
    }
}

impl From<CoreError> for AbiquoCtlError {
    fn from(err: CoreError) -> Self {
        if err.is_unauthorized() {
            return AbiquoCtlError::AuthenticationFailed {
                message: err.to_string(),
            };
        }

        match err {
            CoreError::Config(config_err) => AbiquoCtlError::from(config_err),
            CoreError::Transport(abiquo_core::ApiError::Request(request_err)) => {
                AbiquoCtlError::ConnectionError {
                    message: request_err.to_string(),
                }
            }
            err @ CoreError::Validation { .. } => AbiquoCtlError::InvalidInput {
                message: err.to_string(),
            },
            other => AbiquoCtlError::ApiError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for AbiquoCtlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => AbiquoCtlError::ProfileNotFound { name },
            ConfigError::NoProfiles { .. } => AbiquoCtlError::NoProfileConfigured,
            other => AbiquoCtlError::Configuration(other.to_string()),
        }
    }
}

impl From<abiquo_core::ApiError> for AbiquoCtlError {
    fn from(err: abiquo_core::ApiError) -> Self {
        AbiquoCtlError::from(CoreError::from(err))
    }
}

impl From<anyhow::Error> for AbiquoCtlError {
    fn from(err: anyhow::Error) -> Self {
        AbiquoCtlError::OutputError {
            message: format!("{:#}", err),
        }
    }
}
