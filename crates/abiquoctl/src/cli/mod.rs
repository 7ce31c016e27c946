//! CLI structure and command definitions

use clap::{Parser, Subcommand};

pub mod cloud;

pub use cloud::*;

/// Command line client for the Abiquo cloud management API
#[derive(Parser, Debug)]
#[command(name = "abiquoctl")]
#[command(version, about = "Command line client for the Abiquo cloud management API")]
#[command(long_about = "
Command line client for the Abiquo cloud management API

EXAMPLES:
    # Set up a profile
    abiquoctl profile set prod --url https://abiquo.example.com/api --username admin --password xabiquo

    # List virtual datacenters of an enterprise
    abiquoctl vdc list --enterprise 42

    # Find powered-on virtual machines, as JSON
    abiquoctl vm list --state ON -o json

    # Templates in a datacenter repository
    abiquoctl template list --enterprise 1 --repository 2 --hypervisor KVM

Credentials can also come from ABIQUO_API_URL, ABIQUO_USERNAME and
ABIQUO_PASSWORD, which override the selected profile.
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "ABIQUOCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "ABIQUOCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table for humans
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Virtual datacenter operations
    #[command(subcommand, visible_alias = "virtualdatacenter")]
    Vdc(VdcCommands),

    /// Virtual appliance operations
    #[command(subcommand, visible_alias = "virtualappliance")]
    Vapp(VappCommands),

    /// Virtual machine operations
    #[command(subcommand, visible_alias = "virtualmachine")]
    Vm(VmCommands),

    /// Virtual machine template operations
    #[command(subcommand, visible_alias = "tpl")]
    Template(TemplateCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    Profile(ProfileCommands),

    /// Version information
    #[command(visible_alias = "ver")]
    Version,
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show the path of the configuration file
    Path,

    /// Show profile details
    #[command(visible_alias = "get")]
    Show {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    #[command(after_help = "EXAMPLES:
    # Plaintext password
    abiquoctl profile set prod --url https://abiquo.example.com/api --username admin --password xabiquo

    # Password from the environment at runtime
    abiquoctl profile set lab --url https://lab/api --username admin --insecure
")]
    Set {
        /// Profile name
        name: String,

        /// API endpoint, e.g. https://abiquo.example.com/api
        #[arg(long)]
        url: String,

        /// Username
        #[arg(long)]
        username: String,

        /// Password; omit to read ABIQUO_PASSWORD at runtime
        #[arg(long)]
        password: Option<String>,

        /// Accept self-signed certificates
        #[arg(long)]
        insecure: bool,

        /// Store the password in the OS keyring
        #[cfg(feature = "secure-storage")]
        #[arg(long, requires = "password")]
        use_keyring: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile name
        name: String,
    },

    /// Set the default profile
    Default {
        /// Profile name
        name: String,
    },
}
