//! Cloud and apps library command definitions

use clap::Subcommand;

/// Virtual datacenter commands
#[derive(Subcommand, Debug)]
pub enum VdcCommands {
    /// List virtual datacenters
    #[command(visible_alias = "ls")]
    List {
        /// Only virtual datacenters of this enterprise
        #[arg(long)]
        enterprise: Option<i32>,

        /// Only virtual datacenters with this exact name
        #[arg(long)]
        name: Option<String>,
    },

    /// Get a virtual datacenter by id
    Get {
        /// Virtual datacenter id
        id: i32,
    },

    /// Get several virtual datacenters; unknown ids are skipped
    GetMany {
        /// Virtual datacenter ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i32>,
    },

    /// List the virtual appliances of a virtual datacenter
    Appliances {
        /// Virtual datacenter id
        id: i32,
    },
}

/// Virtual appliance commands
#[derive(Subcommand, Debug)]
pub enum VappCommands {
    /// List virtual appliances across all virtual datacenters
    #[command(visible_alias = "ls")]
    List {
        /// Only appliances with this exact name
        #[arg(long)]
        name: Option<String>,

        /// Only appliances in this state, e.g. DEPLOYED
        #[arg(long)]
        state: Option<String>,
    },
}

/// Virtual machine commands
#[derive(Subcommand, Debug)]
pub enum VmCommands {
    /// List every visible virtual machine
    #[command(visible_alias = "ls")]
    List {
        /// Only machines with this exact name
        #[arg(long)]
        name: Option<String>,

        /// Only machines in this state, e.g. ON
        #[arg(long)]
        state: Option<String>,
    },
}

/// Location of templates: an enterprise and one of its datacenter repositories
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct RepositoryArgs {
    /// Enterprise id
    #[arg(long)]
    pub enterprise: i32,

    /// Datacenter repository id
    #[arg(long)]
    pub repository: i32,
}

/// Virtual machine template commands
#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List templates in a datacenter repository
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        repository: RepositoryArgs,

        /// Only templates compatible with this hypervisor type
        #[arg(long)]
        hypervisor: Option<String>,

        /// Only templates in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Get a template by id
    Get {
        #[command(flatten)]
        repository: RepositoryArgs,

        /// Template id
        id: i32,
    },

    /// List the disk format conversions of a template
    Conversions {
        #[command(flatten)]
        repository: RepositoryArgs,

        /// Template id
        id: i32,

        /// Only conversions compatible with this hypervisor type
        #[arg(long)]
        hypervisor: Option<String>,

        /// Only conversions in this state, e.g. FAILED
        #[arg(long)]
        state: Option<String>,
    },

    /// Request a conversion to another disk format, or retry a failed one
    Convert {
        #[command(flatten)]
        repository: RepositoryArgs,

        /// Template id
        id: i32,

        /// Target disk format, e.g. VMDK_STREAM_OPTIMIZED
        #[arg(long)]
        format: String,
    },

    /// Delete a template
    Delete {
        #[command(flatten)]
        repository: RepositoryArgs,

        /// Template id
        id: i32,
    },
}
