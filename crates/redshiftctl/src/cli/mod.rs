//! CLI structure and command definitions
//!
//! Resource commands (`subnet-group`, `logging`, `tag`, ...) each map to one
//! Redshift API operation. `profile`, `version` and `completions` are local.

use clap::{Parser, Subcommand};

pub mod redshift;

pub use redshift::*;

/// Amazon Redshift management CLI
#[derive(Parser, Debug)]
#[command(name = "redshiftctl")]
#[command(version, about = "Amazon Redshift management CLI")]
#[command(long_about = "
Amazon Redshift management CLI

Every resource command performs exactly one Redshift API call. Commands that
change state ask for confirmation first; pass --force to skip the prompt.

EXAMPLES:
    # Set up a profile that uses a shared AWS profile
    redshiftctl profile set prod --region us-east-1 --aws-profile prod-admin

    # Reboot a cluster without prompting
    redshiftctl cluster reboot --cluster analytics --force

    # Check resize progress as YAML
    redshiftctl cluster describe-resize --cluster analytics -o yaml

    # Filter output with JMESPath
    redshiftctl event categories -q '[?SourceType==`cluster`].Events[].EventId'

For more help on a specific command, run:
    redshiftctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "REDSHIFTCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "REDSHIFTCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// AWS region (overrides the profile)
    #[arg(long, global = true, env = "REDSHIFTCTL_REGION")]
    pub region: Option<String>,

    /// Service endpoint URL (overrides the profile)
    #[arg(long, global = true, env = "REDSHIFTCTL_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable SDK retries
    #[arg(long, global = true)]
    pub no_retry: bool,

    /// Override total SDK attempts (re-enables retries)
    #[arg(long, global = true)]
    pub retry_attempts: Option<u32>,

    /// Overall operation timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON for operation results, human-readable text for local commands
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
    /// Cluster subnet group operations
    #[command(subcommand, name = "subnet-group")]
    SubnetGroup(SubnetGroupCommands),

    /// Audit logging operations
    #[command(subcommand)]
    Logging(LoggingCommands),

    /// Event metadata
    #[command(subcommand)]
    Event(EventCommands),

    /// Resource tagging
    #[command(subcommand)]
    Tag(TagCommands),

    /// Reserved node purchases
    #[command(subcommand, name = "reserved-node")]
    ReservedNode(ReservedNodeCommands),

    /// Cluster operations
    #[command(subcommand)]
    Cluster(ClusterCommands),

    /// Cluster security group operations
    #[command(subcommand, name = "security-group")]
    SecurityGroup(SecurityGroupCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    Profile(ProfileCommands),

    /// Version information
    #[command(visible_alias = "ver")]
    Version,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    Elvish,
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    #[command(visible_alias = "get")]
    Show {
        /// Profile name to show
        name: String,
    },

    /// Set or create a profile
    #[command(visible_alias = "add")]
    #[command(after_help = "EXAMPLES:
    # Use a profile from ~/.aws/config
    redshiftctl profile set prod --region us-east-1 --aws-profile prod-admin

    # Static keys against a local endpoint
    redshiftctl profile set local --region us-east-1 \\
        --endpoint-url http://localhost:4566 \\
        --access-key-id test --secret-access-key test

    # Fail fast: no SDK retries, 30 second timeout
    redshiftctl profile set ci --region us-west-2 --no-retry --timeout 30
")]
    Set {
        /// Profile name
        name: String,

        /// AWS region
        #[arg(long)]
        region: Option<String>,

        /// Service endpoint override
        #[arg(long)]
        endpoint_url: Option<String>,

        /// Named profile from the shared AWS config files
        #[arg(long, conflicts_with_all = ["access_key_id", "secret_access_key"])]
        aws_profile: Option<String>,

        /// Static access key id
        #[arg(long, requires = "secret_access_key")]
        access_key_id: Option<String>,

        /// Static secret access key
        #[arg(long, requires = "access_key_id")]
        secret_access_key: Option<String>,

        /// Session token for temporary credentials
        #[arg(long, requires = "access_key_id")]
        session_token: Option<String>,

        /// Disable SDK retries for this profile
        #[arg(long)]
        no_retry: bool,

        /// Total SDK attempts for this profile
        #[arg(long, conflicts_with = "no_retry")]
        retry_attempts: Option<u32>,

        /// Overall operation timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Store secrets in the OS keyring
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile name to remove
        name: String,
    },

    /// Set the default profile
    Default {
        /// Profile name to use by default
        name: String,
    },
}
