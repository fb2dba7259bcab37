//! Redshift resource command definitions

use clap::{Args, Subcommand};

/// Flags shared by every command that calls the service
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ResponseArgs {
    /// Emit the raw API response instead of the primary object
    #[arg(long)]
    pub full_response: bool,
}

/// Flags shared by every state-changing command
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MutationArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,

    #[command(flatten)]
    pub response: ResponseArgs,
}

#[derive(Subcommand, Debug)]
pub enum SubnetGroupCommands {
    /// Modify a cluster subnet group's description or subnets
    #[command(after_help = "EXAMPLES:
    redshiftctl subnet-group modify --name private \\
        --subnet-id subnet-0a1b2c --subnet-id subnet-3d4e5f
")]
    Modify {
        /// Cluster subnet group name
        #[arg(long)]
        name: String,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Subnet id; repeat to replace the subnet list
        #[arg(long = "subnet-id", value_name = "ID")]
        subnet_ids: Vec<String>,

        #[command(flatten)]
        mutation: MutationArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum LoggingCommands {
    /// Start audit logging for a cluster
    Enable {
        /// Cluster identifier
        #[arg(long)]
        cluster: String,

        /// S3 bucket receiving the logs
        #[arg(long)]
        bucket: Option<String>,

        /// Key prefix inside the bucket
        #[arg(long)]
        s3_key_prefix: Option<String>,

        /// Log destination
        #[arg(long, value_parser = ["s3", "cloudwatch"])]
        log_destination_type: Option<String>,

        /// Log type to export; repeat for several
        #[arg(
            long = "log-export",
            value_name = "TYPE",
            value_parser = ["connectionlog", "userlog", "useractivitylog"]
        )]
        log_exports: Vec<String>,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Stop audit logging for a cluster
    Disable {
        /// Cluster identifier
        #[arg(long)]
        cluster: String,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Show the audit logging status of a cluster
    Status {
        /// Cluster identifier
        #[arg(long)]
        cluster: String,

        #[command(flatten)]
        response: ResponseArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List event categories
    Categories {
        /// Limit to one source type
        #[arg(
            long,
            value_parser = [
                "cluster",
                "cluster-snapshot",
                "cluster-parameter-group",
                "cluster-security-group",
                "scheduled-action",
            ]
        )]
        source_type: Option<String>,

        #[command(flatten)]
        response: ResponseArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add tags to a resource
    #[command(after_help = "EXAMPLES:
    redshiftctl tag create \\
        --resource-name arn:aws:redshift:us-east-1:123456789012:cluster:analytics \\
        --tag team=data --tag env=prod
")]
    Create {
        /// Resource ARN
        #[arg(long)]
        resource_name: String,

        /// Tag as KEY=VALUE; repeat for several
        #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag, required = true)]
        tags: Vec<(String, String)>,

        /// Print the resource name on success
        #[arg(long)]
        pass_thru: bool,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Remove tags from a resource
    Delete {
        /// Resource ARN
        #[arg(long)]
        resource_name: String,

        /// Tag key to remove; repeat for several
        #[arg(long = "tag-key", value_name = "KEY", required = true)]
        tag_keys: Vec<String>,

        /// Print the resource name on success
        #[arg(long)]
        pass_thru: bool,

        #[command(flatten)]
        mutation: MutationArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReservedNodeCommands {
    /// Purchase a reserved node offering
    Purchase {
        /// Reserved node offering id
        #[arg(long)]
        offering_id: String,

        /// Number of nodes to reserve
        #[arg(long)]
        node_count: Option<i32>,

        #[command(flatten)]
        mutation: MutationArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// Reboot a cluster
    Reboot {
        /// Cluster identifier
        #[arg(long)]
        cluster: String,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Show progress of the latest resize
    #[command(name = "describe-resize")]
    DescribeResize {
        /// Cluster identifier
        #[arg(long)]
        cluster: String,

        #[command(flatten)]
        response: ResponseArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SecurityGroupCommands {
    /// Delete a cluster security group
    Delete {
        /// Cluster security group name
        #[arg(long)]
        name: String,

        /// Print the group name on success
        #[arg(long)]
        pass_thru: bool,

        #[command(flatten)]
        mutation: MutationArgs,
    },
}

/// Parse `KEY=VALUE`; the value may be empty but the key may not
pub fn parse_tag(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid tag '{}': expected KEY=VALUE", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(
            parse_tag("team=data").unwrap(),
            ("team".to_string(), "data".to_string())
        );
        assert_eq!(
            parse_tag("env=").unwrap(),
            ("env".to_string(), String::new())
        );
        assert_eq!(
            parse_tag("url=a=b").unwrap(),
            ("url".to_string(), "a=b".to_string())
        );
        assert!(parse_tag("=data").is_err());
        assert!(parse_tag("team").is_err());
    }
}
