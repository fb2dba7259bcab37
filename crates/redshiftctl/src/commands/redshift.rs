//! Handlers for the Redshift resource commands
//!
//! Every handler builds typed parameters from the parsed flags and hands them
//! to [`run_operation`], which executes the descriptor and prints the result.

use redshiftctl_core::api::Tag;
use redshiftctl_core::operations::*;
use redshiftctl_core::{Emission, Executor, Operation, ParameterContext, Selection};
use tracing::debug;

use crate::cli::{
    Cli, ClusterCommands, EventCommands, LoggingCommands, MutationArgs, ReservedNodeCommands,
    ResponseArgs, SecurityGroupCommands, SubnetGroupCommands, TagCommands,
};
use crate::connection::ConnectionManager;
use crate::error::{RedshiftCtlError, Result as CliResult};
use crate::output::print_output;
use crate::prompt::TerminalConfirm;

/// Execute one operation and write its emission to stdout
pub async fn run_operation<O: Operation>(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    params: O::Params,
    force: bool,
    response: ResponseArgs,
) -> CliResult<()> {
    let settings = conn_mgr.execution_settings(cli)?;
    let context = ParameterContext::new(params, settings).with_force(force);

    let executor = Executor::new(&conn_mgr.pool, &TerminalConfirm);
    let envelope = executor.execute::<O>(context).await;

    if let Some(request_id) = envelope.request_id() {
        debug!("{} request id: {}", O::NAME, request_id);
    }
    if envelope.is_cancelled() {
        eprintln!("{} on \"{}\" was cancelled", O::NAME, envelope.target());
    }

    let selection = if response.full_response {
        Selection::Response
    } else {
        Selection::Payload
    };

    match envelope.into_emission(selection)? {
        Emission::Value(value) => print_output(value, cli.output, cli.query.as_deref())
            .map_err(|e| RedshiftCtlError::OutputError {
                message: format!("{:#}", e),
            })?,
        Emission::Identifier(identifier) => println!("{}", identifier),
        Emission::Nothing => {}
    }

    Ok(())
}

pub async fn handle_subnet_group_command(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    command: &SubnetGroupCommands,
) -> CliResult<()> {
    match command {
        SubnetGroupCommands::Modify {
            name,
            description,
            subnet_ids,
            mutation,
        } => {
            let mut params =
                ModifyClusterSubnetGroupParams::new().with_cluster_subnet_group_name(name);
            if let Some(description) = description {
                params = params.with_description(description);
            }
            if !subnet_ids.is_empty() {
                params = params.with_subnet_ids(subnet_ids.iter().cloned());
            }
            run_mutation::<ModifyClusterSubnetGroup>(conn_mgr, cli, params, mutation).await
        }
    }
}

pub async fn handle_logging_command(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    command: &LoggingCommands,
) -> CliResult<()> {
    match command {
        LoggingCommands::Enable {
            cluster,
            bucket,
            s3_key_prefix,
            log_destination_type,
            log_exports,
            mutation,
        } => {
            let mut params = EnableLoggingParams::new().with_cluster_identifier(cluster);
            if let Some(bucket) = bucket {
                params = params.with_bucket_name(bucket);
            }
            if let Some(prefix) = s3_key_prefix {
                params = params.with_s3_key_prefix(prefix);
            }
            if let Some(destination) = log_destination_type {
                params = params.with_log_destination_type(destination);
            }
            if !log_exports.is_empty() {
                params = params.with_log_exports(log_exports.iter().cloned());
            }
            run_mutation::<EnableLogging>(conn_mgr, cli, params, mutation).await
        }
        LoggingCommands::Disable { cluster, mutation } => {
            let params = ClusterLoggingParams::new().with_cluster_identifier(cluster);
            run_mutation::<DisableLogging>(conn_mgr, cli, params, mutation).await
        }
        LoggingCommands::Status { cluster, response } => {
            let params = ClusterLoggingParams::new().with_cluster_identifier(cluster);
            run_operation::<DescribeLoggingStatus>(conn_mgr, cli, params, false, *response).await
        }
    }
}

pub async fn handle_event_command(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    command: &EventCommands,
) -> CliResult<()> {
    match command {
        EventCommands::Categories {
            source_type,
            response,
        } => {
            let mut params = DescribeEventCategoriesParams::new();
            if let Some(source_type) = source_type {
                params = params.with_source_type(source_type);
            }
            run_operation::<DescribeEventCategories>(conn_mgr, cli, params, false, *response).await
        }
    }
}

pub async fn handle_tag_command(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    command: &TagCommands,
) -> CliResult<()> {
    match command {
        TagCommands::Create {
            resource_name,
            tags,
            pass_thru,
            mutation,
        } => {
            let params = CreateTagsParams::new()
                .with_resource_name(resource_name)
                .with_tags(tags.iter().map(|(key, value)| Tag::new(key, value)))
                .with_pass_thru(*pass_thru);
            run_mutation::<CreateTags>(conn_mgr, cli, params, mutation).await
        }
        TagCommands::Delete {
            resource_name,
            tag_keys,
            pass_thru,
            mutation,
        } => {
            let params = DeleteTagsParams::new()
                .with_resource_name(resource_name)
                .with_tag_keys(tag_keys.iter().cloned())
                .with_pass_thru(*pass_thru);
            run_mutation::<DeleteTags>(conn_mgr, cli, params, mutation).await
        }
    }
}

pub async fn handle_reserved_node_command(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    command: &ReservedNodeCommands,
) -> CliResult<()> {
    match command {
        ReservedNodeCommands::Purchase {
            offering_id,
            node_count,
            mutation,
        } => {
            let mut params = PurchaseReservedNodeOfferingParams::new()
                .with_reserved_node_offering_id(offering_id);
            if let Some(count) = node_count {
                params = params.with_node_count(*count);
            }
            run_mutation::<PurchaseReservedNodeOffering>(conn_mgr, cli, params, mutation).await
        }
    }
}

pub async fn handle_cluster_command(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    command: &ClusterCommands,
) -> CliResult<()> {
    match command {
        ClusterCommands::Reboot { cluster, mutation } => {
            let params = ClusterParams::new().with_cluster_identifier(cluster);
            run_mutation::<RebootCluster>(conn_mgr, cli, params, mutation).await
        }
        ClusterCommands::DescribeResize { cluster, response } => {
            let params = ClusterParams::new().with_cluster_identifier(cluster);
            run_operation::<DescribeResize>(conn_mgr, cli, params, false, *response).await
        }
    }
}

pub async fn handle_security_group_command(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    command: &SecurityGroupCommands,
) -> CliResult<()> {
    match command {
        SecurityGroupCommands::Delete {
            name,
            pass_thru,
            mutation,
        } => {
            let params = DeleteClusterSecurityGroupParams::new()
                .with_cluster_security_group_name(name)
                .with_pass_thru(*pass_thru);
            run_mutation::<DeleteClusterSecurityGroup>(conn_mgr, cli, params, mutation).await
        }
    }
}

async fn run_mutation<O: Operation>(
    conn_mgr: &ConnectionManager,
    cli: &Cli,
    params: O::Params,
    mutation: &MutationArgs,
) -> CliResult<()> {
    run_operation::<O>(conn_mgr, cli, params, mutation.force, mutation.response).await
}
