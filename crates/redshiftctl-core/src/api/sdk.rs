//! [`RedshiftApi`] backed by `aws-sdk-redshift`
//!
//! The SDK owns the wire protocol, signing, credential and region resolution,
//! and its own retry policy. This module only translates between the plain
//! request/response values in [`super::types`] and the SDK's fluent builders.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_redshift::config::{Credentials, Region};
use aws_sdk_redshift::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_redshift::operation::RequestId;
use aws_sdk_redshift::primitives::DateTime as SdkDateTime;
use aws_sdk_redshift::types as sdk;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, trace};

use super::types::*;
use super::{ApiError, ApiResult, RedshiftApi, Reply};
use crate::context::{CredentialSource, ExecutionSettings};
use crate::error::{CoreError, Result};
use crate::executor::ClientProvider;

/// Provider name reported for credentials supplied by a profile
const CREDENTIALS_PROVIDER_NAME: &str = "redshiftctl-profile";

/// Redshift client bound to one region/credential pair
#[derive(Clone, Debug)]
pub struct SdkRedshiftClient {
    client: aws_sdk_redshift::Client,
}

impl SdkRedshiftClient {
    /// Load SDK configuration for `settings` and build a client
    pub async fn connect(settings: &ExecutionSettings) -> Result<Self> {
        debug!("Creating Redshift client");
        trace!("Execution settings: {:?}", settings);

        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(url) = &settings.endpoint_url {
            debug!("Using endpoint override: {}", url);
            loader = loader.endpoint_url(url);
        }

        match &settings.credentials {
            CredentialSource::Default => {}
            CredentialSource::Profile(name) => {
                loader = loader.profile_name(name);
            }
            CredentialSource::Static {
                access_key_id,
                secret_access_key,
                session_token,
            } => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key_id,
                    secret_access_key,
                    session_token.clone(),
                    None,
                    CREDENTIALS_PROVIDER_NAME,
                ));
            }
        }

        if let Some(retry) = retry_config(settings) {
            loader = loader.retry_config(retry);
        }

        if let Some(timeout) = settings.operation_timeout {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(timeout)
                    .build(),
            );
        }

        let sdk_config = loader.load().await;

        let Some(region) = sdk_config.region() else {
            return Err(CoreError::Client(
                "no region configured; pass --region, set REDSHIFTCTL_REGION or AWS_REGION, \
                 or add a region to the profile"
                    .to_string(),
            ));
        };

        info!(
            "Connecting to Redshift in {} using {}",
            region,
            settings.credentials.describe()
        );

        Ok(Self {
            client: aws_sdk_redshift::Client::new(&sdk_config),
        })
    }
}

fn retry_config(settings: &ExecutionSettings) -> Option<RetryConfig> {
    match settings.max_attempts {
        None => settings
            .initial_backoff
            .map(|backoff| RetryConfig::standard().with_initial_backoff(backoff)),
        Some(0) | Some(1) => Some(RetryConfig::disabled()),
        Some(attempts) => {
            let mut config = RetryConfig::standard().with_max_attempts(attempts);
            if let Some(backoff) = settings.initial_backoff {
                config = config.with_initial_backoff(backoff);
            }
            Some(config)
        }
    }
}

/// Map an SDK failure onto the client seam's error type
fn classify<E, R>(err: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::ServiceError(context) => {
            let service = context.err();
            ApiError::Service {
                code: service.code().unwrap_or("Unknown").to_string(),
                message: service
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| service.to_string()),
            }
        }
        SdkError::DispatchFailure(_) => ApiError::Transport {
            message: DisplayErrorContext(&err).to_string(),
        },
        SdkError::TimeoutError(_) => ApiError::Timeout {
            message: DisplayErrorContext(&err).to_string(),
        },
        _ => ApiError::Other {
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}

/// Scalar getters are `T` or `Option<T>` depending on the member's modeled nullability
fn scalar<T, V: Into<Option<T>>>(value: V) -> Option<T> {
    value.into()
}

fn timestamp(value: Option<&SdkDateTime>) -> Option<DateTime<Utc>> {
    value.and_then(|dt| DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos()))
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn to_sdk_tag(tag: Tag) -> sdk::Tag {
    sdk::Tag::builder()
        .set_key(tag.key)
        .set_value(tag.value)
        .build()
}

fn from_sdk_tag(tag: &sdk::Tag) -> Tag {
    Tag {
        key: owned(tag.key()),
        value: owned(tag.value()),
    }
}

fn from_sdk_subnet_group(group: &sdk::ClusterSubnetGroup) -> ClusterSubnetGroup {
    ClusterSubnetGroup {
        cluster_subnet_group_name: owned(group.cluster_subnet_group_name()),
        description: owned(group.description()),
        vpc_id: owned(group.vpc_id()),
        subnet_group_status: owned(group.subnet_group_status()),
        subnets: group
            .subnets()
            .iter()
            .map(|subnet| Subnet {
                subnet_identifier: owned(subnet.subnet_identifier()),
                availability_zone: subnet
                    .subnet_availability_zone()
                    .and_then(|zone| owned(zone.name())),
                subnet_status: owned(subnet.subnet_status()),
            })
            .collect(),
        tags: group.tags().iter().map(from_sdk_tag).collect(),
    }
}

fn from_sdk_reserved_node(node: &sdk::ReservedNode) -> ReservedNode {
    ReservedNode {
        reserved_node_id: owned(node.reserved_node_id()),
        reserved_node_offering_id: owned(node.reserved_node_offering_id()),
        node_type: owned(node.node_type()),
        start_time: timestamp(node.start_time()),
        duration: scalar(node.duration()),
        fixed_price: scalar(node.fixed_price()),
        usage_price: scalar(node.usage_price()),
        currency_code: owned(node.currency_code()),
        node_count: scalar(node.node_count()),
        state: owned(node.state()),
        offering_type: owned(node.offering_type()),
    }
}

fn from_sdk_cluster(cluster: &sdk::Cluster) -> Cluster {
    Cluster {
        cluster_identifier: owned(cluster.cluster_identifier()),
        node_type: owned(cluster.node_type()),
        cluster_status: owned(cluster.cluster_status()),
        cluster_availability_status: owned(cluster.cluster_availability_status()),
        db_name: owned(cluster.db_name()),
        master_username: owned(cluster.master_username()),
        number_of_nodes: scalar(cluster.number_of_nodes()),
        vpc_id: owned(cluster.vpc_id()),
        availability_zone: owned(cluster.availability_zone()),
        endpoint: cluster.endpoint().map(|endpoint| ClusterEndpoint {
            address: owned(endpoint.address()),
            port: scalar(endpoint.port()),
        }),
    }
}

macro_rules! logging_status {
    ($output:expr) => {{
        let output = &$output;
        LoggingStatus {
            logging_enabled: scalar(output.logging_enabled()),
            bucket_name: owned(output.bucket_name()),
            s3_key_prefix: owned(output.s3_key_prefix()),
            last_successful_delivery_time: timestamp(output.last_successful_delivery_time()),
            last_failure_time: timestamp(output.last_failure_time()),
            last_failure_message: owned(output.last_failure_message()),
            log_destination_type: output
                .log_destination_type()
                .map(|kind| kind.as_str().to_string()),
            log_exports: output.log_exports().to_vec(),
        }
    }};
}

#[async_trait]
impl RedshiftApi for SdkRedshiftClient {
    async fn modify_cluster_subnet_group(
        &self,
        request: ModifyClusterSubnetGroupRequest,
    ) -> ApiResult<ModifyClusterSubnetGroupResponse> {
        let output = self
            .client
            .modify_cluster_subnet_group()
            .set_cluster_subnet_group_name(request.cluster_subnet_group_name)
            .set_description(request.description)
            .set_subnet_ids(request.subnet_ids)
            .send()
            .await
            .map_err(classify)?;

        let body = ModifyClusterSubnetGroupResponse {
            cluster_subnet_group: output.cluster_subnet_group().map(from_sdk_subnet_group),
        };
        Ok(Reply::new(body).with_request_id(output.request_id()))
    }

    async fn enable_logging(&self, request: EnableLoggingRequest) -> ApiResult<LoggingStatus> {
        let output = self
            .client
            .enable_logging()
            .set_cluster_identifier(request.cluster_identifier)
            .set_bucket_name(request.bucket_name)
            .set_s3_key_prefix(request.s3_key_prefix)
            .set_log_destination_type(
                request
                    .log_destination_type
                    .map(|kind| sdk::LogDestinationType::from(kind.as_str())),
            )
            .set_log_exports(request.log_exports)
            .send()
            .await
            .map_err(classify)?;

        Ok(Reply::new(logging_status!(output)).with_request_id(output.request_id()))
    }

    async fn disable_logging(&self, request: DisableLoggingRequest) -> ApiResult<LoggingStatus> {
        let output = self
            .client
            .disable_logging()
            .set_cluster_identifier(request.cluster_identifier)
            .send()
            .await
            .map_err(classify)?;

        Ok(Reply::new(logging_status!(output)).with_request_id(output.request_id()))
    }

    async fn describe_logging_status(
        &self,
        request: DescribeLoggingStatusRequest,
    ) -> ApiResult<LoggingStatus> {
        let output = self
            .client
            .describe_logging_status()
            .set_cluster_identifier(request.cluster_identifier)
            .send()
            .await
            .map_err(classify)?;

        Ok(Reply::new(logging_status!(output)).with_request_id(output.request_id()))
    }

    async fn describe_event_categories(
        &self,
        request: DescribeEventCategoriesRequest,
    ) -> ApiResult<DescribeEventCategoriesResponse> {
        let output = self
            .client
            .describe_event_categories()
            .set_source_type(request.source_type)
            .send()
            .await
            .map_err(classify)?;

        let body = DescribeEventCategoriesResponse {
            event_categories_map_list: output
                .event_categories_map_list()
                .iter()
                .map(|map| EventCategoriesMap {
                    source_type: owned(map.source_type()),
                    events: map
                        .events()
                        .iter()
                        .map(|event| EventInfoMap {
                            event_id: owned(event.event_id()),
                            event_categories: event.event_categories().to_vec(),
                            event_description: owned(event.event_description()),
                            severity: owned(event.severity()),
                        })
                        .collect(),
                })
                .collect(),
        };
        Ok(Reply::new(body).with_request_id(output.request_id()))
    }

    async fn create_tags(&self, request: CreateTagsRequest) -> ApiResult<EmptyResponse> {
        let output = self
            .client
            .create_tags()
            .set_resource_name(request.resource_name)
            .set_tags(
                request
                    .tags
                    .map(|tags| tags.into_iter().map(to_sdk_tag).collect()),
            )
            .send()
            .await
            .map_err(classify)?;

        Ok(Reply::new(EmptyResponse::default()).with_request_id(output.request_id()))
    }

    async fn delete_tags(&self, request: DeleteTagsRequest) -> ApiResult<EmptyResponse> {
        let output = self
            .client
            .delete_tags()
            .set_resource_name(request.resource_name)
            .set_tag_keys(request.tag_keys)
            .send()
            .await
            .map_err(classify)?;

        Ok(Reply::new(EmptyResponse::default()).with_request_id(output.request_id()))
    }

    async fn purchase_reserved_node_offering(
        &self,
        request: PurchaseReservedNodeOfferingRequest,
    ) -> ApiResult<PurchaseReservedNodeOfferingResponse> {
        let output = self
            .client
            .purchase_reserved_node_offering()
            .set_reserved_node_offering_id(request.reserved_node_offering_id)
            .set_node_count(request.node_count)
            .send()
            .await
            .map_err(classify)?;

        let body = PurchaseReservedNodeOfferingResponse {
            reserved_node: output.reserved_node().map(from_sdk_reserved_node),
        };
        Ok(Reply::new(body).with_request_id(output.request_id()))
    }

    async fn reboot_cluster(
        &self,
        request: RebootClusterRequest,
    ) -> ApiResult<RebootClusterResponse> {
        let output = self
            .client
            .reboot_cluster()
            .set_cluster_identifier(request.cluster_identifier)
            .send()
            .await
            .map_err(classify)?;

        let body = RebootClusterResponse {
            cluster: output.cluster().map(from_sdk_cluster),
        };
        Ok(Reply::new(body).with_request_id(output.request_id()))
    }

    async fn delete_cluster_security_group(
        &self,
        request: DeleteClusterSecurityGroupRequest,
    ) -> ApiResult<EmptyResponse> {
        let output = self
            .client
            .delete_cluster_security_group()
            .set_cluster_security_group_name(request.cluster_security_group_name)
            .send()
            .await
            .map_err(classify)?;

        Ok(Reply::new(EmptyResponse::default()).with_request_id(output.request_id()))
    }

    async fn describe_resize(&self, request: DescribeResizeRequest) -> ApiResult<ResizeProgress> {
        let output = self
            .client
            .describe_resize()
            .set_cluster_identifier(request.cluster_identifier)
            .send()
            .await
            .map_err(classify)?;

        let body = ResizeProgress {
            target_node_type: owned(output.target_node_type()),
            target_number_of_nodes: scalar(output.target_number_of_nodes()),
            target_cluster_type: owned(output.target_cluster_type()),
            status: owned(output.status()),
            import_tables_completed: output.import_tables_completed().to_vec(),
            import_tables_in_progress: output.import_tables_in_progress().to_vec(),
            import_tables_not_started: output.import_tables_not_started().to_vec(),
            avg_resize_rate_in_mega_bytes_per_second: scalar(
                output.avg_resize_rate_in_mega_bytes_per_second(),
            ),
            total_resize_data_in_mega_bytes: scalar(output.total_resize_data_in_mega_bytes()),
            progress_in_mega_bytes: scalar(output.progress_in_mega_bytes()),
            elapsed_time_in_seconds: scalar(output.elapsed_time_in_seconds()),
            estimated_time_to_completion_in_seconds: scalar(
                output.estimated_time_to_completion_in_seconds(),
            ),
            resize_type: owned(output.resize_type()),
            message: owned(output.message()),
            target_encryption_type: owned(output.target_encryption_type()),
            data_transfer_progress_percent: scalar(output.data_transfer_progress_percent()),
        };
        Ok(Reply::new(body).with_request_id(output.request_id()))
    }
}

/// Caller-owned cache of SDK clients, one per distinct [`ExecutionSettings`]
#[derive(Default)]
pub struct SdkClientPool {
    clients: Mutex<HashMap<ExecutionSettings, Arc<dyn RedshiftApi>>>,
}

impl SdkClientPool {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientProvider for SdkClientPool {
    async fn client(&self, settings: &ExecutionSettings) -> Result<Arc<dyn RedshiftApi>> {
        let mut clients = self.clients.lock().await;

        if let Some(client) = clients.get(settings) {
            trace!("Reusing cached Redshift client");
            return Ok(Arc::clone(client));
        }

        let client: Arc<dyn RedshiftApi> = Arc::new(SdkRedshiftClient::connect(settings).await?);
        clients.insert(settings.clone(), Arc::clone(&client));
        Ok(client)
    }
}
