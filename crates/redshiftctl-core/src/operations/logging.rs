//! EnableLogging, DisableLogging and DescribeLoggingStatus
//!
//! All three return the cluster's logging state as the whole response; there
//! is no narrower payload to extract.

use async_trait::async_trait;

use crate::api::{
    ApiResult, DescribeLoggingStatusRequest, DisableLoggingRequest, EnableLoggingRequest,
    LoggingStatus, RedshiftApi,
};
use crate::context::copy_list;
use crate::operation::{Operation, target_name};

/// Parameters for enabling audit logging on a cluster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnableLoggingParams {
    pub cluster_identifier: Option<String>,
    /// S3 bucket receiving the logs (required for the `s3` destination)
    pub bucket_name: Option<String>,
    pub s3_key_prefix: Option<String>,
    /// `s3` or `cloudwatch`
    pub log_destination_type: Option<String>,
    /// Log types to export: `connectionlog`, `userlog`, `useractivitylog`
    pub log_exports: Option<Vec<String>>,
}

impl EnableLoggingParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cluster_identifier(mut self, cluster: impl Into<String>) -> Self {
        self.cluster_identifier = Some(cluster.into());
        self
    }

    #[must_use]
    pub fn with_bucket_name(mut self, bucket: impl Into<String>) -> Self {
        self.bucket_name = Some(bucket.into());
        self
    }

    #[must_use]
    pub fn with_s3_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.s3_key_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_log_destination_type(mut self, destination: impl Into<String>) -> Self {
        self.log_destination_type = Some(destination.into());
        self
    }

    #[must_use]
    pub fn with_log_exports<I, S>(mut self, exports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log_exports = Some(copy_list(exports));
        self
    }
}

/// Starts logging information about a cluster's connections and user activity
pub struct EnableLogging;

#[async_trait]
impl Operation for EnableLogging {
    const NAME: &'static str = "EnableLogging";
    const MUTATING: bool = true;

    type Params = EnableLoggingParams;
    type Request = EnableLoggingRequest;
    type Response = LoggingStatus;
    type Output = LoggingStatus;

    fn target(params: &Self::Params) -> String {
        target_name(params.cluster_identifier.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        EnableLoggingRequest {
            cluster_identifier: params.cluster_identifier.clone(),
            bucket_name: params.bucket_name.clone(),
            s3_key_prefix: params.s3_key_prefix.clone(),
            log_destination_type: params.log_destination_type.clone(),
            log_exports: params.log_exports.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.enable_logging(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        Some(response.clone())
    }
}

/// Parameters shared by DisableLogging and DescribeLoggingStatus
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterLoggingParams {
    pub cluster_identifier: Option<String>,
}

impl ClusterLoggingParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cluster_identifier(mut self, cluster: impl Into<String>) -> Self {
        self.cluster_identifier = Some(cluster.into());
        self
    }
}

/// Stops logging information about a cluster
pub struct DisableLogging;

#[async_trait]
impl Operation for DisableLogging {
    const NAME: &'static str = "DisableLogging";
    const MUTATING: bool = true;

    type Params = ClusterLoggingParams;
    type Request = DisableLoggingRequest;
    type Response = LoggingStatus;
    type Output = LoggingStatus;

    fn target(params: &Self::Params) -> String {
        target_name(params.cluster_identifier.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        DisableLoggingRequest {
            cluster_identifier: params.cluster_identifier.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.disable_logging(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        Some(response.clone())
    }
}

/// Describes whether information such as queries and connection attempts is being logged
pub struct DescribeLoggingStatus;

#[async_trait]
impl Operation for DescribeLoggingStatus {
    const NAME: &'static str = "DescribeLoggingStatus";
    const MUTATING: bool = false;

    type Params = ClusterLoggingParams;
    type Request = DescribeLoggingStatusRequest;
    type Response = LoggingStatus;
    type Output = LoggingStatus;

    fn target(params: &Self::Params) -> String {
        target_name(params.cluster_identifier.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        DescribeLoggingStatusRequest {
            cluster_identifier: params.cluster_identifier.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.describe_logging_status(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        Some(response.clone())
    }
}
