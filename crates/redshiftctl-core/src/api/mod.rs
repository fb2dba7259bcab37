//! Remote Redshift client seam
//!
//! [`RedshiftApi`] exposes one async method per supported operation. Requests
//! and responses are the plain value types from [`types`]; the production
//! implementation in [`sdk`] translates them to and from `aws-sdk-redshift`.

pub mod sdk;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use sdk::{SdkClientPool, SdkRedshiftClient};
pub use types::*;

/// Errors surfaced by a [`RedshiftApi`] implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The service answered with an error response
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The request could not be delivered (connect, DNS, TLS, I/O)
    #[error("{message}")]
    Transport { message: String },

    /// The request or an attempt timed out
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// Anything else the client reported (request construction, unparseable response)
    #[error("{message}")]
    Other { message: String },
}

impl ApiError {
    /// Returns true when a transport failure was caused by host name resolution
    #[must_use]
    pub fn is_name_resolution(&self) -> bool {
        const MARKERS: &[&str] = &[
            "dns error",
            "failed to lookup address",
            "name resolution",
            "name or service not known",
            "nodename nor servname",
            "no such host",
            "temporary failure in name resolution",
        ];

        match self {
            ApiError::Transport { message } => {
                let message = message.to_lowercase();
                MARKERS.iter().any(|marker| message.contains(marker))
            }
            _ => false,
        }
    }
}

/// A successful response body plus transport metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub body: T,
    pub request_id: Option<String>,
}

impl<T> Reply<T> {
    pub fn new(body: T) -> Self {
        Self {
            body,
            request_id: None,
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<&str>) -> Self {
        self.request_id = request_id.map(str::to_string);
        self
    }
}

/// Result returned by every [`RedshiftApi`] method
pub type ApiResult<T> = std::result::Result<Reply<T>, ApiError>;

/// One method per Redshift management operation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedshiftApi: Send + Sync {
    async fn modify_cluster_subnet_group(
        &self,
        request: ModifyClusterSubnetGroupRequest,
    ) -> ApiResult<ModifyClusterSubnetGroupResponse>;

    async fn enable_logging(&self, request: EnableLoggingRequest) -> ApiResult<LoggingStatus>;

    async fn disable_logging(&self, request: DisableLoggingRequest) -> ApiResult<LoggingStatus>;

    async fn describe_logging_status(
        &self,
        request: DescribeLoggingStatusRequest,
    ) -> ApiResult<LoggingStatus>;

    async fn describe_event_categories(
        &self,
        request: DescribeEventCategoriesRequest,
    ) -> ApiResult<DescribeEventCategoriesResponse>;

    async fn create_tags(&self, request: CreateTagsRequest) -> ApiResult<EmptyResponse>;

    async fn delete_tags(&self, request: DeleteTagsRequest) -> ApiResult<EmptyResponse>;

    async fn purchase_reserved_node_offering(
        &self,
        request: PurchaseReservedNodeOfferingRequest,
    ) -> ApiResult<PurchaseReservedNodeOfferingResponse>;

    async fn reboot_cluster(&self, request: RebootClusterRequest)
    -> ApiResult<RebootClusterResponse>;

    async fn delete_cluster_security_group(
        &self,
        request: DeleteClusterSecurityGroupRequest,
    ) -> ApiResult<EmptyResponse>;

    async fn describe_resize(&self, request: DescribeResizeRequest) -> ApiResult<ResizeProgress>;
}
