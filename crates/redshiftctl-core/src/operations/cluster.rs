//! RebootCluster and DescribeResize

use async_trait::async_trait;

use crate::api::{
    ApiResult, Cluster, DescribeResizeRequest, RebootClusterRequest, RebootClusterResponse,
    RedshiftApi, ResizeProgress,
};
use crate::operation::{Operation, target_name};

/// Parameters for operations addressed by cluster identifier only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterParams {
    pub cluster_identifier: Option<String>,
}

impl ClusterParams {
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

/// Reboots a cluster; the cluster is unavailable until it reports `available` again
pub struct RebootCluster;

#[async_trait]
impl Operation for RebootCluster {
    const NAME: &'static str = "RebootCluster";
    const MUTATING: bool = true;

    type Params = ClusterParams;
    type Request = RebootClusterRequest;
    type Response = RebootClusterResponse;
    type Output = Cluster;

    fn target(params: &Self::Params) -> String {
        target_name(params.cluster_identifier.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        RebootClusterRequest {
            cluster_identifier: params.cluster_identifier.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.reboot_cluster(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        response.cluster.clone()
    }
}

/// Returns progress of the most recent resize request for a cluster
pub struct DescribeResize;

#[async_trait]
impl Operation for DescribeResize {
    const NAME: &'static str = "DescribeResize";
    const MUTATING: bool = false;

    type Params = ClusterParams;
    type Request = DescribeResizeRequest;
    type Response = ResizeProgress;
    type Output = ResizeProgress;

    fn target(params: &Self::Params) -> String {
        target_name(params.cluster_identifier.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        DescribeResizeRequest {
            cluster_identifier: params.cluster_identifier.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.describe_resize(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        Some(response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reboot_request_and_target() {
        let params = ClusterParams::new().with_cluster_identifier("analytics");
        assert_eq!(
            RebootCluster::build_request(&params).cluster_identifier.as_deref(),
            Some("analytics")
        );
        assert_eq!(RebootCluster::target(&params), "analytics");
    }

    #[test]
    fn test_reboot_extracts_cluster() {
        let response = RebootClusterResponse {
            cluster: Some(Cluster {
                cluster_status: Some("rebooting".to_string()),
                ..Default::default()
            }),
        };
        assert_eq!(
            RebootCluster::extract(&response).unwrap().cluster_status.as_deref(),
            Some("rebooting")
        );
    }

    #[test]
    fn test_describe_resize_is_read_only_and_returns_full_response() {
        assert!(!DescribeResize::MUTATING);
        let progress = ResizeProgress {
            status: Some("IN_PROGRESS".to_string()),
            progress_in_mega_bytes: Some(512),
            ..Default::default()
        };
        assert_eq!(DescribeResize::extract(&progress), Some(progress));
    }
}
