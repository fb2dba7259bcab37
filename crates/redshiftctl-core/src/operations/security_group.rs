//! DeleteClusterSecurityGroup

use async_trait::async_trait;

use crate::api::{ApiResult, DeleteClusterSecurityGroupRequest, EmptyResponse, RedshiftApi};
use crate::operation::{Operation, target_name};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteClusterSecurityGroupParams {
    pub cluster_security_group_name: Option<String>,
    /// Emit the group name on success
    pub pass_thru: bool,
}

impl DeleteClusterSecurityGroupParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cluster_security_group_name(mut self, name: impl Into<String>) -> Self {
        self.cluster_security_group_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_pass_thru(mut self, pass_thru: bool) -> Self {
        self.pass_thru = pass_thru;
        self
    }
}

/// Deletes a cluster security group
pub struct DeleteClusterSecurityGroup;

#[async_trait]
impl Operation for DeleteClusterSecurityGroup {
    const NAME: &'static str = "DeleteClusterSecurityGroup";
    const MUTATING: bool = true;

    type Params = DeleteClusterSecurityGroupParams;
    type Request = DeleteClusterSecurityGroupRequest;
    type Response = EmptyResponse;
    type Output = ();

    fn target(params: &Self::Params) -> String {
        target_name(params.cluster_security_group_name.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        DeleteClusterSecurityGroupRequest {
            cluster_security_group_name: params.cluster_security_group_name.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.delete_cluster_security_group(request).await
    }

    fn extract(_response: &Self::Response) -> Option<Self::Output> {
        None
    }

    fn pass_thru(params: &Self::Params) -> Option<String> {
        params
            .pass_thru
            .then(|| params.cluster_security_group_name.clone())
            .flatten()
    }
}
