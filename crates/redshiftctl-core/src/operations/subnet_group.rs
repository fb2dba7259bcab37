//! ModifyClusterSubnetGroup

use async_trait::async_trait;

use crate::api::{
    ApiResult, ClusterSubnetGroup, ModifyClusterSubnetGroupRequest,
    ModifyClusterSubnetGroupResponse, RedshiftApi,
};
use crate::context::copy_list;
use crate::operation::{Operation, target_name};

/// Parameters for modifying a cluster subnet group
///
/// # Example
///
/// ```rust
/// use redshiftctl_core::operations::ModifyClusterSubnetGroupParams;
///
/// let params = ModifyClusterSubnetGroupParams::new()
///     .with_cluster_subnet_group_name("analytics-subnets")
///     .with_subnet_ids(["subnet-0a1b", "subnet-2c3d"]);
/// assert!(params.description.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifyClusterSubnetGroupParams {
    /// Name of the subnet group to modify
    pub cluster_subnet_group_name: Option<String>,
    /// Replacement description; `None` leaves it unchanged
    pub description: Option<String>,
    /// VPC subnet IDs the group should contain (the service allows up to 20)
    pub subnet_ids: Option<Vec<String>>,
}

impl ModifyClusterSubnetGroupParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cluster_subnet_group_name(mut self, name: impl Into<String>) -> Self {
        self.cluster_subnet_group_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_subnet_ids<I, S>(mut self, subnet_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subnet_ids = Some(copy_list(subnet_ids));
        self
    }
}

/// Modifies a cluster subnet group to include the specified list of VPC subnets
pub struct ModifyClusterSubnetGroup;

#[async_trait]
impl Operation for ModifyClusterSubnetGroup {
    const NAME: &'static str = "ModifyClusterSubnetGroup";
    const MUTATING: bool = true;

    type Params = ModifyClusterSubnetGroupParams;
    type Request = ModifyClusterSubnetGroupRequest;
    type Response = ModifyClusterSubnetGroupResponse;
    type Output = ClusterSubnetGroup;

    fn target(params: &Self::Params) -> String {
        target_name(params.cluster_subnet_group_name.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        ModifyClusterSubnetGroupRequest {
            cluster_subnet_group_name: params.cluster_subnet_group_name.clone(),
            description: params.description.clone(),
            subnet_ids: params.subnet_ids.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.modify_cluster_subnet_group(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        response.cluster_subnet_group.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_request_copies_supplied_fields_only() {
        let params = ModifyClusterSubnetGroupParams::new()
            .with_cluster_subnet_group_name("analytics-subnets")
            .with_subnet_ids(vec!["subnet-1", "subnet-2"]);

        let request = ModifyClusterSubnetGroup::build_request(&params);
        assert_eq!(
            request.cluster_subnet_group_name.as_deref(),
            Some("analytics-subnets")
        );
        assert_eq!(request.description, None);
        assert_eq!(
            request.subnet_ids,
            Some(vec!["subnet-1".to_string(), "subnet-2".to_string()])
        );
    }

    #[test]
    fn test_empty_values_are_not_absent() {
        let params = ModifyClusterSubnetGroupParams::new()
            .with_description("")
            .with_subnet_ids(Vec::<String>::new());

        let request = ModifyClusterSubnetGroup::build_request(&params);
        assert_eq!(request.description.as_deref(), Some(""));
        assert_eq!(request.subnet_ids, Some(vec![]));
        assert_eq!(request.cluster_subnet_group_name, None);
    }

    #[test]
    fn test_caller_list_mutation_does_not_leak_into_request() {
        let mut subnets = vec!["subnet-1".to_string()];
        let params = ModifyClusterSubnetGroupParams::new().with_subnet_ids(subnets.iter().cloned());
        let request = ModifyClusterSubnetGroup::build_request(&params);

        subnets.push("subnet-2".to_string());
        subnets[0] = "subnet-x".to_string();

        assert_eq!(request.subnet_ids, Some(vec!["subnet-1".to_string()]));
    }

    #[test]
    fn test_extract_and_target() {
        let response = ModifyClusterSubnetGroupResponse {
            cluster_subnet_group: Some(ClusterSubnetGroup {
                cluster_subnet_group_name: Some("analytics-subnets".to_string()),
                ..Default::default()
            }),
        };
        let group = ModifyClusterSubnetGroup::extract(&response).unwrap();
        assert_eq!(group.cluster_subnet_group_name.as_deref(), Some("analytics-subnets"));

        assert_eq!(
            ModifyClusterSubnetGroup::target(&ModifyClusterSubnetGroupParams::new()),
            "<unspecified>"
        );
    }
}
