//! Request and response values exchanged with [`RedshiftApi`](super::RedshiftApi)
//!
//! Every request field is optional. `None` means the caller did not supply
//! the parameter and the service default applies; `Some("")` or an empty
//! list is sent as given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyClusterSubnetGroupRequest {
    pub cluster_subnet_group_name: Option<String>,
    pub description: Option<String>,
    pub subnet_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnableLoggingRequest {
    pub cluster_identifier: Option<String>,
    pub bucket_name: Option<String>,
    pub s3_key_prefix: Option<String>,
    pub log_destination_type: Option<String>,
    pub log_exports: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisableLoggingRequest {
    pub cluster_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeLoggingStatusRequest {
    pub cluster_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeEventCategoriesRequest {
    pub source_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTagsRequest {
    pub resource_name: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTagsRequest {
    pub resource_name: Option<String>,
    pub tag_keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseReservedNodeOfferingRequest {
    pub reserved_node_offering_id: Option<String>,
    pub node_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RebootClusterRequest {
    pub cluster_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteClusterSecurityGroupRequest {
    pub cluster_security_group_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeResizeRequest {
    pub cluster_identifier: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared shapes
// ---------------------------------------------------------------------------

/// A key/value tag attached to a Redshift resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// Response body for operations that return nothing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyResponse {}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub subnet_identifier: Option<String>,
    pub availability_zone: Option<String>,
    pub subnet_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterSubnetGroup {
    pub cluster_subnet_group_name: Option<String>,
    pub description: Option<String>,
    pub vpc_id: Option<String>,
    pub subnet_group_status: Option<String>,
    #[serde(default)]
    pub subnets: Vec<Subnet>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyClusterSubnetGroupResponse {
    pub cluster_subnet_group: Option<ClusterSubnetGroup>,
}

/// Audit logging state, returned by enable, disable and describe logging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingStatus {
    pub logging_enabled: Option<bool>,
    pub bucket_name: Option<String>,
    pub s3_key_prefix: Option<String>,
    pub last_successful_delivery_time: Option<DateTime<Utc>>,
    pub last_failure_time: Option<DateTime<Utc>>,
    pub last_failure_message: Option<String>,
    pub log_destination_type: Option<String>,
    #[serde(default)]
    pub log_exports: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventInfoMap {
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_categories: Vec<String>,
    pub event_description: Option<String>,
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventCategoriesMap {
    pub source_type: Option<String>,
    #[serde(default)]
    pub events: Vec<EventInfoMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeEventCategoriesResponse {
    #[serde(default)]
    pub event_categories_map_list: Vec<EventCategoriesMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReservedNode {
    pub reserved_node_id: Option<String>,
    pub reserved_node_offering_id: Option<String>,
    pub node_type: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub fixed_price: Option<f64>,
    pub usage_price: Option<f64>,
    pub currency_code: Option<String>,
    pub node_count: Option<i32>,
    pub state: Option<String>,
    pub offering_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseReservedNodeOfferingResponse {
    pub reserved_node: Option<ReservedNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterEndpoint {
    pub address: Option<String>,
    pub port: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cluster {
    pub cluster_identifier: Option<String>,
    pub node_type: Option<String>,
    pub cluster_status: Option<String>,
    pub cluster_availability_status: Option<String>,
    #[serde(rename = "DBName")]
    pub db_name: Option<String>,
    pub master_username: Option<String>,
    pub number_of_nodes: Option<i32>,
    pub vpc_id: Option<String>,
    pub availability_zone: Option<String>,
    pub endpoint: Option<ClusterEndpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RebootClusterResponse {
    pub cluster: Option<Cluster>,
}

/// Progress of the most recent resize of a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResizeProgress {
    pub target_node_type: Option<String>,
    pub target_number_of_nodes: Option<i32>,
    pub target_cluster_type: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub import_tables_completed: Vec<String>,
    #[serde(default)]
    pub import_tables_in_progress: Vec<String>,
    #[serde(default)]
    pub import_tables_not_started: Vec<String>,
    pub avg_resize_rate_in_mega_bytes_per_second: Option<f64>,
    pub total_resize_data_in_mega_bytes: Option<i64>,
    pub progress_in_mega_bytes: Option<i64>,
    pub elapsed_time_in_seconds: Option<i64>,
    pub estimated_time_to_completion_in_seconds: Option<i64>,
    pub resize_type: Option<String>,
    pub message: Option<String>,
    pub target_encryption_type: Option<String>,
    pub data_transfer_progress_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_requests_serialize_absent_fields_as_null() {
        let request = ModifyClusterSubnetGroupRequest {
            cluster_subnet_group_name: Some("analytics-subnets".to_string()),
            description: None,
            subnet_ids: Some(vec![]),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ClusterSubnetGroupName": "analytics-subnets",
                "Description": null,
                "SubnetIds": []
            })
        );
    }

    #[test]
    fn test_cluster_subnet_group_deserializes_without_lists() {
        let group: ClusterSubnetGroup =
            serde_json::from_str(r#"{"ClusterSubnetGroupName": "g1", "VpcId": "vpc-1"}"#).unwrap();
        assert_eq!(group.cluster_subnet_group_name.as_deref(), Some("g1"));
        assert!(group.subnets.is_empty());
        assert!(group.tags.is_empty());
    }

    #[test]
    fn test_cluster_uses_service_member_names() {
        let cluster = Cluster {
            cluster_identifier: Some("analytics".to_string()),
            db_name: Some("dev".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&cluster).unwrap();
        assert_eq!(value["DBName"], "dev");
        assert_eq!(value["ClusterIdentifier"], "analytics");
        assert!(value.get("DbName").is_none());
    }
}
