//! End-to-end executor behaviour against an in-memory Redshift fake

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use redshiftctl_core::api::*;
use redshiftctl_core::operations::*;
use redshiftctl_core::{
    ClientProvider, Confirm, CoreError, Emission, ExecutionSettings, Executor, ParameterContext,
    Selection,
};

/// Records every call and answers with canned data
#[derive(Default)]
struct FakeRedshift {
    calls: Mutex<Vec<String>>,
    fail_with: Option<ApiError>,
}

impl FakeRedshift {
    fn failing(error: ApiError) -> Self {
        Self {
            fail_with: Some(error),
            ..Default::default()
        }
    }

    fn record<T>(&self, call: impl Into<String>, body: T) -> ApiResult<T> {
        self.calls.lock().unwrap().push(call.into());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(Reply::new(body).with_request_id(Some("req-1"))),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedshiftApi for FakeRedshift {
    async fn modify_cluster_subnet_group(
        &self,
        request: ModifyClusterSubnetGroupRequest,
    ) -> ApiResult<ModifyClusterSubnetGroupResponse> {
        let group = ClusterSubnetGroup {
            cluster_subnet_group_name: request.cluster_subnet_group_name.clone(),
            description: request.description.clone(),
            subnets: request
                .subnet_ids
                .unwrap_or_default()
                .into_iter()
                .map(|id| Subnet {
                    subnet_identifier: Some(id),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        self.record(
            "ModifyClusterSubnetGroup",
            ModifyClusterSubnetGroupResponse {
                cluster_subnet_group: Some(group),
            },
        )
    }

    async fn enable_logging(&self, request: EnableLoggingRequest) -> ApiResult<LoggingStatus> {
        self.record(
            "EnableLogging",
            LoggingStatus {
                logging_enabled: Some(true),
                bucket_name: request.bucket_name,
                ..Default::default()
            },
        )
    }

    async fn disable_logging(&self, _request: DisableLoggingRequest) -> ApiResult<LoggingStatus> {
        self.record(
            "DisableLogging",
            LoggingStatus {
                logging_enabled: Some(false),
                ..Default::default()
            },
        )
    }

    async fn describe_logging_status(
        &self,
        _request: DescribeLoggingStatusRequest,
    ) -> ApiResult<LoggingStatus> {
        self.record("DescribeLoggingStatus", LoggingStatus::default())
    }

    async fn describe_event_categories(
        &self,
        request: DescribeEventCategoriesRequest,
    ) -> ApiResult<DescribeEventCategoriesResponse> {
        self.record(
            "DescribeEventCategories",
            DescribeEventCategoriesResponse {
                event_categories_map_list: vec![EventCategoriesMap {
                    source_type: request.source_type,
                    events: vec![EventInfoMap {
                        event_id: Some("REDSHIFT-EVENT-2000".to_string()),
                        event_categories: vec!["management".to_string()],
                        ..Default::default()
                    }],
                }],
            },
        )
    }

    async fn create_tags(&self, _request: CreateTagsRequest) -> ApiResult<EmptyResponse> {
        self.record("CreateTags", EmptyResponse::default())
    }

    async fn delete_tags(&self, _request: DeleteTagsRequest) -> ApiResult<EmptyResponse> {
        self.record("DeleteTags", EmptyResponse::default())
    }

    async fn purchase_reserved_node_offering(
        &self,
        request: PurchaseReservedNodeOfferingRequest,
    ) -> ApiResult<PurchaseReservedNodeOfferingResponse> {
        self.record(
            "PurchaseReservedNodeOffering",
            PurchaseReservedNodeOfferingResponse {
                reserved_node: Some(ReservedNode {
                    reserved_node_offering_id: request.reserved_node_offering_id,
                    node_count: request.node_count,
                    state: Some("payment-pending".to_string()),
                    ..Default::default()
                }),
            },
        )
    }

    async fn reboot_cluster(
        &self,
        request: RebootClusterRequest,
    ) -> ApiResult<RebootClusterResponse> {
        self.record(
            "RebootCluster",
            RebootClusterResponse {
                cluster: Some(Cluster {
                    cluster_identifier: request.cluster_identifier,
                    cluster_status: Some("rebooting".to_string()),
                    ..Default::default()
                }),
            },
        )
    }

    async fn delete_cluster_security_group(
        &self,
        _request: DeleteClusterSecurityGroupRequest,
    ) -> ApiResult<EmptyResponse> {
        self.record("DeleteClusterSecurityGroup", EmptyResponse::default())
    }

    async fn describe_resize(&self, _request: DescribeResizeRequest) -> ApiResult<ResizeProgress> {
        self.record(
            "DescribeResize",
            ResizeProgress {
                status: Some("SUCCEEDED".to_string()),
                ..Default::default()
            },
        )
    }
}

struct FixedProvider(Arc<FakeRedshift>);

#[async_trait]
impl ClientProvider for FixedProvider {
    async fn client(
        &self,
        _settings: &ExecutionSettings,
    ) -> redshiftctl_core::Result<Arc<dyn RedshiftApi>> {
        let client: Arc<dyn RedshiftApi> = self.0.clone();
        Ok(client)
    }
}

/// Answers every prompt the same way and counts how often it was asked
struct ScriptedConfirm {
    answer: bool,
    asked: Mutex<Vec<(String, String)>>,
}

impl ScriptedConfirm {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, target: &str, operation: &str) -> redshiftctl_core::Result<bool> {
        self.asked
            .lock()
            .unwrap()
            .push((target.to_string(), operation.to_string()));
        Ok(self.answer)
    }
}

fn settings() -> ExecutionSettings {
    ExecutionSettings::default().with_region("us-west-2")
}

#[tokio::test]
async fn modify_subnet_group_returns_group_payload() {
    let fake = Arc::new(FakeRedshift::default());
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(true);

    let params = ModifyClusterSubnetGroupParams::new()
        .with_cluster_subnet_group_name("private")
        .with_subnet_ids(["subnet-a", "subnet-b"]);
    let envelope = Executor::new(&provider, &prompt)
        .execute::<ModifyClusterSubnetGroup>(ParameterContext::new(params, settings()))
        .await;

    assert_eq!(
        prompt.asked(),
        vec![("private".to_string(), "ModifyClusterSubnetGroup".to_string())]
    );
    let group = envelope.payload().unwrap();
    assert_eq!(group.cluster_subnet_group_name.as_deref(), Some("private"));
    assert_eq!(group.subnets.len(), 2);
    assert_eq!(envelope.request_id(), Some("req-1"));
    assert_eq!(fake.calls(), vec!["ModifyClusterSubnetGroup"]);
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let fake = Arc::new(FakeRedshift::default());
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(false);

    let params = DeleteClusterSecurityGroupParams::new()
        .with_cluster_security_group_name("legacy")
        .with_pass_thru(true);
    let envelope = Executor::new(&provider, &prompt)
        .execute::<DeleteClusterSecurityGroup>(ParameterContext::new(params, settings()))
        .await;

    assert!(envelope.is_cancelled());
    assert!(fake.calls().is_empty());
    assert_eq!(
        envelope.into_emission(Selection::Payload).unwrap(),
        Emission::Nothing
    );
}

#[tokio::test]
async fn read_only_operations_never_prompt() {
    let fake = Arc::new(FakeRedshift::default());
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(false);
    let executor = Executor::new(&provider, &prompt);

    let categories = executor
        .execute::<DescribeEventCategories>(ParameterContext::new(
            DescribeEventCategoriesParams::new().with_source_type("cluster"),
            settings(),
        ))
        .await;
    let resize = executor
        .execute::<DescribeResize>(ParameterContext::new(
            ClusterParams::new().with_cluster_identifier("analytics"),
            settings(),
        ))
        .await;

    assert!(prompt.asked().is_empty());
    assert_eq!(
        categories.payload().unwrap()[0].source_type.as_deref(),
        Some("cluster")
    );
    assert_eq!(resize.payload().unwrap().status.as_deref(), Some("SUCCEEDED"));
    assert_eq!(fake.calls(), vec!["DescribeEventCategories", "DescribeResize"]);
}

#[tokio::test]
async fn forced_tag_creation_passes_resource_name_through() {
    let fake = Arc::new(FakeRedshift::default());
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(false);

    let arn = "arn:aws:redshift:us-west-2:123456789012:cluster:analytics";
    let params = CreateTagsParams::new()
        .with_resource_name(arn)
        .with_tags([Tag::new("team", "data")])
        .with_pass_thru(true);
    let envelope = Executor::new(&provider, &prompt)
        .execute::<CreateTags>(ParameterContext::new(params, settings()).with_force(true))
        .await;

    assert!(prompt.asked().is_empty());
    assert_eq!(
        envelope.into_emission(Selection::Payload).unwrap(),
        Emission::Identifier(arn.to_string())
    );
}

#[tokio::test]
async fn void_operation_without_pass_thru_emits_nothing() {
    let fake = Arc::new(FakeRedshift::default());
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(true);

    let params = DeleteTagsParams::new()
        .with_resource_name("arn:aws:redshift:us-west-2:123456789012:cluster:analytics")
        .with_tag_keys(["team"]);
    let envelope = Executor::new(&provider, &prompt)
        .execute::<DeleteTags>(ParameterContext::new(params, settings()))
        .await;

    assert!(envelope.is_success());
    assert_eq!(
        envelope.into_emission(Selection::Payload).unwrap(),
        Emission::Nothing
    );
}

#[tokio::test]
async fn purchase_and_reboot_extract_primary_objects() {
    let fake = Arc::new(FakeRedshift::default());
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(true);
    let executor = Executor::new(&provider, &prompt);

    let purchase = executor
        .execute::<PurchaseReservedNodeOffering>(ParameterContext::new(
            PurchaseReservedNodeOfferingParams::new()
                .with_reserved_node_offering_id("offering-1")
                .with_node_count(2),
            settings(),
        ))
        .await;
    let node = purchase.payload().unwrap();
    assert_eq!(node.node_count, Some(2));
    assert_eq!(node.state.as_deref(), Some("payment-pending"));

    let reboot = executor
        .execute::<RebootCluster>(ParameterContext::new(
            ClusterParams::new().with_cluster_identifier("analytics"),
            settings(),
        ))
        .await;
    assert_eq!(
        reboot.payload().unwrap().cluster_status.as_deref(),
        Some("rebooting")
    );
}

#[tokio::test]
async fn logging_operations_return_full_status() {
    let fake = Arc::new(FakeRedshift::default());
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(true);
    let executor = Executor::new(&provider, &prompt);

    let enabled = executor
        .execute::<EnableLogging>(ParameterContext::new(
            EnableLoggingParams::new()
                .with_cluster_identifier("analytics")
                .with_bucket_name("audit-logs"),
            settings(),
        ))
        .await;
    assert_eq!(enabled.payload().unwrap().logging_enabled, Some(true));
    assert_eq!(
        enabled.payload().unwrap().bucket_name.as_deref(),
        Some("audit-logs")
    );

    let disabled = executor
        .execute::<DisableLogging>(ParameterContext::new(
            ClusterLoggingParams::new().with_cluster_identifier("analytics"),
            settings(),
        ))
        .await;
    assert_eq!(disabled.payload().unwrap().logging_enabled, Some(false));
    assert_eq!(prompt.asked().len(), 2);
}

#[tokio::test]
async fn dns_failure_reports_regional_endpoint() {
    let fake = Arc::new(FakeRedshift::failing(ApiError::Transport {
        message: "error trying to connect: dns error: Name or service not known".to_string(),
    }));
    let provider = FixedProvider(fake.clone());
    let prompt = ScriptedConfirm::answering(true);

    let envelope = Executor::new(&provider, &prompt)
        .execute::<DescribeResize>(ParameterContext::new(
            ClusterParams::new().with_cluster_identifier("analytics"),
            settings(),
        ))
        .await;

    assert_eq!(fake.calls().len(), 1);
    let err = envelope.into_emission(Selection::Payload).unwrap_err();
    assert!(matches!(err, CoreError::NameResolution { .. }));
    assert!(
        err.to_string()
            .contains("https://redshift.us-west-2.amazonaws.com")
    );
}

#[tokio::test]
async fn other_transport_failures_are_not_rewritten() {
    let fake = Arc::new(FakeRedshift::failing(ApiError::Transport {
        message: "connection refused".to_string(),
    }));
    let provider = FixedProvider(fake);
    let prompt = ScriptedConfirm::answering(true);

    let envelope = Executor::new(&provider, &prompt)
        .execute::<DescribeResize>(ParameterContext::new(ClusterParams::new(), settings()))
        .await;

    let err = envelope.error().unwrap();
    assert!(matches!(err, CoreError::Api(ApiError::Transport { .. })));
    assert_eq!(err.to_string(), "connection refused");
}
