//! Runs an [`Operation`] end to end
//!
//! The executor owns no state of its own. It borrows a [`ClientProvider`] for
//! client reuse and a [`Confirm`] for operator prompts, and turns every
//! invocation into an [`OutputEnvelope`]. Errors never escape as `Err`; they
//! are captured in the envelope.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, trace, warn};

use crate::api::{ApiError, RedshiftApi};
use crate::confirm::{Confirm, ConfirmationGate};
use crate::context::{ExecutionSettings, ParameterContext};
use crate::envelope::{OutputEnvelope, REQUEST_ID_NOTE};
use crate::error::{CoreError, Result};
use crate::operation::Operation;

/// Resolves execution settings to a ready client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientProvider: Send + Sync {
    async fn client(&self, settings: &ExecutionSettings) -> Result<Arc<dyn RedshiftApi>>;
}

pub struct Executor<'a> {
    provider: &'a dyn ClientProvider,
    prompt: &'a dyn Confirm,
}

impl<'a> Executor<'a> {
    pub fn new(provider: &'a dyn ClientProvider, prompt: &'a dyn Confirm) -> Self {
        Self { provider, prompt }
    }

    /// Confirm (when mutating), build, send once, and capture the outcome
    pub async fn execute<O: Operation>(
        &self,
        context: ParameterContext<O::Params>,
    ) -> OutputEnvelope<O> {
        let params = context.params();
        let target = O::target(params);
        debug!("Executing {} on {}", O::NAME, target);
        trace!("Parameters: {:?}", params);

        if O::MUTATING {
            let gate = ConfirmationGate::new(context.force());
            match gate.should_process(self.prompt, &target, O::NAME) {
                Ok(true) => {}
                Ok(false) => {
                    info!("{} on {} cancelled by operator", O::NAME, target);
                    return OutputEnvelope::cancelled(target);
                }
                Err(err) => {
                    warn!("{} on {} not confirmed: {}", O::NAME, target, err);
                    return OutputEnvelope::failed(target, err);
                }
            }
        }

        let request = O::build_request(params);
        trace!("Request: {:?}", request);

        let client = match self.provider.client(context.execution()).await {
            Ok(client) => client,
            Err(err) => {
                warn!("Could not create client for {}: {}", O::NAME, err);
                return OutputEnvelope::failed(target, err);
            }
        };

        match O::send(client.as_ref(), request).await {
            Ok(reply) => {
                info!("{} on {} succeeded", O::NAME, target);
                let payload = O::extract(&reply.body);
                let pass_thru = O::pass_thru(params);
                let envelope = OutputEnvelope::succeeded(target, payload, reply.body, pass_thru);
                match reply.request_id {
                    Some(request_id) => envelope.with_note(REQUEST_ID_NOTE, request_id),
                    None => envelope,
                }
            }
            Err(err) => {
                warn!("{} on {} failed: {}", O::NAME, target, err);
                OutputEnvelope::failed(target, elaborate(err, context.execution()))
            }
        }
    }
}

/// Name-resolution failures gain the endpoint and region; everything else is verbatim
fn elaborate(err: ApiError, settings: &ExecutionSettings) -> CoreError {
    if err.is_name_resolution() {
        CoreError::NameResolution {
            endpoint: settings.endpoint_description(),
            region: settings.region_description(),
            message: err.to_string(),
        }
    } else {
        CoreError::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        EmptyResponse, LoggingStatus, MockRedshiftApi, RebootClusterResponse, Reply,
    };
    use crate::confirm::MockConfirm;
    use crate::envelope::{Emission, Selection};
    use crate::operations::{
        ClusterLoggingParams, ClusterParams, DeleteTags, DeleteTagsParams,
        DescribeLoggingStatus, ModifyClusterSubnetGroup, ModifyClusterSubnetGroupParams,
        RebootCluster,
    };
    use mockall::predicate::eq;

    const ARN: &str = "arn:aws:redshift:us-east-1:123456789012:cluster:analytics";

    fn provider_for(api: MockRedshiftApi) -> MockClientProvider {
        let client: Arc<dyn RedshiftApi> = Arc::new(api);
        let mut provider = MockClientProvider::new();
        provider
            .expect_client()
            .times(1)
            .returning(move |_| Ok(Arc::clone(&client)));
        provider
    }

    fn settings() -> ExecutionSettings {
        ExecutionSettings::default().with_region("us-east-1")
    }

    #[tokio::test]
    async fn test_declined_prompt_never_contacts_service() {
        let mut provider = MockClientProvider::new();
        provider.expect_client().never();

        let mut prompt = MockConfirm::new();
        prompt
            .expect_confirm()
            .with(eq("analytics"), eq("RebootCluster"))
            .times(1)
            .returning(|_, _| Ok(false));

        let executor = Executor::new(&provider, &prompt);
        let context = ParameterContext::new(
            ClusterParams::new().with_cluster_identifier("analytics"),
            settings(),
        );
        let envelope = executor.execute::<RebootCluster>(context).await;

        assert!(envelope.is_cancelled());
        assert!(envelope.payload().is_none());
        assert!(envelope.error().is_none());
    }

    #[tokio::test]
    async fn test_forced_pass_thru_emits_identifier_without_prompt() {
        let mut api = MockRedshiftApi::new();
        api.expect_delete_tags()
            .withf(|request| {
                request.resource_name.as_deref() == Some(ARN)
                    && request.tag_keys == Some(vec!["team".to_string()])
            })
            .times(1)
            .returning(|_| Ok(Reply::new(EmptyResponse::default())));
        let provider = provider_for(api);

        let mut prompt = MockConfirm::new();
        prompt.expect_confirm().never();

        let executor = Executor::new(&provider, &prompt);
        let params = DeleteTagsParams::new()
            .with_resource_name(ARN)
            .with_tag_keys(["team"])
            .with_pass_thru(true);
        let context = ParameterContext::new(params, settings()).with_force(true);
        let envelope = executor.execute::<DeleteTags>(context).await;

        assert!(envelope.is_success());
        assert_eq!(
            envelope.into_emission(Selection::Payload).unwrap(),
            Emission::Identifier(ARN.to_string())
        );
    }

    #[tokio::test]
    async fn test_request_carries_only_supplied_fields() {
        let mut api = MockRedshiftApi::new();
        api.expect_modify_cluster_subnet_group()
            .withf(|request| {
                request.cluster_subnet_group_name.as_deref() == Some("private")
                    && request.description.is_none()
                    && request.subnet_ids == Some(vec!["subnet-1".to_string()])
            })
            .times(1)
            .returning(|_| Ok(Reply::new(Default::default())));
        let provider = provider_for(api);
        let prompt = MockConfirm::new();

        let params = ModifyClusterSubnetGroupParams::new()
            .with_cluster_subnet_group_name("private")
            .with_subnet_ids(["subnet-1"]);
        let envelope = Executor::new(&provider, &prompt)
            .execute::<ModifyClusterSubnetGroup>(
                ParameterContext::new(params, settings()).with_force(true),
            )
            .await;

        assert!(envelope.is_success());
        assert!(envelope.payload().is_none());
    }

    #[tokio::test]
    async fn test_name_resolution_failure_names_endpoint() {
        let mut api = MockRedshiftApi::new();
        api.expect_reboot_cluster().times(1).returning(|_| {
            Err(ApiError::Transport {
                message: "dispatch failure: dns error: failed to lookup address information"
                    .to_string(),
            })
        });
        let provider = provider_for(api);
        let prompt = MockConfirm::new();

        let envelope = Executor::new(&provider, &prompt)
            .execute::<RebootCluster>(
                ParameterContext::new(
                    ClusterParams::new().with_cluster_identifier("analytics"),
                    settings().with_endpoint_url("https://redshift.invalid.example"),
                )
                .with_force(true),
            )
            .await;

        let err = envelope.error().unwrap();
        assert!(matches!(err, CoreError::NameResolution { .. }));
        let message = err.to_string();
        assert!(message.contains("https://redshift.invalid.example"));
        assert!(message.contains("us-east-1"));
    }

    #[tokio::test]
    async fn test_service_error_is_carried_verbatim() {
        let mut api = MockRedshiftApi::new();
        api.expect_reboot_cluster().times(1).returning(|_| {
            Err(ApiError::Service {
                code: "InvalidClusterState".to_string(),
                message: "Cluster analytics is not in available state.".to_string(),
            })
        });
        let provider = provider_for(api);
        let prompt = MockConfirm::new();

        let envelope = Executor::new(&provider, &prompt)
            .execute::<RebootCluster>(
                ParameterContext::new(
                    ClusterParams::new().with_cluster_identifier("analytics"),
                    settings(),
                )
                .with_force(true),
            )
            .await;

        assert!(envelope.payload().is_none());
        assert_eq!(
            envelope.error().unwrap().to_string(),
            "InvalidClusterState: Cluster analytics is not in available state."
        );
    }

    #[tokio::test]
    async fn test_read_only_operation_skips_prompt() {
        let mut api = MockRedshiftApi::new();
        api.expect_describe_logging_status().times(1).returning(|_| {
            Ok(Reply::new(LoggingStatus {
                logging_enabled: Some(false),
                ..Default::default()
            }))
        });
        let provider = provider_for(api);

        let mut prompt = MockConfirm::new();
        prompt.expect_confirm().never();

        let envelope = Executor::new(&provider, &prompt)
            .execute::<DescribeLoggingStatus>(ParameterContext::new(
                ClusterLoggingParams::new().with_cluster_identifier("analytics"),
                settings(),
            ))
            .await;

        assert_eq!(envelope.payload().unwrap().logging_enabled, Some(false));
    }

    #[tokio::test]
    async fn test_client_creation_failure_is_captured() {
        let mut provider = MockClientProvider::new();
        provider
            .expect_client()
            .times(1)
            .returning(|_| Err(CoreError::Client("no region configured".to_string())));
        let prompt = MockConfirm::new();

        let envelope = Executor::new(&provider, &prompt)
            .execute::<DescribeLoggingStatus>(ParameterContext::new(
                ClusterLoggingParams::new(),
                ExecutionSettings::default(),
            ))
            .await;

        assert!(matches!(envelope.error(), Some(CoreError::Client(_))));
    }

    #[tokio::test]
    async fn test_request_id_recorded_in_notes() {
        let mut api = MockRedshiftApi::new();
        api.expect_reboot_cluster().times(1).returning(|_| {
            Ok(Reply::new(RebootClusterResponse::default())
                .with_request_id(Some("0f6a1c2b-3d4e-5f60-7182-93a4b5c6d7e8")))
        });
        let provider = provider_for(api);
        let prompt = MockConfirm::new();

        let envelope = Executor::new(&provider, &prompt)
            .execute::<RebootCluster>(
                ParameterContext::new(ClusterParams::new(), settings()).with_force(true),
            )
            .await;

        assert_eq!(
            envelope.request_id(),
            Some("0f6a1c2b-3d4e-5f60-7182-93a4b5c6d7e8")
        );
    }

    #[tokio::test]
    async fn test_prompt_failure_is_captured() {
        let mut provider = MockClientProvider::new();
        provider.expect_client().never();

        let mut prompt = MockConfirm::new();
        prompt
            .expect_confirm()
            .returning(|_, _| Err(CoreError::Prompt("stdin is not a terminal".to_string())));

        let envelope = Executor::new(&provider, &prompt)
            .execute::<RebootCluster>(ParameterContext::new(ClusterParams::new(), settings()))
            .await;

        assert!(matches!(envelope.error(), Some(CoreError::Prompt(_))));
    }
}
