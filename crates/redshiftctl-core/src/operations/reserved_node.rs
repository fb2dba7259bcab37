//! PurchaseReservedNodeOffering

use async_trait::async_trait;

use crate::api::{
    ApiResult, PurchaseReservedNodeOfferingRequest, PurchaseReservedNodeOfferingResponse,
    RedshiftApi, ReservedNode,
};
use crate::operation::{Operation, target_name};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseReservedNodeOfferingParams {
    pub reserved_node_offering_id: Option<String>,
    /// Number of nodes to reserve; the service defaults to 1
    pub node_count: Option<i32>,
}

impl PurchaseReservedNodeOfferingParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reserved_node_offering_id(mut self, offering_id: impl Into<String>) -> Self {
        self.reserved_node_offering_id = Some(offering_id.into());
        self
    }

    #[must_use]
    pub fn with_node_count(mut self, node_count: i32) -> Self {
        self.node_count = Some(node_count);
        self
    }
}

/// Purchases a reserved node offering
pub struct PurchaseReservedNodeOffering;

#[async_trait]
impl Operation for PurchaseReservedNodeOffering {
    const NAME: &'static str = "PurchaseReservedNodeOffering";
    const MUTATING: bool = true;

    type Params = PurchaseReservedNodeOfferingParams;
    type Request = PurchaseReservedNodeOfferingRequest;
    type Response = PurchaseReservedNodeOfferingResponse;
    type Output = ReservedNode;

    fn target(params: &Self::Params) -> String {
        target_name(params.reserved_node_offering_id.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        PurchaseReservedNodeOfferingRequest {
            reserved_node_offering_id: params.reserved_node_offering_id.clone(),
            node_count: params.node_count,
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.purchase_reserved_node_offering(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        response.reserved_node.clone()
    }
}
