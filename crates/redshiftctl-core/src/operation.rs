//! Operation descriptors
//!
//! Each supported Redshift API call is described once by a zero-sized type
//! implementing [`Operation`]: how to build its request from parameters, which
//! client method sends it, and which part of the response is the primary
//! payload. The [`Executor`](crate::Executor) runs any descriptor the same way.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use crate::api::{ApiResult, RedshiftApi};

#[async_trait]
pub trait Operation {
    /// API operation name, e.g. `ModifyClusterSubnetGroup`
    const NAME: &'static str;

    /// Mutating operations pass through the confirmation gate
    const MUTATING: bool;

    /// Typed parameters; every field optional
    type Params: Debug + Send + Sync;

    type Request: Debug + Send + 'static;

    type Response: Debug + Serialize + Send + 'static;

    /// Primary payload extracted from the response. `()` for void operations.
    type Output: Debug + Serialize;

    /// Resource the operation acts on, shown in the confirmation prompt
    fn target(params: &Self::Params) -> String;

    /// Copy every supplied parameter into a request. Never fails.
    fn build_request(params: &Self::Params) -> Self::Request;

    /// Issue exactly one call to the client
    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response>;

    /// Primary payload, or `None` when the operation returns nothing
    fn extract(response: &Self::Response) -> Option<Self::Output>;

    /// Identifier to hand back instead of the payload when the caller asked for it
    fn pass_thru(_params: &Self::Params) -> Option<String> {
        None
    }
}

/// Confirmation target for an optional identifier
pub(crate) fn target_name(value: Option<&str>) -> String {
    value.unwrap_or("<unspecified>").to_string()
}
