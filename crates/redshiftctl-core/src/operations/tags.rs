//! CreateTags and DeleteTags
//!
//! Both return nothing. With pass-thru the caller gets the resource name back.

use async_trait::async_trait;

use crate::api::{ApiResult, CreateTagsRequest, DeleteTagsRequest, EmptyResponse, RedshiftApi, Tag};
use crate::context::copy_list;
use crate::operation::{Operation, target_name};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTagsParams {
    /// ARN of the resource to tag
    pub resource_name: Option<String>,
    pub tags: Option<Vec<Tag>>,
    /// Emit `resource_name` on success
    pub pass_thru: bool,
}

impl CreateTagsParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource_name(mut self, arn: impl Into<String>) -> Self {
        self.resource_name = Some(arn.into());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_pass_thru(mut self, pass_thru: bool) -> Self {
        self.pass_thru = pass_thru;
        self
    }
}

/// Adds tags to a cluster
pub struct CreateTags;

#[async_trait]
impl Operation for CreateTags {
    const NAME: &'static str = "CreateTags";
    const MUTATING: bool = true;

    type Params = CreateTagsParams;
    type Request = CreateTagsRequest;
    type Response = EmptyResponse;
    type Output = ();

    fn target(params: &Self::Params) -> String {
        target_name(params.resource_name.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        CreateTagsRequest {
            resource_name: params.resource_name.clone(),
            tags: params.tags.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.create_tags(request).await
    }

    fn extract(_response: &Self::Response) -> Option<Self::Output> {
        None
    }

    fn pass_thru(params: &Self::Params) -> Option<String> {
        params
            .pass_thru
            .then(|| params.resource_name.clone())
            .flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteTagsParams {
    /// ARN of the resource to untag
    pub resource_name: Option<String>,
    pub tag_keys: Option<Vec<String>>,
    /// Emit `resource_name` on success
    pub pass_thru: bool,
}

impl DeleteTagsParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource_name(mut self, arn: impl Into<String>) -> Self {
        self.resource_name = Some(arn.into());
        self
    }

    #[must_use]
    pub fn with_tag_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_keys = Some(copy_list(keys));
        self
    }

    #[must_use]
    pub fn with_pass_thru(mut self, pass_thru: bool) -> Self {
        self.pass_thru = pass_thru;
        self
    }
}

/// Deletes tags from a resource
pub struct DeleteTags;

#[async_trait]
impl Operation for DeleteTags {
    const NAME: &'static str = "DeleteTags";
    const MUTATING: bool = true;

    type Params = DeleteTagsParams;
    type Request = DeleteTagsRequest;
    type Response = EmptyResponse;
    type Output = ();

    fn target(params: &Self::Params) -> String {
        target_name(params.resource_name.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        DeleteTagsRequest {
            resource_name: params.resource_name.clone(),
            tag_keys: params.tag_keys.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.delete_tags(request).await
    }

    fn extract(_response: &Self::Response) -> Option<Self::Output> {
        None
    }

    fn pass_thru(params: &Self::Params) -> Option<String> {
        params
            .pass_thru
            .then(|| params.resource_name.clone())
            .flatten()
    }
}
