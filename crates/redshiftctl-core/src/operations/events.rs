//! DescribeEventCategories

use async_trait::async_trait;

use crate::api::{
    ApiResult, DescribeEventCategoriesRequest, DescribeEventCategoriesResponse,
    EventCategoriesMap, RedshiftApi,
};
use crate::operation::{Operation, target_name};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeEventCategoriesParams {
    /// `cluster`, `cluster-snapshot`, `cluster-parameter-group`,
    /// `cluster-security-group` or `scheduled-action`; `None` returns all
    pub source_type: Option<String>,
}

impl DescribeEventCategoriesParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }
}

/// Lists event categories for all event source types, or for one source type
pub struct DescribeEventCategories;

#[async_trait]
impl Operation for DescribeEventCategories {
    const NAME: &'static str = "DescribeEventCategories";
    const MUTATING: bool = false;

    type Params = DescribeEventCategoriesParams;
    type Request = DescribeEventCategoriesRequest;
    type Response = DescribeEventCategoriesResponse;
    type Output = Vec<EventCategoriesMap>;

    fn target(params: &Self::Params) -> String {
        target_name(params.source_type.as_deref())
    }

    fn build_request(params: &Self::Params) -> Self::Request {
        DescribeEventCategoriesRequest {
            source_type: params.source_type.clone(),
        }
    }

    async fn send(client: &dyn RedshiftApi, request: Self::Request) -> ApiResult<Self::Response> {
        client.describe_event_categories(request).await
    }

    fn extract(response: &Self::Response) -> Option<Self::Output> {
        Some(response.event_categories_map_list.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_absent_by_default() {
        let request = DescribeEventCategories::build_request(&DescribeEventCategoriesParams::new());
        assert_eq!(request.source_type, None);

        let request = DescribeEventCategories::build_request(
            &DescribeEventCategoriesParams::new().with_source_type("cluster"),
        );
        assert_eq!(request.source_type.as_deref(), Some("cluster"));
    }

    #[test]
    fn test_extract_returns_map_list() {
        let response = DescribeEventCategoriesResponse {
            event_categories_map_list: vec![EventCategoriesMap {
                source_type: Some("cluster".to_string()),
                events: vec![],
            }],
        };
        let payload = DescribeEventCategories::extract(&response).unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].source_type.as_deref(), Some("cluster"));
    }
}
