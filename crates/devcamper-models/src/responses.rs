//! Response envelopes.
//!
//! Every successful body carries `"success": true`; single resources are
//! wrapped in `data` and listings add `count` and `pagination`.

use devcamper_core::Pagination;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `data: {}` for deletions and logout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Listing envelope. `count` is the number of documents on this page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub pagination: Pagination,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
}

impl ListResponse {
    pub fn new(data: Vec<Value>, pagination: Pagination) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcamper_core::PageLink;
    use serde_json::json;

    #[test]
    fn test_list_response_shape() {
        let response = ListResponse::new(
            vec![json!({"id": "1"})],
            Pagination {
                next: Some(PageLink { page: 2, limit: 1 }),
                prev: None,
            },
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "count": 1,
                "pagination": {"next": {"page": 2, "limit": 1}},
                "data": [{"id": "1"}]
            })
        );
    }

    #[test]
    fn test_empty_data_serializes_as_object() {
        let response = DataResponse::new(EmptyData {});
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": true, "data": {}})
        );
    }
}
