//! Review domain models and DTOs.

use chrono::{DateTime, Utc};
use devcamper_core::serde::timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::document::{Model, to_document};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// 1 to 10
    pub rating: u8,
    pub bootcamp: Uuid,
    /// Author
    pub user: Uuid,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl Model for Review {
    const COLLECTION: &'static str = "reviews";
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Please add a title for the review (at most 100 characters)"
    ))]
    pub title: String,
    #[validate(length(min = 1, message = "Please add some text"))]
    pub text: String,
    #[validate(range(min = 1, max = 10, message = "Please add a rating between 1 and 10"))]
    pub rating: u8,
}

impl CreateReviewDto {
    pub fn into_document(
        self,
        bootcamp: Uuid,
        author: Uuid,
    ) -> Result<Map<String, Value>, serde_json::Error> {
        let mut doc = to_document(&self)?;
        doc.insert("bootcamp".to_string(), Value::String(bootcamp.to_string()));
        doc.insert("user".to_string(), Value::String(author.to_string()));
        Ok(doc)
    }
}

/// Partial review update. Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Please add a title for the review (at most 100 characters)"
    ))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add some text"))]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10, message = "Please add a rating between 1 and 10"))]
    pub rating: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let dto = CreateReviewDto {
            title: "Learned a ton!".into(),
            text: "I learned a lot".into(),
            rating: 8,
        };
        assert!(dto.validate().is_ok());
        assert!(CreateReviewDto { rating: 0, ..dto.clone() }.validate().is_err());
        assert!(CreateReviewDto { rating: 11, ..dto }.validate().is_err());
    }
}
