//! Course domain models and DTOs.

use chrono::{DateTime, Utc};
use devcamper_core::serde::timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::document::{Model, to_document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Duration as entered by the publisher, e.g. `"8"`.
    pub weeks: String,
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
    pub bootcamp: Uuid,
    pub user: Uuid,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl Model for Course {
    const COLLECTION: &'static str = "courses";
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseDto {
    #[validate(length(min = 1, message = "Please add a course title"))]
    pub title: String,
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: String,
    #[validate(length(min = 1, message = "Please add number of weeks"))]
    pub weeks: String,
    #[validate(range(min = 0.0, message = "Please add a tuition cost"))]
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
}

impl CreateCourseDto {
    pub fn into_document(
        self,
        bootcamp: Uuid,
        owner: Uuid,
    ) -> Result<Map<String, Value>, serde_json::Error> {
        let mut doc = to_document(&self)?;
        doc.insert("bootcamp".to_string(), Value::String(bootcamp.to_string()));
        doc.insert("user".to_string(), Value::String(owner.to_string()));
        Ok(doc)
    }
}

/// Partial course update. Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add a course title"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add number of weeks"))]
    pub weeks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Please add a tuition cost"))]
    pub tuition: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_skill: Option<MinimumSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_available: Option<bool>,
}
