//! Bootcamp domain models and DTOs.

use chrono::{DateTime, Utc};
use devcamper_core::serde::timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::document::{Model, to_document};

pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

/// Career tracks a bootcamp can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    Business,
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    pub careers: Vec<Career>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<f64>,
    #[serde(default = "default_photo")]
    pub photo: String,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    /// Owning publisher (or admin).
    pub user: Uuid,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

fn default_photo() -> String {
    DEFAULT_PHOTO.to_string()
}

impl Model for Bootcamp {
    const COLLECTION: &'static str = "bootcamps";
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBootcampDto {
    #[validate(length(min = 1, max = 50, message = "Name cannot be more than 50 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 500,
        message = "Description cannot be more than 500 characters"
    ))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "Phone number cannot be longer than 20 characters"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: String,
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Vec<Career>,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
}

impl CreateBootcampDto {
    /// Builds the stored document: derives the slug and records the owner.
    pub fn into_document(self, owner: Uuid) -> Result<Map<String, Value>, serde_json::Error> {
        let slug = slugify(&self.name);
        let mut doc = to_document(&self)?;
        doc.insert("slug".to_string(), Value::String(slug));
        doc.insert("photo".to_string(), Value::String(default_photo()));
        doc.insert("user".to_string(), Value::String(owner.to_string()));
        Ok(doc)
    }
}

/// Partial bootcamp update. Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBootcampDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "Name cannot be more than 50 characters"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(
        min = 1,
        max = 500,
        message = "Description cannot be more than 500 characters"
    ))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "Phone number cannot be longer than 20 characters"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Option<Vec<Career>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_assistance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_guarantee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_gi: Option<bool>,
}

impl UpdateBootcampDto {
    /// Builds the update patch, re-deriving the slug when the name changes.
    pub fn into_patch(self) -> Result<Map<String, Value>, serde_json::Error> {
        let slug = self.name.as_deref().map(slugify);
        let mut patch = to_document(&self)?;
        if let Some(slug) = slug {
            patch.insert("slug".to_string(), Value::String(slug));
        }
        Ok(patch)
    }
}

/// URL-friendly form of a bootcamp name: lowercase ASCII words joined by `-`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Mean tuition rounded up to the next multiple of ten.
pub fn average_cost(tuitions: &[f64]) -> Option<f64> {
    mean(tuitions).map(|avg| (avg / 10.0).ceil() * 10.0)
}

/// Mean review rating.
pub fn average_rating(ratings: &[f64]) -> Option<f64> {
    mean(ratings)
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
