//! Authentication DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::users::Role;

/// Self-service registration. Anyone may sign up as a `user` or a
/// `publisher`; admins are created through the CLI or by another admin.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,
    #[validate(email(message = "Please add a valid email"))]
    #[schema(example = "john@gmail.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "123456")]
    pub password: String,
    #[validate(custom(function = "self_assignable_role"))]
    pub role: Option<Role>,
}

fn self_assignable_role(role: &Role) -> Result<(), ValidationError> {
    if *role == Role::Admin {
        let mut err = ValidationError::new("role");
        err.message = Some("Role admin cannot be self-assigned".into());
        return Err(err);
    }
    Ok(())
}

/// Missing fields deserialize as empty strings so that the request fails
/// validation with a single message.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide an email and password"))]
    #[schema(example = "john@gmail.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide an email and password"))]
    #[schema(example = "123456")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate, ToSchema)]
pub struct UpdateDetailsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "Please provide your current password"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// Body returned by every route that issues a session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
}

impl AuthResponse {
    pub fn new(token: String) -> Self {
        Self {
            success: true,
            token,
        }
    }
}
