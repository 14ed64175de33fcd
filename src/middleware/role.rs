//! Role gates.
//!
//! Each gate is an extractor that first authenticates the request through
//! [`AuthUser`] and then checks the account's role against an allow-list.
//! Handlers take the gate instead of `AuthUser`:
//!
//! ```rust,ignore
//! async fn create_bootcamp(PublisherOrAdmin(user): PublisherOrAdmin, ...) { ... }
//! ```

use devcamper_core::AppError;
use devcamper_models::Role;

use crate::middleware::auth::AuthUser;

/// 403 unless `user` holds one of `allowed`.
pub fn check_role(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role()) {
        return Ok(());
    }
    Err(AppError::forbidden(format!(
        "User role {} is not authorized to access this route",
        user.role()
    )))
}

#[macro_export]
macro_rules! require_roles {
    ($name:ident, [$($role:expr),+ $(,)?]) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = devcamper_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                use axum::extract::FromRequestParts;
                use $crate::middleware::auth::AuthUser;

                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                $crate::middleware::role::check_role(&auth_user, &[$($role),+])?;
                Ok($name(auth_user))
            }
        }
    };
}

require_roles!(PublisherOrAdmin, [Role::Publisher, Role::Admin]);
require_roles!(UserOrAdmin, [Role::User, Role::Admin]);
require_roles!(AdminOnly, [Role::Admin]);
