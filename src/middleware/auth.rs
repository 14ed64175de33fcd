use axum::{
    extract::{FromRequestParts, Path},
    http::{header, request::Parts},
};
use axum_extra::extract::CookieJar;
use tracing::debug;
use uuid::Uuid;

use devcamper_auth::verify_token;
use devcamper_core::AppError;
use devcamper_models::{Model, Role, User, from_document};

use crate::modules::auth::session::SESSION_COOKIE;
use crate::state::AppState;

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// The authenticated account, loaded fresh from the store on every request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    /// Passes when the account owns the resource or is an admin.
    pub fn ensure_owner_or_admin(&self, owner: Uuid, action: &str) -> Result<(), AppError> {
        if self.id() == owner || self.is_admin() {
            return Ok(());
        }
        Err(AppError::forbidden(format!(
            "User {} is not authorized to {}",
            self.id(),
            action
        )))
    }
}

/// Token from `Authorization: Bearer <token>`, falling back to the session cookie.
fn session_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or_else(|| AppError::unauthorized(NOT_AUTHORIZED))?;
        let claims = verify_token(&token, &state.jwt_config)?;
        let user_id = claims.user_id()?;

        let Some(doc) = state.store.find_by_id(User::COLLECTION, user_id).await? else {
            debug!(user_id = %user_id, "Token subject no longer exists");
            return Err(AppError::unauthorized(NOT_AUTHORIZED));
        };

        Ok(AuthUser(from_document(doc)?))
    }
}

/// A document id taken from the path.
///
/// Anything that is not a UUID cannot name a stored document, so it is
/// rejected as not found rather than as a bad request.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for ResourceId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::resource_not_found(parts.uri.path()))?;

        Uuid::parse_str(&raw)
            .map(ResourceId)
            .map_err(|_| AppError::resource_not_found(raw))
    }
}
