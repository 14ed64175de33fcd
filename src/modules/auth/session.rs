//! Session cookie handling.

use axum::Json;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use devcamper_auth::create_session_token;
use devcamper_core::AppError;
use devcamper_models::AuthResponse;

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "token";

/// Value stored by logout; it never verifies as a token.
pub const CLEARED_VALUE: &str = "none";

const CLEARED_TTL_SECS: i64 = 10;

/// HTTP-only session cookie that expires together with the token.
pub fn session_cookie(token: String, state: &AppState) -> Result<Cookie<'static>, AppError> {
    let expires = OffsetDateTime::now_utc()
        .checked_add(Duration::days(state.jwt_config.expire_days))
        .ok_or_else(|| {
            AppError::internal_error(format!(
                "Session lifetime of {} days is out of range",
                state.jwt_config.expire_days
            ))
        })?;

    Ok(Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.server_config.environment.is_production())
        .expires(expires)
        .build())
}

pub fn cleared_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, CLEARED_VALUE))
        .path("/")
        .http_only(true)
        .expires(OffsetDateTime::now_utc() + Duration::seconds(CLEARED_TTL_SECS))
        .build()
}

/// Signs a token for `user_id`, sets it as the session cookie and echoes it
/// in the body.
pub fn issue_session(
    jar: CookieJar,
    user_id: Uuid,
    state: &AppState,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let token = create_session_token(user_id, &state.jwt_config)?;
    let jar = jar.add(session_cookie(token.clone(), state)?);
    Ok((jar, Json(AuthResponse::new(token))))
}
