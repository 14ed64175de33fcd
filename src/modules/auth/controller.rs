use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use tracing::instrument;

use devcamper_core::{AppError, ErrorResponse};
use devcamper_models::{
    AuthResponse, DataResponse, EmptyData, LoginRequest, RegisterRequest, UpdateDetailsRequest,
    UpdatePasswordRequest, User,
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;
use super::session::{cleared_cookie, issue_session};

/// Register a new account and start a session
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (
            status = 200,
            description = "Registered; token set as cookie and returned",
            body = AuthResponse
        ),
        (status = 400, description = "Validation failed or email taken", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let user = AuthService::register(state.store.as_ref(), dto).await?;
    issue_session(jar, user.id, &state)
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Logged in; token set as cookie and returned",
            body = AuthResponse
        ),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let user = AuthService::login(state.store.as_ref(), dto).await?;
    issue_session(jar, user.id, &state)
}

/// Log out by overwriting the session cookie
#[utoipa::path(
    get,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = DataResponse<EmptyData>)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<DataResponse<EmptyData>>) {
    (
        jar.add(cleared_cookie()),
        Json(DataResponse::new(EmptyData::default())),
    )
}

/// Current account
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated account", body = DataResponse<User>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<DataResponse<User>> {
    Json(DataResponse::new(user))
}

/// Update name and email of the current account
#[utoipa::path(
    put,
    path = "/api/v1/auth/updatedetails",
    request_body = UpdateDetailsRequest,
    responses(
        (status = 200, description = "Account updated", body = DataResponse<User>),
        (status = 400, description = "Validation failed or email taken", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn update_details(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateDetailsRequest>,
) -> Result<Json<DataResponse<User>>, AppError> {
    let user = AuthService::update_details(state.store.as_ref(), &user, dto).await?;
    Ok(Json(DataResponse::new(user)))
}

/// Change the password and start a new session
#[utoipa::path(
    put,
    path = "/api/v1/auth/updatepassword",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed; new token issued", body = AuthResponse),
        (status = 401, description = "Current password is incorrect", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn update_password(
    State(state): State<AppState>,
    jar: CookieJar,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdatePasswordRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let user = AuthService::update_password(state.store.as_ref(), &user, dto).await?;
    issue_session(jar, user.id, &state)
}
