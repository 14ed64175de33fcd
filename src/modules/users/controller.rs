use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use devcamper_core::{AppError, ErrorResponse};
use devcamper_models::{CreateUserDto, DataResponse, EmptyData, ListResponse, UpdateUserDto, User};

use crate::middleware::advanced_results::AdvancedResults;
use crate::middleware::auth::ResourceId;
use crate::middleware::role::AdminOnly;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::UserService;

/// List users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Paginated users", body = ListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(
    _admin: AdminOnly,
    results: AdvancedResults<User>,
) -> Result<Json<ListResponse>, AppError> {
    Ok(Json(results.results))
}

/// Get a single user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = DataResponse<User>),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<User>>, AppError> {
    let user = UserService::get_user(state.store.as_ref(), id).await?;
    Ok(Json(DataResponse::new(user)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = DataResponse<User>),
        (status = 400, description = "Validation failed or email taken", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<DataResponse<User>>), AppError> {
    let user = UserService::create_user(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(user))))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = DataResponse<User>),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<DataResponse<User>>, AppError> {
    let user = UserService::update_user(state.store.as_ref(), id, dto).await?;
    Ok(Json(DataResponse::new(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DataResponse<EmptyData>),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<EmptyData>>, AppError> {
    UserService::delete_user(state.store.as_ref(), id).await?;
    Ok(Json(DataResponse::new(EmptyData::default())))
}
