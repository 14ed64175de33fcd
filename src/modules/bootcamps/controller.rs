use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use devcamper_core::{AppError, ErrorResponse};
use devcamper_models::{
    Bootcamp, CreateBootcampDto, DataResponse, EmptyData, ListResponse, UpdateBootcampDto,
};

use crate::middleware::advanced_results::AdvancedResults;
use crate::middleware::auth::ResourceId;
use crate::middleware::role::PublisherOrAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::BootcampService;

/// List bootcamps
///
/// Supports field filters with `[gt]`, `[gte]`, `[lt]`, `[lte]` and `[in]`
/// operators, plus `select`, `sort`, `page` and `limit`. Each bootcamp carries
/// its courses.
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps",
    params(
        ("select" = Option<String>, Query, description = "Comma-separated fields to return"),
        (
            "sort" = Option<String>,
            Query,
            description = "Comma-separated sort fields, `-` for descending"
        ),
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 25")
    ),
    responses(
        (status = 200, description = "Paginated bootcamps", body = ListResponse),
        (status = 400, description = "Malformed filter", body = ErrorResponse)
    ),
    tag = "Bootcamps"
)]
#[instrument(skip_all)]
pub async fn get_bootcamps(results: AdvancedResults<Bootcamp>) -> Json<ListResponse> {
    Json(results.results)
}

/// Get a single bootcamp
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/{id}",
    params(("id" = String, Path, description = "Bootcamp id")),
    responses(
        (status = 200, description = "Bootcamp", body = DataResponse<Bootcamp>),
        (status = 404, description = "No such bootcamp", body = ErrorResponse)
    ),
    tag = "Bootcamps"
)]
#[instrument(skip_all)]
pub async fn get_bootcamp(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<Bootcamp>>, AppError> {
    let bootcamp = BootcampService::get_bootcamp(state.store.as_ref(), id).await?;
    Ok(Json(DataResponse::new(bootcamp)))
}

/// Create a bootcamp
#[utoipa::path(
    post,
    path = "/api/v1/bootcamps",
    request_body = CreateBootcampDto,
    responses(
        (status = 201, description = "Bootcamp created", body = DataResponse<Bootcamp>),
        (
            status = 400,
            description = "Validation failed, duplicate name or bootcamp already published",
            body = ErrorResponse
        ),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Bootcamps"
)]
#[instrument(skip_all)]
pub async fn create_bootcamp(
    State(state): State<AppState>,
    PublisherOrAdmin(user): PublisherOrAdmin,
    ValidatedJson(dto): ValidatedJson<CreateBootcampDto>,
) -> Result<(StatusCode, Json<DataResponse<Bootcamp>>), AppError> {
    let bootcamp = BootcampService::create_bootcamp(state.store.as_ref(), &user, dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(bootcamp))))
}

/// Update a bootcamp
#[utoipa::path(
    put,
    path = "/api/v1/bootcamps/{id}",
    params(("id" = String, Path, description = "Bootcamp id")),
    request_body = UpdateBootcampDto,
    responses(
        (status = 200, description = "Bootcamp updated", body = DataResponse<Bootcamp>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such bootcamp", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Bootcamps"
)]
#[instrument(skip_all)]
pub async fn update_bootcamp(
    State(state): State<AppState>,
    PublisherOrAdmin(user): PublisherOrAdmin,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateBootcampDto>,
) -> Result<Json<DataResponse<Bootcamp>>, AppError> {
    let bootcamp = BootcampService::update_bootcamp(state.store.as_ref(), &user, id, dto).await?;
    Ok(Json(DataResponse::new(bootcamp)))
}

/// Delete a bootcamp with its courses and reviews
#[utoipa::path(
    delete,
    path = "/api/v1/bootcamps/{id}",
    params(("id" = String, Path, description = "Bootcamp id")),
    responses(
        (status = 200, description = "Bootcamp deleted", body = DataResponse<EmptyData>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such bootcamp", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Bootcamps"
)]
#[instrument(skip_all)]
pub async fn delete_bootcamp(
    State(state): State<AppState>,
    PublisherOrAdmin(user): PublisherOrAdmin,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<EmptyData>>, AppError> {
    BootcampService::delete_bootcamp(state.store.as_ref(), &user, id).await?;
    Ok(Json(DataResponse::new(EmptyData::default())))
}
