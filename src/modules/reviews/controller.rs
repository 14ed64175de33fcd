use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use devcamper_core::{AppError, ErrorResponse};
use devcamper_db::Document;
use devcamper_models::{
    CreateReviewDto, DataResponse, EmptyData, ListResponse, Review, UpdateReviewDto,
};

use crate::middleware::advanced_results::{AdvancedResults, ListParams};
use crate::middleware::auth::ResourceId;
use crate::middleware::role::UserOrAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ReviewService;

/// List reviews
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    responses(
        (
            status = 200,
            description = "Paginated reviews with bootcamp name and description",
            body = ListResponse
        ),
        (status = 400, description = "Malformed filter", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
#[instrument(skip_all)]
pub async fn get_reviews(results: AdvancedResults<Review>) -> Json<ListResponse> {
    Json(results.results)
}

/// List the reviews of one bootcamp
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/{id}/reviews",
    params(("id" = String, Path, description = "Bootcamp id")),
    responses(
        (status = 200, description = "Paginated reviews of the bootcamp", body = ListResponse)
    ),
    tag = "Reviews"
)]
#[instrument(skip_all)]
pub async fn get_bootcamp_reviews(
    State(state): State<AppState>,
    ResourceId(bootcamp_id): ResourceId,
    params: ListParams<Review>,
) -> Result<Json<ListResponse>, AppError> {
    let results = params
        .scoped_to("bootcamp", bootcamp_id.to_string())
        .execute(state.store.as_ref())
        .await?;
    Ok(Json(results))
}

/// Get a single review
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (
            status = 200,
            description = "Review with bootcamp name and description",
            body = DataResponse<Review>
        ),
        (status = 404, description = "No such review", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
#[instrument(skip_all)]
pub async fn get_review(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<Document>>, AppError> {
    let review = ReviewService::get_review(state.store.as_ref(), id).await?;
    Ok(Json(DataResponse::new(review)))
}

/// Review a bootcamp
#[utoipa::path(
    post,
    path = "/api/v1/bootcamps/{id}/reviews",
    params(("id" = String, Path, description = "Bootcamp id")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = DataResponse<Review>),
        (
            status = 400,
            description = "Validation failed or bootcamp already reviewed",
            body = ErrorResponse
        ),
        (status = 403, description = "Role not allowed", body = ErrorResponse),
        (status = 404, description = "No such bootcamp", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip_all)]
pub async fn create_review(
    State(state): State<AppState>,
    UserOrAdmin(user): UserOrAdmin,
    ResourceId(bootcamp_id): ResourceId,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<DataResponse<Review>>), AppError> {
    let review =
        ReviewService::create_review(state.store.as_ref(), &user, bootcamp_id, dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(review))))
}

/// Update a review
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review id")),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review updated", body = DataResponse<Review>),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "No such review", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip_all)]
pub async fn update_review(
    State(state): State<AppState>,
    UserOrAdmin(user): UserOrAdmin,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateReviewDto>,
) -> Result<Json<DataResponse<Review>>, AppError> {
    let review = ReviewService::update_review(state.store.as_ref(), &user, id, dto).await?;
    Ok(Json(DataResponse::new(review)))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = DataResponse<EmptyData>),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "No such review", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip_all)]
pub async fn delete_review(
    State(state): State<AppState>,
    UserOrAdmin(user): UserOrAdmin,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<EmptyData>>, AppError> {
    ReviewService::delete_review(state.store.as_ref(), &user, id).await?;
    Ok(Json(DataResponse::new(EmptyData::default())))
}
