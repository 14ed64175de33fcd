use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use devcamper_core::{AppError, ErrorResponse};
use devcamper_db::Document;
use devcamper_models::{
    Course, CreateCourseDto, DataResponse, EmptyData, ListResponse, UpdateCourseDto,
};

use crate::middleware::advanced_results::{AdvancedResults, ListParams};
use crate::middleware::auth::ResourceId;
use crate::middleware::role::PublisherOrAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CourseService;

/// List courses
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (
            status = 200,
            description = "Paginated courses with bootcamp name and description",
            body = ListResponse
        ),
        (status = 400, description = "Malformed filter", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn get_courses(results: AdvancedResults<Course>) -> Json<ListResponse> {
    Json(results.results)
}

/// List the courses of one bootcamp
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/{id}/courses",
    params(("id" = String, Path, description = "Bootcamp id")),
    responses(
        (status = 200, description = "Paginated courses of the bootcamp", body = ListResponse),
        (status = 400, description = "Malformed filter", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn get_bootcamp_courses(
    State(state): State<AppState>,
    ResourceId(bootcamp_id): ResourceId,
    params: ListParams<Course>,
) -> Result<Json<ListResponse>, AppError> {
    let results = params
        .scoped_to("bootcamp", bootcamp_id.to_string())
        .execute(state.store.as_ref())
        .await?;
    Ok(Json(results))
}

/// Get a single course
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (
            status = 200,
            description = "Course with bootcamp name and description",
            body = DataResponse<Course>
        ),
        (status = 404, description = "No such course", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn get_course(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<Document>>, AppError> {
    let course = CourseService::get_course(state.store.as_ref(), id).await?;
    Ok(Json(DataResponse::new(course)))
}

/// Add a course to a bootcamp
#[utoipa::path(
    post,
    path = "/api/v1/bootcamps/{id}/courses",
    params(("id" = String, Path, description = "Bootcamp id")),
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = DataResponse<Course>),
        (status = 403, description = "Not the bootcamp owner", body = ErrorResponse),
        (status = 404, description = "No such bootcamp", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    PublisherOrAdmin(user): PublisherOrAdmin,
    ResourceId(bootcamp_id): ResourceId,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<DataResponse<Course>>), AppError> {
    let course =
        CourseService::create_course(state.store.as_ref(), &user, bootcamp_id, dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(course))))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = DataResponse<Course>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such course", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn update_course(
    State(state): State<AppState>,
    PublisherOrAdmin(user): PublisherOrAdmin,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<DataResponse<Course>>, AppError> {
    let course = CourseService::update_course(state.store.as_ref(), &user, id, dto).await?;
    Ok(Json(DataResponse::new(course)))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted", body = DataResponse<EmptyData>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such course", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn delete_course(
    State(state): State<AppState>,
    PublisherOrAdmin(user): PublisherOrAdmin,
    ResourceId(id): ResourceId,
) -> Result<Json<DataResponse<EmptyData>>, AppError> {
    CourseService::delete_course(state.store.as_ref(), &user, id).await?;
    Ok(Json(DataResponse::new(EmptyData::default())))
}
