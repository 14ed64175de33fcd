use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use devcamper_auth::Claims;
use devcamper_core::{ErrorResponse, PageLink, Pagination};
use devcamper_models::{
    AuthResponse, Bootcamp, Career, Course, CreateBootcampDto, CreateCourseDto, CreateReviewDto,
    CreateUserDto, EmptyData, ListResponse, LoginRequest, MinimumSkill, RegisterRequest, Review,
    Role, UpdateBootcampDto, UpdateCourseDto, UpdateDetailsRequest, UpdatePasswordRequest,
    UpdateReviewDto, UpdateUserDto, User,
};

use crate::modules::auth::session::SESSION_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::update_details,
        crate::modules::auth::controller::update_password,
        crate::modules::bootcamps::controller::get_bootcamps,
        crate::modules::bootcamps::controller::get_bootcamp,
        crate::modules::bootcamps::controller::create_bootcamp,
        crate::modules::bootcamps::controller::update_bootcamp,
        crate::modules::bootcamps::controller::delete_bootcamp,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_bootcamp_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::reviews::controller::get_reviews,
        crate::modules::reviews::controller::get_bootcamp_reviews,
        crate::modules::reviews::controller::get_review,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::update_review,
        crate::modules::reviews::controller::delete_review,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            AuthResponse,
            Bootcamp,
            Career,
            Claims,
            Course,
            CreateBootcampDto,
            CreateCourseDto,
            CreateReviewDto,
            CreateUserDto,
            EmptyData,
            ErrorResponse,
            ListResponse,
            LoginRequest,
            MinimumSkill,
            PageLink,
            Pagination,
            RegisterRequest,
            Review,
            Role,
            UpdateBootcampDto,
            UpdateCourseDto,
            UpdateDetailsRequest,
            UpdatePasswordRequest,
            UpdateReviewDto,
            UpdateUserDto,
            User,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current account"),
        (name = "Bootcamps", description = "Bootcamp listings and management"),
        (name = "Courses", description = "Courses offered by bootcamps"),
        (name = "Reviews", description = "Bootcamp reviews and ratings"),
        (name = "Users", description = "Account administration")
    ),
    info(
        title = "DevCamper API",
        version = "0.1.0",
        description = "Bootcamp directory API with filtering, pagination and role-based access.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/login",
            "/api/v1/bootcamps",
            "/api/v1/bootcamps/{id}/courses",
            "/api/v1/reviews/{id}",
            "/api/v1/users",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let schemes = &doc.components.unwrap().security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
        assert!(schemes.contains_key("cookie_auth"));
    }
}
