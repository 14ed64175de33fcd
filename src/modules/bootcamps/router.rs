use axum::{Router, routing::get};

use crate::modules::courses::controller::{create_course, get_bootcamp_courses};
use crate::modules::reviews::controller::{create_review, get_bootcamp_reviews};
use crate::state::AppState;

use super::controller::{
    create_bootcamp, delete_bootcamp, get_bootcamp, get_bootcamps, update_bootcamp,
};

pub fn init_bootcamps_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_bootcamps).post(create_bootcamp))
        .route(
            "/{id}",
            get(get_bootcamp).put(update_bootcamp).delete(delete_bootcamp),
        )
        .route(
            "/{id}/courses",
            get(get_bootcamp_courses).post(create_course),
        )
        .route(
            "/{id}/reviews",
            get(get_bootcamp_reviews).post(create_review),
        )
}
