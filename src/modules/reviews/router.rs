use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{delete_review, get_review, get_reviews, update_review};

pub fn init_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_reviews))
        .route("/{id}", get(get_review).put(update_review).delete(delete_review))
}
