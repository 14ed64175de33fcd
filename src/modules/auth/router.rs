use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{get_me, login, logout, register, update_details, update_password};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/me", get(get_me))
        .route("/updatedetails", put(update_details))
        .route("/updatepassword", put(update_password))
}
