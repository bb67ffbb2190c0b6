use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{get_all, login, registration};
use crate::state::AppState;

pub fn init_users_public_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/registration", post(registration))
}

/// Routes mounted under `/user/api`, behind the token gate.
pub fn init_users_gated_router() -> Router<AppState> {
    Router::new().route("/getAll", get(get_all))
}
