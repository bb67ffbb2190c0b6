use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::authors::controller::{
    create, delete, find_by_name, get_all, get_by_id, mine, update,
};
use crate::state::AppState;

pub fn init_authors_public_router() -> Router<AppState> {
    Router::new()
        .route("/getAll", get(get_all))
        .route("/find", get(find_by_name))
        .route("/{id}", get(get_by_id))
}

/// Routes mounted under `/author/api`, behind the token gate.
pub fn init_authors_gated_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/mine", get(mine))
        .route("/{id}", put(update).delete(delete))
}
