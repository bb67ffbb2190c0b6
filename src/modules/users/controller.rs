use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use hexsat_core::{AppError, Reply};
use hexsat_models::{LoginUserRequest, RegisterUserRequest, UserWithRole};

use crate::middleware::auth::AuthSubject;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Exchanges credentials for a token. Unknown credentials answer 404 with an
/// empty body.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginUserRequest>,
) -> Result<Reply<String>, AppError> {
    let token =
        UserService::find_by_credentials(state.users.as_ref(), &state.authority, dto).await?;

    Ok(match token {
        Some(token) => Reply::ok(token),
        None => Reply::empty(StatusCode::NOT_FOUND),
    })
}

#[instrument(skip_all)]
pub async fn registration(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserRequest>,
) -> Result<Reply<i32>, AppError> {
    let id = UserService::register(state.users.as_ref(), dto).await?;
    Ok(Reply::ok(id))
}

#[instrument(skip_all, fields(subject = %subject.as_str()))]
pub async fn get_all(
    State(state): State<AppState>,
    subject: AuthSubject,
) -> Result<Reply<Vec<UserWithRole>>, AppError> {
    let users = UserService::find_all_users(state.users.as_ref()).await?;
    Ok(Reply::ok(users))
}
