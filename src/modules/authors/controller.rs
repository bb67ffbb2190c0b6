use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use hexsat_core::{AppError, Reply};
use hexsat_models::{Author, AuthorIdPath, AuthorNameQuery, AuthorRequest};

use crate::middleware::auth::AuthSubject;
use crate::modules::authors::service::AuthorService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[instrument(skip_all)]
pub async fn get_all(State(state): State<AppState>) -> Result<Reply<Vec<Author>>, AppError> {
    let authors = AuthorService::find_all(state.authors.as_ref()).await?;
    Ok(Reply::ok(authors))
}

#[instrument(skip_all, fields(name = %query.name))]
pub async fn find_by_name(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AuthorNameQuery>,
) -> Result<Reply<Vec<Author>>, AppError> {
    let authors = AuthorService::find_by_name(state.authors.as_ref(), &query.name).await?;
    Ok(Reply::ok(authors))
}

/// Unknown ids answer 404 with an empty body.
#[instrument(skip_all, fields(id = path.id))]
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<AuthorIdPath>,
) -> Result<Reply<Author>, AppError> {
    Ok(
        match AuthorService::find_by_id(state.authors.as_ref(), path.id).await? {
            Some(author) => Reply::ok(author),
            None => Reply::empty(StatusCode::NOT_FOUND),
        },
    )
}

#[instrument(skip_all, fields(subject = %subject.as_str()))]
pub async fn create(
    State(state): State<AppState>,
    subject: AuthSubject,
    ValidatedJson(dto): ValidatedJson<AuthorRequest>,
) -> Result<Reply<i32>, AppError> {
    let id = AuthorService::create(state.authors.as_ref(), subject.user_id()?, dto).await?;
    Ok(Reply::ok(id))
}

#[instrument(skip_all, fields(subject = %subject.as_str(), id = path.id))]
pub async fn update(
    State(state): State<AppState>,
    subject: AuthSubject,
    ValidatedPath(path): ValidatedPath<AuthorIdPath>,
    ValidatedJson(dto): ValidatedJson<AuthorRequest>,
) -> Result<Reply<i32>, AppError> {
    let id =
        AuthorService::update(state.authors.as_ref(), subject.user_id()?, path.id, dto).await?;
    Ok(Reply::ok(id))
}

#[instrument(skip_all, fields(subject = %subject.as_str(), id = path.id))]
pub async fn delete(
    State(state): State<AppState>,
    subject: AuthSubject,
    ValidatedPath(path): ValidatedPath<AuthorIdPath>,
) -> Result<Reply<i32>, AppError> {
    let id = AuthorService::delete(state.authors.as_ref(), subject.user_id()?, path.id).await?;
    Ok(Reply::ok(id))
}

#[instrument(skip_all, fields(subject = %subject.as_str()))]
pub async fn mine(
    State(state): State<AppState>,
    subject: AuthSubject,
) -> Result<Reply<Vec<Author>>, AppError> {
    let authors = AuthorService::find_by_owner(state.authors.as_ref(), subject.user_id()?).await?;
    Ok(Reply::ok(authors))
}
