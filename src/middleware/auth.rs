//! Token gate for the `/api` groups.
//!
//! [`require_auth`] runs once per request:
//!
//! 1. read the `Authorization` header (absent: [`AuthRejection::MissingToken`])
//! 2. parse it as `Bearer <token>` (otherwise: [`AuthRejection::InvalidToken`])
//! 3. validate the token with the shared [`TokenAuthority`]
//! 4. on success, store the [`AuthSubject`] in the request extensions and run
//!    the wrapped handler
//!
//! A rejected request is answered 401 with the error envelope and the wrapped
//! handler is never called.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use thiserror::Error;
use tracing::debug;

use hexsat_auth::{TokenAuthority, TokenError};
use hexsat_core::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("missing authorization token")]
    MissingToken,

    #[error("invalid authorization token")]
    InvalidToken,

    #[error("authorization token has expired")]
    ExpiredToken,
}

impl From<TokenError> for AuthRejection {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthRejection::ExpiredToken,
            _ => AuthRejection::InvalidToken,
        }
    }
}

/// Subject of the validated token. Only present on gated routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSubject(pub String);

impl AuthSubject {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The subject as a user id.
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.0
            .parse()
            .map_err(|_| AppError::unauthorized(AuthRejection::InvalidToken))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Accepted(AuthSubject),
    Rejected(AuthRejection),
}

pub fn authenticate(headers: &HeaderMap, authority: &TokenAuthority) -> AuthDecision {
    if !headers.contains_key(header::AUTHORIZATION) {
        return AuthDecision::Rejected(AuthRejection::MissingToken);
    }

    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        return AuthDecision::Rejected(AuthRejection::InvalidToken);
    };

    let token = bearer.token().trim();
    if token.is_empty() {
        return AuthDecision::Rejected(AuthRejection::InvalidToken);
    }

    match authority.validate(token) {
        Ok(subject) => AuthDecision::Accepted(AuthSubject(subject)),
        Err(err) => AuthDecision::Rejected(err.into()),
    }
}

pub async fn require_auth(
    State(authority): State<Arc<TokenAuthority>>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(req.headers(), &authority) {
        AuthDecision::Accepted(subject) => {
            req.extensions_mut().insert(subject);
            next.run(req).await
        }
        AuthDecision::Rejected(rejection) => {
            debug!(path = %req.uri().path(), %rejection, "request rejected");
            AppError::unauthorized(rejection).into_response()
        }
    }
}

impl<S> FromRequestParts<S> for AuthSubject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSubject>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(AuthRejection::MissingToken))
    }
}
