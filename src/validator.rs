//! Request envelopes: build a typed request, then validate it.
//!
//! Each extractor runs two phases before the handler body executes:
//!
//! 1. **Build**: decode the carrier (JSON body, path segments or query string)
//!    into `T`. Failures answer 400 with a readable message.
//! 2. **Validate**: run `T`'s [`Validate`] rules. These are pure functions of
//!    the decoded value, so the outcome never changes between calls.
//!    Failures answer 400 listing every broken rule.
//!
//! A handler that takes one of these extractors is never invoked with an
//! envelope that failed either phase. The request body is moved into the JSON
//! decoder, so it is dropped exactly once whichever way decoding ends.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use hexsat_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join(", ")
}

/// Maps a serde decoding message to the message sent to the client.
fn describe_decode_error(error_msg: &str) -> String {
    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return format!("{} is required", field);
    }

    if error_msg.contains("invalid type") || error_msg.contains("invalid digit") {
        return "Invalid field type in request".to_string();
    }

    "Invalid request".to_string()
}

/// Validate phase shared by every envelope.
pub fn validate_envelope<T: Validate>(value: T) -> Result<T, AppError> {
    value
        .validate()
        .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))?;
    Ok(value)
}

/// JSON body envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(anyhow!(
                        "Missing 'Content-Type: application/json' header"
                    ));
                }

                let error_msg = rejection.body_text();
                match describe_decode_error(&error_msg).as_str() {
                    "Invalid request" => AppError::bad_request(anyhow!("Invalid request body")),
                    message => AppError::bad_request(anyhow!("{}", message)),
                }
            })?;

        validate_envelope(value).map(ValidatedJson)
    }
}

/// Path parameters envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(anyhow!("Invalid path: {}", rejection.body_text()))
            })?;

        validate_envelope(value).map(ValidatedPath)
    }
}

/// Query string envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let message = describe_decode_error(&rejection.body_text());
                AppError::bad_request(anyhow!("{}", message))
            })?;

        validate_envelope(value).map(ValidatedQuery)
    }
}
