//! Success and empty responses.
//!
//! A [`Reply`] is consumed when it is turned into a response, and a handler
//! returns exactly one `Result<Reply<T>, AppError>`, so each request is
//! written exactly once.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// `{"result": payload}` with the given status.
    Success { status: StatusCode, payload: T },
    /// Status only, empty body.
    Empty(StatusCode),
}

/// Body of the success half of the response envelope.
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub result: T,
}

impl<T> Reply<T> {
    pub fn success(status: StatusCode, payload: T) -> Self {
        Reply::Success { status, payload }
    }

    pub fn ok(payload: T) -> Self {
        Self::success(StatusCode::OK, payload)
    }

    pub fn empty(status: StatusCode) -> Self {
        Reply::Empty(status)
    }
}

impl<T> IntoResponse for Reply<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match self {
            Reply::Success { status, payload } => {
                (status, Json(SuccessBody { result: payload })).into_response()
            }
            Reply::Empty(status) => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_success_wraps_payload() {
        let response = Reply::ok(vec!["a", "b"]).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "result": ["a", "b"] }));
    }

    #[tokio::test]
    async fn test_empty_has_no_body() {
        let response = Reply::<String>::empty(StatusCode::NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
