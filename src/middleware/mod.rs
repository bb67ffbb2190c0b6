//! Request middleware.
//!
//! - [`auth`]: the bearer token gate wrapping every `/api` group, and the
//!   [`AuthSubject`](auth::AuthSubject) extractor handlers use to read the
//!   authenticated user
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::auth::{AuthSubject, require_auth};
//!
//! async fn whoami(subject: AuthSubject) -> String {
//!     subject.0
//! }
//!
//! let gated = Router::new()
//!     .route("/whoami", get(whoami))
//!     .route_layer(middleware::from_fn_with_state(state.authority.clone(), require_auth));
//! ```

pub mod auth;
