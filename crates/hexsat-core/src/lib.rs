//! # Hexsat Core
//!
//! Core types and utilities shared by every part of the hexsatisfaction API.
//!
//! - [`errors`]: [`AppError`], the single error type every handler returns
//! - [`reply`]: [`Reply`], the success / empty half of the response envelope
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Response envelope
//!
//! Every endpoint answers with one of three shapes:
//!
//! ```text
//! {"result": <payload>}      success
//! {"error": "<message>"}     failure
//! <empty body>               empty result (e.g. 404 on unknown credentials)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hexsat_core::{AppError, Reply};
//! use axum::http::StatusCode;
//!
//! async fn handler() -> Result<Reply<String>, AppError> {
//!     Ok(Reply::ok("hello".to_string()))
//! }
//! ```

pub mod errors;
pub mod password;
pub mod reply;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use reply::Reply;
