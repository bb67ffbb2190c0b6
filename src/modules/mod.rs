//! HTTP resources. Each module follows the same layout:
//!
//! - `controller`: axum handlers; build and validate the request, call the
//!   service, write one reply
//! - `service`: business rules over the store traits
//! - `router`: a public router and a router for the token-gated `/api` group

pub mod authors;
pub mod users;
