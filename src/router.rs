//! Route table.
//!
//! Each resource is a public router plus a token-gated router nested under
//! `/api`. Resources are mounted under prefixes that must be pairwise
//! disjoint: no prefix may equal another or be a leading run of another's
//! segments. [`mount_resources`] checks this before building the table, so an
//! overlapping layout fails at startup with [`RouteTableError`].

use std::sync::Arc;

use anyhow::anyhow;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use thiserror::Error;
use tower_http::cors::CorsLayer;

use hexsat_auth::TokenAuthority;
use hexsat_config::CorsConfig;
use hexsat_core::AppError;
use hexsat_observability::logging_middleware;

use crate::middleware::auth::require_auth;
use crate::modules::authors::router::{init_authors_gated_router, init_authors_public_router};
use crate::modules::users::router::{init_users_gated_router, init_users_public_router};
use crate::state::AppState;

pub const USER_PATH: &str = "/user";
pub const AUTHOR_PATH: &str = "/author";
/// Segment under which each resource mounts its token-gated routes.
pub const GATED_PATH: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("invalid route prefix `{0}`")]
    InvalidPrefix(String),

    #[error("route prefixes `{0}` and `{1}` overlap")]
    OverlappingPrefixes(String, String),
}

fn check_prefix(prefix: &str) -> Result<(), RouteTableError> {
    let valid = prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && prefix[1..]
            .split('/')
            .all(|segment| !segment.is_empty() && !segment.contains(['{', '}', '*']));

    if valid {
        Ok(())
    } else {
        Err(RouteTableError::InvalidPrefix(prefix.to_string()))
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    let is_under = |inner: &str, outer: &str| {
        inner
            .strip_prefix(outer)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    };
    is_under(a, b) || is_under(b, a)
}

/// Every prefix must be a static path and no prefix may equal another or
/// contain another as a leading run of segments.
pub fn validate_prefixes(prefixes: &[&str]) -> Result<(), RouteTableError> {
    for prefix in prefixes {
        check_prefix(prefix)?;
    }

    for (i, a) in prefixes.iter().enumerate() {
        if let Some(b) = prefixes[i + 1..].iter().find(|b| overlaps(a, b)) {
            return Err(RouteTableError::OverlappingPrefixes(
                a.to_string(),
                b.to_string(),
            ));
        }
    }

    Ok(())
}

/// Nests each resource router under its prefix once the prefixes are known
/// to be disjoint.
pub fn mount_resources<S>(resources: Vec<(&str, Router<S>)>) -> Result<Router<S>, RouteTableError>
where
    S: Clone + Send + Sync + 'static,
{
    let prefixes: Vec<&str> = resources.iter().map(|(prefix, _)| *prefix).collect();
    validate_prefixes(&prefixes)?;

    Ok(resources
        .into_iter()
        .fold(Router::new(), |router, (prefix, resource)| {
            router.nest(prefix, resource)
        }))
}

/// A resource: its public routes, plus the gated routes under `/api`.
///
/// The gate is applied with `route_layer`, so it only runs for requests that
/// matched a gated route.
pub fn resource_router(
    public: Router<AppState>,
    gated: Router<AppState>,
    authority: Arc<TokenAuthority>,
) -> Router<AppState> {
    public.nest(
        GATED_PATH,
        gated.route_layer(middleware::from_fn_with_state(authority, require_auth)),
    )
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

async fn not_found() -> AppError {
    AppError::not_found(anyhow!("resource not found"))
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed(anyhow!("method not allowed"))
}

pub fn init_router(state: AppState) -> Result<Router, RouteTableError> {
    let users = resource_router(
        init_users_public_router(),
        init_users_gated_router(),
        state.authority.clone(),
    );
    let authors = resource_router(
        init_authors_public_router(),
        init_authors_gated_router(),
        state.authority.clone(),
    );

    let router = mount_resources(vec![(USER_PATH, users), (AUTHOR_PATH, authors)])?
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware));

    Ok(router)
}
