use std::env;

use crate::parse_var;

/// Postgres settings. Without `DATABASE_URL` the service runs on the
/// in-memory store.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS").unwrap_or(5),
        }
    }
}
