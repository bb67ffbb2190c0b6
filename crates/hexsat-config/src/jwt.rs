use std::env;

use crate::parse_var;

/// Default token lifetime: 1 hour.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret. There is no default; `None` means unset.
    pub secret: Option<String>,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .ok()
                .filter(|secret| !secret.trim().is_empty()),
            access_token_expiry: parse_var("JWT_ACCESS_EXPIRY")
                .filter(|expiry: &i64| *expiry > 0)
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
        }
    }
}
