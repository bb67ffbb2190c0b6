//! # Hexsat Config
//!
//! Configuration types for the hexsatisfaction API, loaded from environment
//! variables (a `.env` file is honoured through `dotenvy`).
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed CORS origins
//! - [`server`]: listen address
//! - [`database`]: optional Postgres connection settings
//!
//! # Example
//!
//! ```ignore
//! use hexsat_config::AppConfig;
//!
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Every configuration section, loaded once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads every section from the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            jwt: JwtConfig::from_env(),
            cors: CorsConfig::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }
}

pub(crate) fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
