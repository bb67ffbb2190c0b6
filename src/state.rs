use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use hexsat_auth::TokenAuthority;
use hexsat_config::{AppConfig, CorsConfig};
use hexsat_db::{AuthorStore, MemoryStore, PgStore, UserStore};

/// Shared, read-only state handed to every handler.
///
/// Built once before serving starts; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub authors: Arc<dyn AuthorStore>,
    pub authority: Arc<TokenAuthority>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        authors: Arc<dyn AuthorStore>,
        authority: Arc<TokenAuthority>,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            users,
            authors,
            authority,
            cors_config,
        }
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(authority: TokenAuthority, cors_config: CorsConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, Arc::new(authority), cors_config)
    }

    /// Builds the token authority and the store described by `config`.
    ///
    /// Uses Postgres when `DATABASE_URL` is set, unless `force_in_memory`.
    pub async fn from_config(config: &AppConfig, force_in_memory: bool) -> anyhow::Result<Self> {
        let authority =
            TokenAuthority::from_config(&config.jwt).context("Invalid JWT configuration")?;
        info!(ttl_secs = authority.ttl().as_secs(), "token authority ready");

        match (&config.database.url, force_in_memory) {
            (Some(url), false) => {
                let store = Arc::new(PgStore::connect(url, &config.database).await?);
                info!("using postgres store");
                Ok(Self::new(
                    store.clone(),
                    store,
                    Arc::new(authority),
                    config.cors.clone(),
                ))
            }
            _ => {
                warn!("using in-memory store, data is lost on restart");
                Ok(Self::in_memory(authority, config.cors.clone()))
            }
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("authority", &self.authority)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
