use std::fmt;
use std::sync::Arc;

use devcamper_config::{CorsConfig, JwtConfig, ServerConfig};
use devcamper_db::{DocumentStore, MemoryStore};
use devcamper_models::{Bootcamp, Model, Review, User};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub jwt_config: JwtConfig,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("server_config", &self.server_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, server_config: ServerConfig) -> Self {
        Self {
            store,
            jwt_config: JwtConfig::from_env(),
            server_config,
            cors_config: CorsConfig::from_env(),
        }
    }

    /// State backed by a fresh [`MemoryStore`] and default configuration.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(memory_store()),
            jwt_config: JwtConfig::default(),
            server_config: ServerConfig::default(),
            cors_config: CorsConfig::default(),
        }
    }
}

/// In-memory store with the same unique keys as the PostgreSQL schema.
pub fn memory_store() -> MemoryStore {
    MemoryStore::new()
        .with_unique(User::COLLECTION, "email")
        .with_unique(Bootcamp::COLLECTION, "name")
        .with_unique_fields(Review::COLLECTION, &["bootcamp", "user"])
}
