//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, TokenService};
use quill_infra::{InMemoryPostRepository, JwtTokenService};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnections, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build state from explicit parts.
    pub fn with_parts(posts: Arc<dyn PostRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { posts, tokens }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        let posts: Arc<dyn PostRepository> = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => Arc::new(PostgresPostRepository::new(connections.main)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostRepository> = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self::with_parts(posts, tokens)
    }
}
