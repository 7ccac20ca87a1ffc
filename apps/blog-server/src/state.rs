//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostAccessController;
use blog_core::ports::{PostRepository, UserRepository};
use blog_infra::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the state, backed by PostgreSQL when it is configured and reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let state = match db_config {
            Some(config) => Self::connect(config).await,
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        tracing::info!("Application state initialized");
        state
    }

    /// State backed by fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }

    /// Access rules over this state's repositories.
    pub fn access(&self) -> PostAccessController {
        PostAccessController::new(self.posts.clone(), self.users.clone())
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &DatabaseConfig) -> Self {
        use blog_infra::DatabaseConnections;
        use blog_infra::database::{PostgresPostRepository, PostgresUserRepository};

        match DatabaseConnections::init(config).await {
            Ok(connections) => Self {
                posts: Arc::new(PostgresPostRepository::new(connections.main.clone())),
                users: Arc::new(PostgresUserRepository::new(connections.main)),
            },
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_config: &DatabaseConfig) -> Self {
        tracing::warn!("DATABASE_URL set but the postgres feature is disabled. Using in-memory mode.");
        Self::in_memory()
    }
}
