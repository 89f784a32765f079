use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager};

/// Shared by every handler: the connection pool and immutable configuration
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Connect to the configured database and make sure the schema exists
    pub async fn connect(config: AppConfig) -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::connect(&config.database).await?;
        DatabaseManager::bootstrap_schema(&pool).await?;
        Ok(Self::new(pool, config))
    }
}
