//! Application state

use std::sync::Arc;

use sqlx::SqlitePool;
use tm_core::category::SqliteCategoryStore;
use tm_core::task::SqliteTaskStore;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    task_store: SqliteTaskStore,
    category_store: SqliteCategoryStore,
    secure_cookies: bool,
}

impl AppState {
    /// Open the database named by the configuration
    pub async fn new(config: &Config) -> tm_core::Result<Self> {
        let pool = tm_core::db::connect(&config.database_url, config.max_connections).await?;
        Ok(Self::with_pool(pool, config.secure_cookies))
    }

    pub fn with_pool(pool: SqlitePool, secure_cookies: bool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_store: SqliteTaskStore::new(pool.clone()),
                category_store: SqliteCategoryStore::new(pool.clone()),
                pool,
                secure_cookies,
            }),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &SqliteTaskStore {
        &self.inner.task_store
    }

    /// Get reference to the category store
    pub fn category_store(&self) -> &SqliteCategoryStore {
        &self.inner.category_store
    }

    pub fn secure_cookies(&self) -> bool {
        self.inner.secure_cookies
    }
}
