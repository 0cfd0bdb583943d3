//! Storage builder and handles.
//!
//! Provides a builder pattern for constructing the storage layer
//! and a handles struct for accessing all storage facades.

use std::time::Duration;

use crate::storage::StorageError;
use crate::storage::db::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS, SqlitePool};
use crate::storage::schema::init_schema;
use crate::storage::{HeroPowerStore, HeroStore, PowerStore};

/// Builder for constructing the storage layer.
pub struct StorageBuilder {
    db_url: String,
    max_connections: u32,
    acquire_timeout: Duration,
}

impl StorageBuilder {
    /// Create a new storage builder for a SQLite connection URL.
    pub fn new(db_url: impl Into<String>) -> Self {
        Self {
            db_url: db_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Set the maximum number of pooled connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set how long a caller waits for a free connection.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Connect, create the schema, and return handles.
    pub async fn build(self) -> Result<StorageHandles, StorageError> {
        let pool =
            SqlitePool::connect_with(&self.db_url, self.max_connections, self.acquire_timeout)
                .await?;
        init_schema(&pool).await?;

        Ok(StorageHandles {
            hero_store: HeroStore::new(pool.clone()),
            power_store: PowerStore::new(pool.clone()),
            hero_power_store: HeroPowerStore::new(pool.clone()),
            pool,
        })
    }
}

/// Handles to all storage layer facades.
#[derive(Clone, Debug)]
pub struct StorageHandles {
    /// Facade for the `heroes` table.
    pub hero_store: HeroStore,
    /// Facade for the `powers` table.
    pub power_store: PowerStore,
    /// Facade for the `hero_powers` table.
    pub hero_power_store: HeroPowerStore,
    /// Shared connection pool, used for readiness checks.
    pub pool: SqlitePool,
}

impl StorageHandles {
    /// Gracefully shutdown the storage layer.
    ///
    /// Waits for checked-out connections to be returned, then closes the pool.
    pub async fn shutdown(self) -> Result<(), StorageError> {
        self.pool.close().await;
        Ok(())
    }
}
