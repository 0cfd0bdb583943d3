//! Database connection layer.
//!
//! The abstraction is intentionally minimal:
//! - `SqlitePool`: connection pool wrapper for SQLite
//!
//! # Example
//!
//! ```ignore
//! let pool = SqlitePool::connect_with("sqlite:data/app.db?mode=rwc", 5, Duration::from_secs(30)).await?;
//! let row = sqlx::query("SELECT 1").fetch_one(pool.inner()).await?;
//! ```

mod sqlite;

pub use sqlite::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS, SqlitePool};
