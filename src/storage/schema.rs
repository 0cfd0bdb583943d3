//! Database schema definitions.
//!
//! The `CHECK` clauses mirror the rules in [`crate::model`], so rows written
//! around the model layer are still refused.

use crate::storage::StorageError;
use crate::storage::db::SqlitePool;

/// SQL statement for creating the heroes table.
pub const HEROES_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS heroes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        VARCHAR(256) NOT NULL CHECK (length(name) > 0),
    super_name  VARCHAR,
    created_at  BIGINT NOT NULL,
    updated_at  BIGINT NOT NULL
);
"#;

/// SQL statement for creating the powers table.
pub const POWERS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS powers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        VARCHAR(256) NOT NULL CHECK (length(name) > 0),
    description VARCHAR NOT NULL CHECK (length(description) >= 20),
    created_at  BIGINT NOT NULL,
    updated_at  BIGINT NOT NULL
);
"#;

/// SQL statement for creating the hero_powers join table.
pub const HERO_POWERS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS hero_powers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    strength    VARCHAR(50) NOT NULL CHECK (strength IN ('Strong', 'Weak', 'Average')),
    hero_id     INTEGER NOT NULL REFERENCES heroes (id),
    power_id    INTEGER NOT NULL REFERENCES powers (id),
    created_at  BIGINT NOT NULL,
    updated_at  BIGINT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_hero_powers_hero ON hero_powers (hero_id);
CREATE INDEX IF NOT EXISTS idx_hero_powers_power ON hero_powers (power_id);
"#;

/// Initialize the database schema.
///
/// Creates all tables and indexes if they don't exist.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    for ddl in [HEROES_TABLE_DDL, POWERS_TABLE_DDL, HERO_POWERS_TABLE_DDL] {
        sqlx::raw_sql(ddl).execute(pool.inner()).await?;
    }

    tracing::info!("Database schema initialized");
    Ok(())
}
