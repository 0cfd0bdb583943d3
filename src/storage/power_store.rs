//! Power storage.
//!
//! CRUD operations for the `powers` table and the power → heroes join.

use sqlx::Row;
use sqlx::SqliteConnection;
use sqlx::sqlite::SqliteRow;

use crate::model::{Hero, Power};
use crate::storage::StorageError;
use crate::storage::db::SqlitePool;
use crate::storage::hero_store::hero_from_row;

const POWER_COLUMNS: &str = "id, name, description, created_at, updated_at";

pub(crate) fn power_from_row(row: &SqliteRow) -> Result<Power, sqlx::Error> {
    Ok(Power::restore(
        row.try_get("id")?,
        row.try_get("name")?,
        row.try_get("description")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    ))
}

/// Power storage facade.
#[derive(Clone, Debug)]
pub struct PowerStore {
    pool: SqlitePool,
}

impl PowerStore {
    /// Create a new power store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a power and return the stored record with its ID.
    pub async fn insert(&self, power: &Power) -> Result<Power, StorageError> {
        let mut tx = self.pool.inner().begin().await?;
        let stored = Self::insert_on(&mut *tx, power).await?;
        tx.commit().await?;
        Ok(stored)
    }

    pub(crate) async fn insert_on(
        conn: &mut SqliteConnection,
        power: &Power,
    ) -> Result<Power, StorageError> {
        let sql = format!(
            "INSERT INTO powers (name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             RETURNING {POWER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(power.name())
            .bind(power.description())
            .bind(power.created_at())
            .bind(power.updated_at())
            .fetch_one(conn)
            .await?;
        Ok(power_from_row(&row)?)
    }

    /// Write back the description of an existing power.
    ///
    /// Refreshes `updated_at`. Returns `None` if no row has this power's ID.
    /// A rejected write rolls the transaction back and leaves the row as it was.
    pub async fn update(&self, power: &Power) -> Result<Option<Power>, StorageError> {
        let id = power
            .id()
            .ok_or_else(|| StorageError::Internal("cannot update a power without an id".into()))?;
        let now = chrono::Utc::now().timestamp_millis();

        let mut tx = self.pool.inner().begin().await?;

        let sql = format!(
            "UPDATE powers SET description = ?, updated_at = ?
             WHERE id = ?
             RETURNING {POWER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(power.description())
            .bind(now)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let updated = row.as_ref().map(power_from_row).transpose()?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Get a power by ID.
    pub async fn get(&self, id: i64) -> Result<Option<Power>, StorageError> {
        let sql = format!("SELECT {POWER_COLUMNS} FROM powers WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.as_ref().map(power_from_row).transpose()?)
    }

    /// List all powers ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<Power>, StorageError> {
        let sql = format!("SELECT {POWER_COLUMNS} FROM powers ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(self.pool.inner()).await?;

        let powers = rows
            .iter()
            .map(power_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(powers)
    }

    /// Heroes holding a power, in the order they were linked.
    pub async fn heroes(&self, power_id: i64) -> Result<Vec<Hero>, StorageError> {
        let rows = sqlx::query(
            "SELECT h.id, h.name, h.super_name, h.created_at, h.updated_at
             FROM heroes h
             JOIN hero_powers hp ON hp.hero_id = h.id
             WHERE hp.power_id = ?
             ORDER BY hp.id",
        )
        .bind(power_id)
        .fetch_all(self.pool.inner())
        .await?;

        let heroes = rows
            .iter()
            .map(hero_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(heroes)
    }
}
