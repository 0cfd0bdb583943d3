//! Hero storage.
//!
//! CRUD operations for the `heroes` table and the hero → powers join.

use sqlx::Row;
use sqlx::SqliteConnection;
use sqlx::sqlite::SqliteRow;

use crate::model::{Hero, Power};
use crate::storage::StorageError;
use crate::storage::db::SqlitePool;
use crate::storage::power_store::power_from_row;

const HERO_COLUMNS: &str = "id, name, super_name, created_at, updated_at";

pub(crate) fn hero_from_row(row: &SqliteRow) -> Result<Hero, sqlx::Error> {
    Ok(Hero::restore(
        row.try_get("id")?,
        row.try_get("name")?,
        row.try_get("super_name")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    ))
}

/// Hero storage facade.
#[derive(Clone, Debug)]
pub struct HeroStore {
    pool: SqlitePool,
}

impl HeroStore {
    /// Create a new hero store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a hero and return the stored record with its ID.
    pub async fn insert(&self, hero: &Hero) -> Result<Hero, StorageError> {
        let mut tx = self.pool.inner().begin().await?;
        let stored = Self::insert_on(&mut *tx, hero).await?;
        tx.commit().await?;
        Ok(stored)
    }

    /// Insert on a caller-owned connection, typically an open transaction.
    pub(crate) async fn insert_on(
        conn: &mut SqliteConnection,
        hero: &Hero,
    ) -> Result<Hero, StorageError> {
        let sql = format!(
            "INSERT INTO heroes (name, super_name, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             RETURNING {HERO_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(hero.name())
            .bind(hero.super_name())
            .bind(hero.created_at())
            .bind(hero.updated_at())
            .fetch_one(conn)
            .await?;
        Ok(hero_from_row(&row)?)
    }

    /// Write back the name and super name of an existing hero.
    ///
    /// Refreshes `updated_at`. Returns `None` if no row has this hero's ID.
    pub async fn update(&self, hero: &Hero) -> Result<Option<Hero>, StorageError> {
        let id = hero
            .id()
            .ok_or_else(|| StorageError::Internal("cannot update a hero without an id".into()))?;
        let now = chrono::Utc::now().timestamp_millis();

        let mut tx = self.pool.inner().begin().await?;

        let sql = format!(
            "UPDATE heroes SET name = ?, super_name = ?, updated_at = ?
             WHERE id = ?
             RETURNING {HERO_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(hero.name())
            .bind(hero.super_name())
            .bind(now)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let updated = row.as_ref().map(hero_from_row).transpose()?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Get a hero by ID.
    pub async fn get(&self, id: i64) -> Result<Option<Hero>, StorageError> {
        let sql = format!("SELECT {HERO_COLUMNS} FROM heroes WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.as_ref().map(hero_from_row).transpose()?)
    }

    /// List all heroes ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<Hero>, StorageError> {
        let sql = format!("SELECT {HERO_COLUMNS} FROM heroes ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(self.pool.inner()).await?;

        let heroes = rows
            .iter()
            .map(hero_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(heroes)
    }

    /// Powers held by a hero, in the order they were linked.
    pub async fn powers(&self, hero_id: i64) -> Result<Vec<Power>, StorageError> {
        let rows = sqlx::query(
            "SELECT p.id, p.name, p.description, p.created_at, p.updated_at
             FROM powers p
             JOIN hero_powers hp ON hp.power_id = p.id
             WHERE hp.hero_id = ?
             ORDER BY hp.id",
        )
        .bind(hero_id)
        .fetch_all(self.pool.inner())
        .await?;

        let powers = rows
            .iter()
            .map(power_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(powers)
    }

    /// Number of stored heroes.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM heroes")
            .fetch_one(self.pool.inner())
            .await?;
        Ok(row.0)
    }
}
