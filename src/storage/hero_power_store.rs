//! HeroPower storage.
//!
//! Links are insert-only: there is no update or delete path.

use sqlx::Row;
use sqlx::SqliteConnection;
use sqlx::sqlite::SqliteRow;

use crate::model::{HeroPower, Strength};
use crate::storage::StorageError;
use crate::storage::db::SqlitePool;

const HERO_POWER_COLUMNS: &str = "id, strength, hero_id, power_id, created_at, updated_at";

fn hero_power_from_row(row: &SqliteRow) -> Result<HeroPower, StorageError> {
    let strength_str: String = row.try_get("strength")?;
    let strength = strength_str.parse::<Strength>().map_err(|_| {
        StorageError::InvalidData(format!("unknown strength '{strength_str}'"))
    })?;

    Ok(HeroPower::restore(
        row.try_get("id")?,
        strength,
        row.try_get("hero_id")?,
        row.try_get("power_id")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    ))
}

/// HeroPower storage facade.
#[derive(Clone, Debug)]
pub struct HeroPowerStore {
    pool: SqlitePool,
}

impl HeroPowerStore {
    /// Create a new hero-power store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a link and return the stored record with its ID.
    ///
    /// Fails with a constraint violation if the hero or power does not exist;
    /// the transaction is rolled back and nothing is stored.
    pub async fn insert(&self, link: &HeroPower) -> Result<HeroPower, StorageError> {
        let mut tx = self.pool.inner().begin().await?;
        let stored = Self::insert_on(&mut *tx, link).await?;
        tx.commit().await?;
        Ok(stored)
    }

    pub(crate) async fn insert_on(
        conn: &mut SqliteConnection,
        link: &HeroPower,
    ) -> Result<HeroPower, StorageError> {
        let sql = format!(
            "INSERT INTO hero_powers (strength, hero_id, power_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {HERO_POWER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(link.strength().to_string())
            .bind(link.hero_id())
            .bind(link.power_id())
            .bind(link.created_at())
            .bind(link.updated_at())
            .fetch_one(conn)
            .await?;
        hero_power_from_row(&row)
    }

    /// List all links.
    pub async fn list_all(&self) -> Result<Vec<HeroPower>, StorageError> {
        let sql = format!("SELECT {HERO_POWER_COLUMNS} FROM hero_powers ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(self.pool.inner()).await?;

        rows.iter().map(hero_power_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Hero, Power};
    use crate::storage::{StorageBuilder, StorageHandles};

    async fn create_test_handles() -> StorageHandles {
        StorageBuilder::new("sqlite::memory:")
            .max_connections(1)
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_hero_power_insert() {
        let handles = create_test_handles().await;
        let hero = handles
            .hero_store
            .insert(&Hero::new("Gwen Stacy", Some("Spider-Gwen".to_string())).unwrap())
            .await
            .unwrap();
        let power = handles
            .power_store
            .insert(&Power::new("wall crawling", "can cling to walls and ceilings").unwrap())
            .await
            .unwrap();

        let link = HeroPower::new("Weak", hero.id().unwrap(), power.id().unwrap()).unwrap();
        let stored = handles.hero_power_store.insert(&link).await.unwrap();
        assert!(stored.id().is_some());
        assert_eq!(stored.strength(), Strength::Weak);

        let links = handles.hero_power_store.list_all().await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].power_id(), power.id().unwrap());
    }

    #[tokio::test]
    async fn test_hero_power_dangling_reference_rejected() {
        let handles = create_test_handles().await;

        let link = HeroPower::new("Strong", 1, 1).unwrap();
        let err = handles.hero_power_store.insert(&link).await.unwrap_err();
        assert!(err.is_constraint_violation());

        assert!(handles.hero_power_store.list_all().await.unwrap().is_empty());
    }
}
