//! Demo data seeding.
//!
//! A seed file lists heroes, powers and the links between them. Links name
//! their hero and power rather than using IDs, so a file stays valid no
//! matter which IDs the database hands out:
//!
//! ```yaml
//! heroes:
//!   - name: Kamala Khan
//!     super_name: Ms. Marvel
//! powers:
//!   - name: flight
//!     description: gives the wielder the ability to fly through the skies at supersonic speed
//! hero_powers:
//!   - hero: Kamala Khan
//!     power: flight
//!     strength: Strong
//! ```
//!
//! Seeding is insert-only and is skipped when the database already holds heroes.
//! The whole file is written in one transaction: either every row lands or none.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Hero, HeroPower, Power, ValidationError};
use crate::storage::{HeroPowerStore, HeroStore, PowerStore, StorageError, StorageHandles};

/// Seed loading and application errors.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Failed to read the seed file.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the seed YAML.
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The file is structurally wrong (duplicates, dangling references).
    #[error("invalid seed data: {0}")]
    Invalid(String),

    /// A record failed model validation.
    #[error("seed record '{name}': {source}")]
    Validation {
        name: String,
        #[source]
        source: ValidationError,
    },

    /// Writing to the database failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A hero entry in a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedHero {
    pub name: String,
    #[serde(default)]
    pub super_name: Option<String>,
}

/// A power entry in a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedPower {
    pub name: String,
    pub description: String,
}

/// A link entry in a seed file, by hero and power name.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedHeroPower {
    pub hero: String,
    pub power: String,
    pub strength: String,
}

/// Parsed seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub heroes: Vec<SeedHero>,
    #[serde(default)]
    pub powers: Vec<SeedPower>,
    #[serde(default)]
    pub hero_powers: Vec<SeedHeroPower>,
}

/// Number of rows inserted by [`SeedData::apply`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedResult {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
    /// True when seeding was skipped because heroes already exist.
    pub skipped: bool,
}

impl SeedData {
    /// Load and validate a seed file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate seed data from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, SeedError> {
        let data: Self = serde_yaml::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    /// Check names are unique and every link resolves.
    ///
    /// Field rules (description length, strength) are checked when the
    /// records are built in [`SeedData::apply`].
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut hero_names = HashSet::new();
        for hero in &self.heroes {
            if !hero_names.insert(hero.name.as_str()) {
                return Err(SeedError::Invalid(format!(
                    "duplicate hero name: '{}'",
                    hero.name
                )));
            }
        }

        let mut power_names = HashSet::new();
        for power in &self.powers {
            if !power_names.insert(power.name.as_str()) {
                return Err(SeedError::Invalid(format!(
                    "duplicate power name: '{}'",
                    power.name
                )));
            }
        }

        for link in &self.hero_powers {
            if !hero_names.contains(link.hero.as_str()) {
                return Err(SeedError::Invalid(format!(
                    "hero_powers entry references unknown hero '{}'",
                    link.hero
                )));
            }
            if !power_names.contains(link.power.as_str()) {
                return Err(SeedError::Invalid(format!(
                    "hero_powers entry references unknown power '{}'",
                    link.power
                )));
            }
        }

        Ok(())
    }

    /// Build every record, then insert them in a single transaction.
    ///
    /// All records are validated before the first insert, and a database
    /// failure midway rolls back everything written so far.
    pub async fn apply(&self, handles: &StorageHandles) -> Result<SeedResult, SeedError> {
        if handles.hero_store.count().await? > 0 {
            tracing::debug!("Heroes already present, skipping seed");
            return Ok(SeedResult {
                skipped: true,
                ..Default::default()
            });
        }

        let heroes = self
            .heroes
            .iter()
            .map(|h| {
                Hero::new(&h.name, h.super_name.clone()).map_err(|source| SeedError::Validation {
                    name: h.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let powers = self
            .powers
            .iter()
            .map(|p| {
                Power::new(&p.name, &p.description).map_err(|source| SeedError::Validation {
                    name: p.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // IDs are not known yet; check strengths now with placeholders.
        for link in &self.hero_powers {
            HeroPower::new(&link.strength, 0, 0).map_err(|source| SeedError::Validation {
                name: format!("{}/{}", link.hero, link.power),
                source,
            })?;
        }

        let mut result = SeedResult::default();
        let mut tx = handles.pool.inner().begin().await.map_err(StorageError::from)?;

        let mut hero_ids = HashMap::new();
        for hero in &heroes {
            let stored = HeroStore::insert_on(&mut *tx, hero).await?;
            hero_ids.insert(hero.name().to_string(), stored.id());
            result.heroes += 1;
        }

        let mut power_ids = HashMap::new();
        for power in &powers {
            let stored = PowerStore::insert_on(&mut *tx, power).await?;
            power_ids.insert(power.name().to_string(), stored.id());
            result.powers += 1;
        }

        for link in &self.hero_powers {
            let (Some(Some(hero_id)), Some(Some(power_id))) =
                (hero_ids.get(&link.hero), power_ids.get(&link.power))
            else {
                return Err(SeedError::Invalid(format!(
                    "unresolved link {}/{}",
                    link.hero, link.power
                )));
            };
            let record = HeroPower::new(&link.strength, *hero_id, *power_id).map_err(|source| {
                SeedError::Validation {
                    name: format!("{}/{}", link.hero, link.power),
                    source,
                }
            })?;
            HeroPowerStore::insert_on(&mut *tx, &record).await?;
            result.hero_powers += 1;
        }

        tx.commit().await.map_err(StorageError::from)?;

        tracing::info!(
            "Seeded {} heroes, {} powers, {} hero powers",
            result.heroes,
            result.powers,
            result.hero_powers
        );
        Ok(result)
    }
}
