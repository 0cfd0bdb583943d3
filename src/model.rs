//! Domain model for heroes, powers and the strength-tagged link between them.
//!
//! Guarded fields can only be written through validating constructors and
//! setters, so a value held in memory always satisfies the same rules that
//! the database schema enforces with `CHECK` constraints:
//!
//! - [`Hero`] name is never empty
//! - [`Power`] description is at least [`MIN_DESCRIPTION_LEN`] characters
//! - [`HeroPower`] strength is one of [`Strength`]'s variants

use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Minimum length of a power description, in characters.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Maximum length of a strength tag, in characters.
pub const MAX_STRENGTH_LEN: usize = 50;

// =============================================================================
// Validation
// =============================================================================

/// A field failed its validation rule.
///
/// The display text is what clients see in error responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyHeroName,

    #[error("Super name cannot be empty")]
    EmptySuperName,

    #[error("Power name cannot be empty")]
    EmptyPowerName,

    #[error("Description must be present.")]
    MissingDescription,

    #[error("Description must be at least 20 characters long.")]
    DescriptionTooShort,

    #[error("Strength cannot be empty")]
    MissingStrength,

    #[error("Strength exceeded 50 characters length")]
    StrengthTooLong,

    #[error("Strength should be one of ['Strong', 'Weak', 'Average']")]
    UnknownStrength,
}

/// How strongly a hero wields a power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

/// Check a power description.
///
/// No trimming: whitespace counts toward the length.
pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    if value.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(())
}

/// Check a strength tag and parse it.
///
/// Matching is exact and case-sensitive.
pub fn validate_strength(value: &str) -> Result<Strength, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingStrength);
    }
    if value.chars().count() > MAX_STRENGTH_LEN {
        return Err(ValidationError::StrengthTooLong);
    }
    value
        .parse::<Strength>()
        .map_err(|_| ValidationError::UnknownStrength)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// =============================================================================
// Hero
// =============================================================================

/// A named character with an optional super name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    id: Option<i64>,
    name: String,
    super_name: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl Hero {
    /// Create a new, not yet persisted hero.
    pub fn new(
        name: impl Into<String>,
        super_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyHeroName);
        }
        let now = now_millis();
        Ok(Self {
            id: None,
            name,
            super_name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a hero from a stored row.
    pub(crate) fn restore(
        id: i64,
        name: String,
        super_name: Option<String>,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            super_name,
            created_at,
            updated_at,
        }
    }

    /// Database ID (None until inserted).
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn super_name(&self) -> Option<&str> {
        self.super_name.as_deref()
    }

    /// Creation timestamp (Unix millis).
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Last update timestamp (Unix millis).
    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Replace the name. An empty name is rejected and the old one kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyHeroName);
        }
        self.name = name;
        Ok(())
    }

    /// Replace the super name. An empty value is rejected and the old one kept.
    pub fn set_super_name(&mut self, super_name: impl Into<String>) -> Result<(), ValidationError> {
        let super_name = super_name.into();
        if super_name.is_empty() {
            return Err(ValidationError::EmptySuperName);
        }
        self.super_name = Some(super_name);
        Ok(())
    }
}

// =============================================================================
// Power
// =============================================================================

/// A named ability with a descriptive text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Power {
    id: Option<i64>,
    name: String,
    description: String,
    created_at: i64,
    updated_at: i64,
}

impl Power {
    /// Create a new, not yet persisted power.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyPowerName);
        }
        let description = description.into();
        validate_description(&description)?;

        let now = now_millis();
        Ok(Self {
            id: None,
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) fn restore(
        id: i64,
        name: String,
        description: String,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            description,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Replace the description, re-running [`validate_description`].
    ///
    /// On failure the current description is left as it was.
    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let description = description.into();
        validate_description(&description)?;
        self.description = description;
        Ok(())
    }
}

// =============================================================================
// HeroPower
// =============================================================================

/// Records that a hero has a power, and at what strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroPower {
    id: Option<i64>,
    strength: Strength,
    hero_id: i64,
    power_id: i64,
    created_at: i64,
    updated_at: i64,
}

impl HeroPower {
    /// Create a new link. `strength` goes through [`validate_strength`].
    pub fn new(strength: &str, hero_id: i64, power_id: i64) -> Result<Self, ValidationError> {
        let strength = validate_strength(strength)?;
        let now = now_millis();
        Ok(Self {
            id: None,
            strength,
            hero_id,
            power_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) fn restore(
        id: i64,
        strength: Strength,
        hero_id: i64,
        power_id: i64,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id: Some(id),
            strength,
            hero_id,
            power_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn hero_id(&self) -> i64 {
        self.hero_id
    }

    pub fn power_id(&self) -> i64 {
        self.power_id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }
}
