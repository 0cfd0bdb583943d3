//! `/hero_powers` handler.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use super::AppState;
use super::error::ApiError;
use super::heroes::HeroSummary;
use crate::model::HeroPower;

/// Body of `POST /hero_powers`. Every field is required.
#[derive(Debug, Default, Deserialize)]
pub struct CreateHeroPowerBody {
    pub strength: Option<String>,
    pub power_id: Option<i64>,
    pub hero_id: Option<i64>,
}

/// `POST /hero_powers`
///
/// Links a hero to a power and answers with the hero.
pub async fn create_hero_power(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateHeroPowerBody>, JsonRejection>,
) -> Result<Json<HeroSummary>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::invalid(e.body_text()))?;
    let (Some(strength), Some(power_id), Some(hero_id)) =
        (body.strength, body.power_id, body.hero_id)
    else {
        return Err(ApiError::invalid(
            "strength, power_id, and hero_id fields are required",
        ));
    };

    let power = state.power_store.get(power_id).await?;
    let hero = state.hero_store.get(hero_id).await?;
    let (Some(_power), Some(hero)) = (power, hero) else {
        return Err(ApiError::Unresolved(vec![
            "Power or Hero not found".to_string(),
        ]));
    };

    let link = HeroPower::new(&strength, hero_id, power_id)?;
    let stored = state.hero_power_store.insert(&link).await?;

    tracing::info!(
        hero_id,
        power_id,
        hero_power_id = ?stored.id(),
        strength = %stored.strength(),
        "Hero power created"
    );
    Ok(Json(HeroSummary::from(&hero)))
}
