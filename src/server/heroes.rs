//! `/heroes` handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ApiError;
use super::powers::PowerView;
use super::{AppState, MessageResponse};
use crate::model::Hero;

/// Hero as listed by `GET /heroes`.
#[derive(Debug, Serialize)]
pub struct HeroSummary {
    pub id: Option<i64>,
    pub name: String,
    pub super_name: Option<String>,
}

impl From<&Hero> for HeroSummary {
    fn from(hero: &Hero) -> Self {
        Self {
            id: hero.id(),
            name: hero.name().to_string(),
            super_name: hero.super_name().map(str::to_string),
        }
    }
}

/// Hero with its powers, as returned by `GET /heroes/{id}`.
#[derive(Debug, Serialize)]
pub struct HeroDetail {
    #[serde(flatten)]
    pub hero: HeroSummary,
    pub powers: Vec<PowerView>,
}

/// Body of `PATCH /heroes/{id}`.
///
/// The outer `Option` says whether the key was sent; the inner one is `None`
/// for an explicit `null`, which is rejected like an empty string.
#[derive(Debug, Default, Deserialize)]
pub struct HeroPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub super_name: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `GET /heroes`
pub async fn list_heroes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HeroSummary>>, ApiError> {
    let heroes = state.hero_store.list_all().await?;
    Ok(Json(heroes.iter().map(HeroSummary::from).collect()))
}

/// `GET /heroes/{id}`
pub async fn get_hero(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<HeroDetail>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("Hero not found"))?;
    let hero = state
        .hero_store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Hero not found"))?;
    let powers = state.hero_store.powers(id).await?;

    Ok(Json(HeroDetail {
        hero: HeroSummary::from(&hero),
        powers: powers.iter().map(PowerView::from).collect(),
    }))
}

/// `PATCH /heroes/{id}`
///
/// Both fields are checked before anything is written.
pub async fn update_hero(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<HeroPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("Hero not found"))?;
    let mut hero = state
        .hero_store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Hero not found"))?;
    let Json(patch) = body?;

    if let Some(name) = patch.name {
        hero.set_name(name.unwrap_or_default())
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    }
    if let Some(super_name) = patch.super_name {
        hero.set_super_name(super_name.unwrap_or_default())
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    }

    state
        .hero_store
        .update(&hero)
        .await?
        .ok_or_else(|| ApiError::not_found("Hero not found"))?;

    tracing::info!(hero_id = id, "Hero updated");
    Ok(Json(MessageResponse {
        message: "Hero updated successfully".to_string(),
    }))
}
