//! `/powers` handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::ApiError;
use crate::model::Power;

/// Power as returned by every power endpoint and nested in hero details.
#[derive(Debug, Serialize)]
pub struct PowerView {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl From<&Power> for PowerView {
    fn from(power: &Power) -> Self {
        Self {
            id: power.id(),
            name: power.name().to_string(),
            description: power.description().to_string(),
        }
    }
}

/// Body of `PATCH /powers/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct PowerPatch {
    pub description: Option<String>,
}

/// `GET /powers`
pub async fn list_powers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PowerView>>, ApiError> {
    let powers = state.power_store.list_all().await?;
    Ok(Json(powers.iter().map(PowerView::from).collect()))
}

/// `GET /powers/{id}`
pub async fn get_power(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PowerView>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("Power not found"))?;
    let power = state
        .power_store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Power not found"))?;

    Ok(Json(PowerView::from(&power)))
}

/// `PATCH /powers/{id}`
///
/// A description that fails validation is never written.
pub async fn update_power(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PowerPatch>, JsonRejection>,
) -> Result<Json<PowerView>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::not_found("Power not found"))?;
    let mut power = state
        .power_store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Power not found"))?;
    let Json(patch) = body.map_err(|e| ApiError::invalid(e.body_text()))?;

    let description = patch
        .description
        .ok_or_else(|| ApiError::invalid("description field is required"))?;
    power.set_description(description)?;

    let updated = state
        .power_store
        .update(&power)
        .await?
        .ok_or_else(|| ApiError::not_found("Power not found"))?;

    tracing::info!(power_id = id, "Power description updated");
    Ok(Json(PowerView::from(&updated)))
}
