//! Web server module.
//!
//! Provides the JSON API over heroes, powers and hero powers, plus
//! liveness and readiness probes.

mod error;
mod hero_powers;
mod heroes;
mod powers;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::storage::{HeroPowerStore, HeroStore, PowerStore, SqlitePool, StorageHandles};

pub use error::ApiError;
pub use hero_powers::CreateHeroPowerBody;
pub use heroes::{HeroDetail, HeroPatch, HeroSummary};
pub use powers::{PowerPatch, PowerView};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub hero_store: HeroStore,
    pub power_store: PowerStore,
    pub hero_power_store: HeroPowerStore,
    pub pool: SqlitePool,
}

impl AppState {
    /// Build state from the storage handles.
    pub fn from_handles(handles: &StorageHandles) -> Self {
        Self {
            hero_store: handles.hero_store.clone(),
            power_store: handles.power_store.clone(),
            hero_power_store: handles.hero_power_store.clone(),
            pool: handles.pool.clone(),
        }
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db: Option<String>,
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let app_state = Arc::new(state);

    Router::new()
        .route("/", get(home_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .route("/heroes", get(heroes::list_heroes))
        .route(
            "/heroes/{id}",
            get(heroes::get_hero).patch(heroes::update_hero),
        )
        .route("/powers", get(powers::list_powers))
        .route(
            "/powers/{id}",
            get(powers::get_power).patch(powers::update_power),
        )
        .route("/hero_powers", post(hero_powers::create_hero_power))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Landing page.
async fn home_handler() -> &'static str {
    "Welcome to the superhero API"
}

/// Liveness probe.
async fn healthz_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        db: None,
    })
}

/// Readiness probe that checks database availability.
async fn readyz_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.pool.ping().await {
        Ok(()) => Json(HealthResponse {
            status: "ok".to_string(),
            db: Some("ready".to_string()),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "not_ready".to_string(),
                    db: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    }
}
