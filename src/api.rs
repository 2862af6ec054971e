use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use tracing::error;

use crate::ingest::{IngestService, IngestSummary};
use crate::models::SurfSpot;
use crate::store::SurfStore;
use crate::surf::ranking::{self, RankedSpot};

/// Shared handler state, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub store: SurfStore,
    pub ingest: Arc<IngestService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/spots", get(get_spots))
        .route("/spots/closest/{lat}/{long}", get(get_closest_spots))
        .route("/ingest", post(run_ingest))
        .with_state(state)
}

async fn get_spots(State(state): State<AppState>) -> Result<Json<Vec<SurfSpot>>, StatusCode> {
    let spots = state.store.list_spots().await.map_err(|e| {
        error!("Failed to list the spot catalog: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(spots))
}

async fn get_closest_spots(
    State(state): State<AppState>,
    Path((lat, long)): Path<(String, String)>,
) -> Result<Json<Vec<RankedSpot>>, StatusCode> {
    let user_lat: f64 = lat.trim().parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    let user_lng: f64 = long.trim().parse().map_err(|_| StatusCode::BAD_REQUEST)?;

    // One clock sample serves both the store query and the ranking.
    let now = Utc::now();
    let reports = state
        .store
        .list_currently_surfable(now)
        .await
        .map_err(|e| {
            error!("Failed to query surfable records: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    let spots = state.store.list_spots().await.map_err(|e| {
        error!("Failed to list the spot catalog: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let ranked = ranking::rank(user_lat, user_lng, now, &reports, &spots).map_err(|e| {
        error!("Ranking failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(ranked))
}

async fn run_ingest(State(state): State<AppState>) -> Result<Json<IngestSummary>, StatusCode> {
    let summary = state.ingest.run_once().await.map_err(|e| {
        error!("Ingestion pass failed: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(summary))
}
