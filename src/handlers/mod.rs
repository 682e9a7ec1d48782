/// HTTP request handlers
use crate::domain::{Health, Location};
use crate::errors::ApiError;
use crate::estimator::estimate;
use crate::services::{BriefingService, LocationService};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub briefing_service: Arc<BriefingService>,
    pub location_service: Arc<LocationService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Run a full briefing cycle for the queried coordinates
pub async fn get_briefing(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let (lat, lon) = parse_coords(&params)?;
    let name = params
        .get("name")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| coordinate_label(lat, lon));

    let briefing = state
        .briefing_service
        .brief(Location {
            latitude: lat,
            longitude: lon,
            name,
        })
        .await?;

    Ok(Json(serde_json::json!(SuccessResponse::new(briefing))))
}

/// Most recent briefing without triggering a fetch
pub async fn get_last_briefing(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.briefing_service.latest().await {
        Some(briefing) => Ok(Json(serde_json::json!(SuccessResponse::new(briefing)))),
        None => Ok(Json(serde_json::json!(SuccessResponse::new(
            serde_json::json!({
                "message": "no data"
            })
        )))),
    }
}

/// Diagnostic view of the estimator alone: the derived Kp and satellite
/// count for the current UTC hour at the queried coordinates
pub async fn get_estimate(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let (lat, lon) = parse_coords(&params)?;
    let now = Utc::now();
    let derived = estimate(lat, lon, now);

    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({
            "at": now,
            "kp_index": derived.kp_index,
            "satellites": derived.satellites
        })
    ))))
}

/// Place-name search via the geocoding provider
pub async fn search_locations(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let query = params
        .get("q")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("missing query parameter q".to_string()))?;

    let results = state.location_service.search(query).await?;

    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({
            "results": results
        })
    ))))
}

/// Server-side IP geolocation through the provider chain
pub async fn get_ip_location(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let location = state.location_service.locate_by_ip().await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(location))))
}

/// Validated coordinates from the query string. The estimator assumes
/// well-formed inputs, so malformed ones are rejected here.
fn parse_coords(params: &HashMap<String, String>) -> Result<(f64, f64), ApiError> {
    let lat = parse_coord(params, "lat", 90.0)?;
    let lon = parse_coord(params, "lon", 180.0)?;
    Ok((lat, lon))
}

fn parse_coord(params: &HashMap<String, String>, key: &str, bound: f64) -> Result<f64, ApiError> {
    let raw = params
        .get(key)
        .ok_or_else(|| ApiError::InvalidInput(format!("missing query parameter {}", key)))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("{} is not a number: {}", key, raw)))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(ApiError::InvalidInput(format!(
            "{} out of range [-{}, {}]: {}",
            key, bound, bound, raw
        )));
    }
    Ok(value)
}

fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("{:.4}, {:.4}", lat, lon)
}
