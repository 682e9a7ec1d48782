/// Application routes configuration
use crate::handlers::{
    get_briefing, get_estimate, get_ip_location, get_last_briefing, health, search_locations,
    AppState,
};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Briefing endpoints
        .route("/briefing", get(get_briefing))
        .route("/briefing/last", get(get_last_briefing))
        // Estimator diagnostic
        .route("/estimate", get(get_estimate))
        // Location resolution
        .route("/locations/search", get(search_locations))
        .route("/locations/ip", get(get_ip_location))
        .with_state(state)
}
