/// Main application entry point
mod clients;
mod config;
mod domain;
mod errors;
mod estimator;
mod handlers;
mod routes;
mod safety;
mod services;
mod store;
mod utils;

use crate::clients::{AdvisoryClient, GeocodingClient, IpLocationClient, WeatherClient};
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::{BriefingService, LocationService};
use crate::store::BriefingStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize clients
    let weather_client = WeatherClient::new(config.forecast_url.clone())?;
    let geocoding_client = GeocodingClient::new(config.geocoding_url.clone())?;
    let ip_client = IpLocationClient::new(
        config.ip_lookup_url.clone(),
        config.ip_lookup_fallback_url.clone(),
    )?;
    let advisory_client = AdvisoryClient::new(config.gemini_api_key.clone())?;

    // Initialize services around the shared briefing store
    let store = BriefingStore::new();
    let briefing_service = Arc::new(BriefingService::new(
        weather_client,
        advisory_client,
        store,
    ));
    let location_service = Arc::new(LocationService::new(geocoding_client, ip_client));

    // Initialize application state
    let state = AppState {
        briefing_service: briefing_service.clone(),
        location_service,
    };

    // Start background refresh task
    start_background_refresh(config.briefing_every_seconds, briefing_service);

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("wolf_weather service listening on 0.0.0.0:3000");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Periodically re-brief the most recently requested location so the
/// /briefing/last endpoint stays warm. Idle until the first briefing exists.
fn start_background_refresh(interval: u64, service: Arc<BriefingService>) {
    tokio::spawn(async move {
        info!("Starting briefing refresh task (interval: {}s)", interval);
        loop {
            tokio::time::sleep(Duration::from_secs(interval)).await;
            let Some(previous) = service.latest().await else {
                continue;
            };
            if let Err(e) = service.brief(previous.location).await {
                error!("Briefing refresh error: {:?}", e);
            }
        }
    });
}
