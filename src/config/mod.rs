/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub forecast_url: String,
    pub geocoding_url: String,
    pub ip_lookup_url: String,
    pub ip_lookup_fallback_url: String,
    pub gemini_api_key: String,
    pub briefing_every_seconds: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let forecast_url = env::var("FORECAST_URL")
            .unwrap_or_else(|_| "https://api.open-meteo.com/v1/forecast".to_string());

        let geocoding_url = env::var("GEOCODING_URL")
            .unwrap_or_else(|_| "https://geocoding-api.open-meteo.com/v1/search".to_string());

        let ip_lookup_url =
            env::var("IP_LOOKUP_URL").unwrap_or_else(|_| "https://ipapi.co/json/".to_string());

        let ip_lookup_fallback_url = env::var("IP_LOOKUP_FALLBACK_URL")
            .unwrap_or_else(|_| "https://ipwho.is/".to_string());

        // Empty key disables advisory calls; the briefing then carries a
        // fixed fallback line instead.
        let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();

        let briefing_every_seconds = env_u64("BRIEFING_EVERY_SECONDS", 600);

        Ok(Self {
            forecast_url,
            geocoding_url,
            ip_lookup_url,
            ip_lookup_fallback_url,
            gemini_api_key,
            briefing_every_seconds,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
