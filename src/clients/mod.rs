/// External API clients module
use crate::errors::{ApiError, ApiResult};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Current-conditions fields requested from the forecast provider
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,wind_direction_10m,wind_gusts_10m,cloud_cover,visibility,is_day,weather_code,pressure_msl";

/// Hourly fields requested for the wind forecast
const HOURLY_FIELDS: &str = "wind_speed_10m,wind_gusts_10m";

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("wolf-weather-service/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Open-Meteo forecast client
pub struct WeatherClient {
    http_client: HttpClient,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Fetch current conditions plus the one-day hourly wind forecast
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> ApiResult<Value> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("forecast_days", "1".to_string()),
                ("timezone", "auto".to_string()),
                ("models", "best_match".to_string()),
            ])
            .send()
            .await?;

        let json = resp.json().await?;
        Ok(json)
    }
}

/// Open-Meteo geocoding client
pub struct GeocodingClient {
    http_client: HttpClient,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Search place names; up to five English-labelled matches
    pub async fn search(&self, query: &str) -> ApiResult<Value> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("name", query),
                ("count", "5"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let json = resp.json().await?;
        Ok(json)
    }
}

/// IP-geolocation client over a primary and a fallback provider
pub struct IpLocationClient {
    http_client: HttpClient,
    primary_url: String,
    fallback_url: String,
}

impl IpLocationClient {
    pub fn new(primary_url: String, fallback_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            primary_url,
            fallback_url,
        })
    }

    /// Query the primary provider (ipapi.co response shape)
    pub async fn fetch_primary(&self) -> ApiResult<Value> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.primary_url)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "IP lookup failed with status {}",
                resp.status()
            )));
        }

        let json = resp.json().await?;
        Ok(json)
    }

    /// Query the fallback provider (ipwho.is response shape)
    pub async fn fetch_fallback(&self) -> ApiResult<Value> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.fallback_url)
            .send()
            .await?;

        let json = resp.json().await?;
        Ok(json)
    }
}

/// Gemini advisory client
pub struct AdvisoryClient {
    http_client: HttpClient,
    api_key: String,
}

impl AdvisoryClient {
    pub fn new(api_key: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            api_key,
        })
    }

    /// Whether an API key is configured at all
    pub fn has_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Ask the model for a short pilot advisory
    pub async fn generate(&self, prompt: &str) -> ApiResult<Value> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .http_client
            .get_client()
            .post(GEMINI_URL)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;

        let json = resp.json().await?;
        Ok(json)
    }
}
