/// Business logic services layer
use crate::clients::{AdvisoryClient, GeocodingClient, IpLocationClient, WeatherClient};
use crate::domain::{Briefing, HourlyForecast, Location, WeatherSnapshot};
use crate::errors::{ApiError, ApiResult};
use crate::estimator::{estimate, Estimate};
use crate::safety::{classify, SafetyThresholds};
use crate::store::BriefingStore;
use crate::utils::{flag, num, num_list, s_pick, str_list};
use chrono::Utc;
use serde_json::Value;
use tracing::warn;

/// Advisory line when no Gemini key is configured
const ADVICE_KEY_MISSING: &str = "Gemini API Key missing. Fly safely based on the data.";
/// Advisory line when the Gemini call itself fails
const ADVICE_OFFLINE: &str = "System offline. Rely on manual instruments.";
/// Advisory line when the response carries no usable text
const ADVICE_UNAVAILABLE: &str = "Data analysis unavailable. Check metrics manually.";

/// Flight-briefing assembly service: one fetch cycle per call, the finished
/// briefing fully replacing the stored one.
pub struct BriefingService {
    weather_client: WeatherClient,
    advisory_client: AdvisoryClient,
    store: BriefingStore,
}

impl BriefingService {
    pub fn new(
        weather_client: WeatherClient,
        advisory_client: AdvisoryClient,
        store: BriefingStore,
    ) -> Self {
        Self {
            weather_client,
            advisory_client,
            store,
        }
    }

    /// Run the full cycle for a location: fetch, estimate, classify, advise,
    /// store, return.
    pub async fn brief(&self, location: Location) -> ApiResult<Briefing> {
        let payload = self
            .weather_client
            .fetch_forecast(location.latitude, location.longitude)
            .await?;

        let current = payload.get("current").ok_or_else(|| {
            ApiError::Internal("weather provider response has no current conditions".to_string())
        })?;

        let fetched_at = Utc::now();
        let derived = estimate(location.latitude, location.longitude, fetched_at);
        let snapshot = snapshot_from(current, derived);
        let forecast = forecast_from(&payload["hourly"]);
        let status = classify(&snapshot);

        let advisory = self.fetch_advisory(&snapshot, &location.name).await;

        let briefing = Briefing {
            location,
            fetched_at,
            current: snapshot,
            forecast,
            status,
            headline: status.headline(),
            advisory,
        };

        self.store.replace(briefing.clone()).await;
        Ok(briefing)
    }

    /// Most recent briefing, if any cycle has completed
    pub async fn latest(&self) -> Option<Briefing> {
        self.store.latest().await
    }

    /// Advisory text with full degradation: a missing key, a failed call, or
    /// an empty response each yield a fixed line. The briefing never fails
    /// because the advisory did.
    async fn fetch_advisory(&self, snapshot: &WeatherSnapshot, location_name: &str) -> String {
        if !self.advisory_client.has_key() {
            return ADVICE_KEY_MISSING.to_string();
        }

        let prompt = advisory_prompt(snapshot, location_name);
        match self.advisory_client.generate(&prompt).await {
            Ok(payload) => {
                advisory_text(&payload).unwrap_or_else(|| ADVICE_UNAVAILABLE.to_string())
            }
            Err(e) => {
                warn!("Advisory generation failed: {:?}", e);
                ADVICE_OFFLINE.to_string()
            }
        }
    }
}

/// Typed snapshot from the provider's `current` object plus the derived
/// estimates. Missing numeric fields read as 0 rather than failing the cycle.
fn snapshot_from(current: &Value, derived: Estimate) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: num(&current["temperature_2m"]).unwrap_or(0.0),
        wind_speed: num(&current["wind_speed_10m"]).unwrap_or(0.0),
        wind_direction: num(&current["wind_direction_10m"]).unwrap_or(0.0),
        wind_gusts: num(&current["wind_gusts_10m"]).unwrap_or(0.0),
        visibility: num(&current["visibility"]).unwrap_or(0.0),
        cloud_cover: num(&current["cloud_cover"]).unwrap_or(0.0),
        pressure: num(&current["pressure_msl"]).unwrap_or(0.0),
        is_day: flag(&current["is_day"]),
        weather_code: num(&current["weather_code"]).unwrap_or(0.0) as u8,
        kp_index: derived.kp_index,
        satellites: derived.satellites,
    }
}

/// Hourly wind arrays as the provider ships them
fn forecast_from(hourly: &Value) -> HourlyForecast {
    HourlyForecast {
        time: str_list(&hourly["time"]),
        wind_speed: num_list(&hourly["wind_speed_10m"]),
        wind_gusts: num_list(&hourly["wind_gusts_10m"]),
    }
}

/// Pilot-briefing prompt: the readings plus the thresholds the model should
/// reason against, in the dashboard's wolf-pack voice.
fn advisory_prompt(snapshot: &WeatherSnapshot, location_name: &str) -> String {
    let t = SafetyThresholds::DEFAULT;
    format!(
        "You are an expert UAV (Drone) pilot and a \"Wolf Pack Leader\".\n\
         Analyze the following weather data for {} and give a short, stylish advice \
         (max 2 sentences) on whether it is good to fly.\n\
         Use a \"Wolf\" metaphor if appropriate (e.g., \"The wind howls,\" \"Clear hunting grounds\").\n\n\
         Data:\n\
         Wind Speed: {} km/h\n\
         Gusts: {} km/h\n\
         Visibility: {} meters\n\
         Kp Index: {}\n\
         Satellites: {}\n\
         Cloud Cover: {}%\n\n\
         Safety thresholds: Wind > {}km/h is dangerous. Kp > {} is dangerous. Satellites < {} is risky.",
        location_name,
        snapshot.wind_speed,
        snapshot.wind_gusts,
        snapshot.visibility,
        snapshot.kp_index,
        snapshot.satellites,
        snapshot.cloud_cover,
        t.wind_speed_bad,
        t.kp_index_bad,
        t.satellites_caution,
    )
}

/// First candidate text from a generateContent response, if any
fn advisory_text(payload: &Value) -> Option<String> {
    let text = payload["candidates"][0]["content"]["parts"][0]["text"].as_str()?;
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Location resolution service: place-name search plus the server-side IP
/// geolocation chain (primary, then fallback, then not-found).
pub struct LocationService {
    geocoding_client: GeocodingClient,
    ip_client: IpLocationClient,
}

impl LocationService {
    pub fn new(geocoding_client: GeocodingClient, ip_client: IpLocationClient) -> Self {
        Self {
            geocoding_client,
            ip_client,
        }
    }

    /// Place-name search; a response without results is an empty list
    pub async fn search(&self, query: &str) -> ApiResult<Vec<Location>> {
        let payload = self.geocoding_client.search(query).await?;
        Ok(search_results(&payload))
    }

    /// Resolve the caller's location by IP: primary provider, then fallback
    pub async fn locate_by_ip(&self) -> ApiResult<Location> {
        match self.ip_client.fetch_primary().await {
            Ok(payload) => {
                if let Some(location) = primary_location(&payload) {
                    return Ok(location);
                }
                warn!("Primary IP provider returned no coordinates");
            }
            Err(e) => warn!("Primary IP provider failed: {:?}", e),
        }

        let payload = self.ip_client.fetch_fallback().await?;
        fallback_location(&payload)
            .ok_or_else(|| ApiError::NotFound("IP geolocation failed".to_string()))
    }
}

/// Map geocoding matches to locations. The display name is "{name}, {CC}";
/// a match without a country code keeps the bare name.
fn search_results(payload: &Value) -> Vec<Location> {
    let Some(results) = payload["results"].as_array() else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|item| {
            let latitude = num(&item["latitude"])?;
            let longitude = num(&item["longitude"])?;
            let name = s_pick(item, &["name"])?;
            let display = match item["country_code"].as_str() {
                Some(cc) if !cc.is_empty() => format!("{}, {}", name, cc.to_uppercase()),
                _ => name,
            };
            Some(Location {
                latitude,
                longitude,
                name: display,
            })
        })
        .collect()
}

/// Location from an ipapi.co-shaped payload
fn primary_location(payload: &Value) -> Option<Location> {
    let latitude = num(&payload["latitude"])?;
    let longitude = num(&payload["longitude"])?;
    let name = place_label(
        s_pick(payload, &["city"]),
        s_pick(payload, &["country_name"]),
    );
    Some(Location {
        latitude,
        longitude,
        name,
    })
}

/// Location from an ipwho.is-shaped payload; honored only when the provider
/// reports success
fn fallback_location(payload: &Value) -> Option<Location> {
    if !flag(&payload["success"]) {
        return None;
    }
    let latitude = num(&payload["latitude"])?;
    let longitude = num(&payload["longitude"])?;
    let name = place_label(s_pick(payload, &["city"]), s_pick(payload, &["country"]));
    Some(Location {
        latitude,
        longitude,
        name,
    })
}

fn place_label(city: Option<String>, country: Option<String>) -> String {
    match (city, country) {
        (Some(city), Some(country)) => format!("{}, {}", city, country),
        (Some(city), None) => city,
        (None, Some(country)) => country,
        (None, None) => "Unknown location".to_string(),
    }
}
