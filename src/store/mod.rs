/// In-memory store for the latest assembled briefing. There is no persisted
/// state: a briefing lives only until the next one fully replaces it.
use crate::domain::Briefing;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct BriefingStore {
    latest: Arc<RwLock<Option<Briefing>>>,
}

impl BriefingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly assembled briefing
    pub async fn replace(&self, briefing: Briefing) {
        *self.latest.write().await = Some(briefing);
    }

    /// Most recent briefing, if any fetch cycle has completed yet
    pub async fn latest(&self) -> Option<Briefing> {
        self.latest.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FlightStatus, HourlyForecast, Location, WeatherSnapshot};
    use chrono::Utc;

    fn briefing(name: &str) -> Briefing {
        Briefing {
            location: Location {
                latitude: 48.8566,
                longitude: 2.3522,
                name: name.to_string(),
            },
            fetched_at: Utc::now(),
            current: WeatherSnapshot {
                temperature: 18.0,
                wind_speed: 10.0,
                wind_direction: 200.0,
                wind_gusts: 12.0,
                visibility: 9000.0,
                cloud_cover: 20.0,
                pressure: 1015.0,
                is_day: true,
                weather_code: 1,
                kp_index: 1.4,
                satellites: 15,
            },
            forecast: HourlyForecast {
                time: Vec::new(),
                wind_speed: Vec::new(),
                wind_gusts: Vec::new(),
            },
            status: FlightStatus::Good,
            headline: FlightStatus::Good.headline(),
            advisory: String::new(),
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let store = BriefingStore::new();
        assert!(store.latest().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_fully_swaps_the_briefing() {
        let store = BriefingStore::new();
        store.replace(briefing("Paris, FR")).await;
        store.replace(briefing("Lyon, FR")).await;

        let latest = store.latest().await.expect("briefing stored");
        assert_eq!(latest.location.name, "Lyon, FR");
    }
}
