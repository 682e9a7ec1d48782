/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved place, from search, IP lookup, or the caller's own coordinates.
/// Immutable once selected; a new location starts a fresh fetch cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// Current conditions for one location: the provider's real readings plus the
/// two estimated fields the provider does not supply (kp_index, satellites).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// °C
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// degrees
    pub wind_direction: f64,
    /// km/h
    pub wind_gusts: f64,
    /// meters
    pub visibility: f64,
    /// percentage
    pub cloud_cover: f64,
    /// hPa, mean sea level
    pub pressure: f64,
    pub is_day: bool,
    /// WMO weather interpretation code
    pub weather_code: u8,
    /// Estimated geomagnetic index, one decimal, roughly 1.0..=9.0
    pub kp_index: f64,
    /// Estimated visible navigation satellites, 11..=19
    pub satellites: u32,
}

/// One day of hourly wind data, parallel arrays as the provider ships them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: Vec<String>,
    pub wind_speed: Vec<f64>,
    pub wind_gusts: Vec<f64>,
}

/// Three-tier flight safety verdict. The derived ordering follows severity:
/// Good < Caution < Bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Good,
    Caution,
    Bad,
}

impl FlightStatus {
    /// Numeric severity for comparison and sorting (Good=0, Caution=1, Bad=2)
    pub fn severity(self) -> u8 {
        self as u8
    }

    /// Banner line shown on the dashboard
    pub fn headline(self) -> &'static str {
        match self {
            FlightStatus::Good => "GOOD TO FLY",
            FlightStatus::Caution => "CAUTION ADVISED",
            FlightStatus::Bad => "NOT GOOD TO FLY",
        }
    }
}

/// Full dashboard payload assembled for one location in one fetch cycle.
/// A new briefing completely replaces the previous one.
#[derive(Debug, Clone, Serialize)]
pub struct Briefing {
    pub location: Location,
    pub fetched_at: DateTime<Utc>,
    pub current: WeatherSnapshot,
    pub forecast: HourlyForecast,
    pub status: FlightStatus,
    pub headline: &'static str,
    pub advisory: String,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering_follows_severity() {
        assert!(FlightStatus::Good < FlightStatus::Caution);
        assert!(FlightStatus::Caution < FlightStatus::Bad);
        assert_eq!(FlightStatus::Good.severity(), 0);
        assert_eq!(FlightStatus::Caution.severity(), 1);
        assert_eq!(FlightStatus::Bad.severity(), 2);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&FlightStatus::Good).unwrap(),
            "\"GOOD\""
        );
        assert_eq!(
            serde_json::to_string(&FlightStatus::Caution).unwrap(),
            "\"CAUTION\""
        );
        assert_eq!(
            serde_json::to_string(&FlightStatus::Bad).unwrap(),
            "\"BAD\""
        );
    }

    #[test]
    fn test_status_headlines() {
        assert_eq!(FlightStatus::Good.headline(), "GOOD TO FLY");
        assert_eq!(FlightStatus::Caution.headline(), "CAUTION ADVISED");
        assert_eq!(FlightStatus::Bad.headline(), "NOT GOOD TO FLY");
    }
}
