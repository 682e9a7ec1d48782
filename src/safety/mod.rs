/// Flight-safety policy: the go/no-go threshold table and the status
/// classifier that applies it to a weather snapshot.
use crate::domain::{FlightStatus, WeatherSnapshot};
use serde::{Deserialize, Serialize};

/// Every flight-safety threshold in one table. All bounds are strict: a
/// reading exactly at a threshold does not trip its rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SafetyThresholds {
    /// km/h of sustained wind above which flight is unsafe
    pub wind_speed_bad: f64,
    /// km/h of gusts above which flight is unsafe
    pub wind_gusts_bad: f64,
    /// satellite count below which positioning is unreliable
    pub satellites_bad: u32,
    /// Kp above which geomagnetic activity is unsafe
    pub kp_index_bad: f64,
    /// meters of visibility below which flight is unsafe
    pub visibility_bad: f64,
    /// km/h of sustained wind above which caution is advised
    pub wind_speed_caution: f64,
    /// Kp above which caution is advised
    pub kp_index_caution: f64,
    /// satellite count below which caution is advised
    pub satellites_caution: u32,
}

impl SafetyThresholds {
    pub const DEFAULT: Self = Self {
        wind_speed_bad: 35.0,
        wind_gusts_bad: 50.0,
        satellites_bad: 6,
        kp_index_bad: 6.0,
        visibility_bad: 1000.0,
        wind_speed_caution: 25.0,
        kp_index_caution: 4.0,
        satellites_caution: 10,
    };
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classify a snapshot against the default threshold table.
pub fn classify(snapshot: &WeatherSnapshot) -> FlightStatus {
    classify_with(snapshot, &SafetyThresholds::DEFAULT)
}

/// Ordered rule chain, most severe tier first; the first matching tier wins,
/// so a snapshot that is both BAD and CAUTION reports BAD.
pub fn classify_with(snapshot: &WeatherSnapshot, t: &SafetyThresholds) -> FlightStatus {
    if snapshot.wind_speed > t.wind_speed_bad
        || snapshot.wind_gusts > t.wind_gusts_bad
        || snapshot.satellites < t.satellites_bad
        || snapshot.kp_index > t.kp_index_bad
        || snapshot.visibility < t.visibility_bad
    {
        return FlightStatus::Bad;
    }

    if snapshot.wind_speed > t.wind_speed_caution
        || snapshot.kp_index > t.kp_index_caution
        || snapshot.satellites < t.satellites_caution
    {
        return FlightStatus::Caution;
    }

    FlightStatus::Good
}
