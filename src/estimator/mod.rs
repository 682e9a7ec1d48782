/// Deterministic estimates for the two metrics the weather provider lacks:
/// geomagnetic Kp index and visible-satellite count. Both are pure functions
/// of (coordinates, UTC hour) so repeated queries within the same hour return
/// identical values instead of flickering on every refresh.
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Derived environmental figures for one location and one UTC hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Geomagnetic activity index, one decimal, roughly 1.0..=9.0
    pub kp_index: f64,
    /// Visible navigation satellites, 11..=19
    pub satellites: u32,
}

/// Integer seed from the UTC calendar fields. Constant for the entire UTC
/// hour and identical at every location; Kp is a global quantity, so only
/// time feeds its noise.
fn time_seed(at: DateTime<Utc>) -> i64 {
    i64::from(at.year()) * 10_000
        + i64::from(at.month()) * 100
        + i64::from(at.day())
        + i64::from(at.hour())
}

/// Satellite visibility shifts with the observer, so the orbital seed folds
/// the coordinates into the hour seed.
fn orbital_seed(lat: f64, lon: f64, time_seed: i64) -> f64 {
    lat + lon + time_seed as f64
}

/// Map a seed to [0,1) with no randomness source: scale the sine by a large
/// constant and keep the fractional part. Computed as `x - floor(x)` rather
/// than `f64::fract`, which is sign-preserving and would leak negative values
/// for negative sines.
fn seeded_noise(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}

/// Derive the Kp index and satellite count for a location at a given moment.
/// The clock is injected, never read ambiently, so two calls with the same
/// coordinates and UTC hour are bit-identical across processes.
pub fn estimate(lat: f64, lon: f64, at: DateTime<Utc>) -> Estimate {
    let seed = time_seed(at);

    // Kp sits at 1..4 most hours; a noise spike above 0.90 models elevated
    // activity and above 0.98 a storm, the additions stacking.
    let solar_noise = seeded_noise(seed as f64);
    let mut kp = 1.0 + solar_noise * 3.0;
    if solar_noise > 0.90 {
        kp += 2.0;
    }
    if solar_noise > 0.98 {
        kp += 3.0;
    }

    // Open-sky GNSS typically shows 12-18 satellites; the model stays in 11..=19.
    let orbital_noise = seeded_noise(orbital_seed(lat, lon, seed));
    let satellites = (11.0 + orbital_noise * 9.0).floor() as u32;

    Estimate {
        kp_index: (kp * 10.0).round() / 10.0,
        satellites,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let t = at(2024, 6, 15, 14, 30);
        let first = estimate(48.8566, 2.3522, t);
        let second = estimate(48.8566, 2.3522, t);
        assert_eq!(first, second);
    }

    #[test]
    fn test_minutes_within_the_hour_do_not_matter() {
        let start = estimate(48.8566, 2.3522, at(2024, 6, 15, 14, 0));
        let end = estimate(48.8566, 2.3522, at(2024, 6, 15, 14, 59));
        assert_eq!(start, end);
    }

    #[test]
    fn test_time_seed_is_hour_granular() {
        assert_eq!(
            time_seed(at(2024, 6, 15, 14, 5)),
            time_seed(at(2024, 6, 15, 14, 55))
        );
        assert_ne!(
            time_seed(at(2024, 6, 15, 14, 0)),
            time_seed(at(2024, 6, 15, 15, 0))
        );
    }

    #[test]
    fn test_time_seed_matches_reference_encoding() {
        // 2024*10000 + 6*100 + 15 + 14
        assert_eq!(time_seed(at(2024, 6, 15, 14, 0)), 20_240_629);
    }

    #[test]
    fn test_kp_bounds_and_precision_over_a_sweep() {
        for day in 1..=28 {
            for hour in 0..24 {
                let e = estimate(51.5074, -0.1278, at(2025, 3, day, hour, 0));
                assert!(
                    (1.0..=9.0).contains(&e.kp_index),
                    "kp {} out of range on day {} hour {}",
                    e.kp_index,
                    day,
                    hour
                );
                let tenths = e.kp_index * 10.0;
                assert!(
                    (tenths - tenths.round()).abs() < 1e-9,
                    "kp {} not one-decimal",
                    e.kp_index
                );
            }
        }
    }

    #[test]
    fn test_satellite_bounds_over_a_sweep() {
        let spots = [
            (0.0, 0.0),
            (51.5074, -0.1278),
            (-23.5505, -46.6333),
            (35.6762, 139.6503),
            (-33.8688, 151.2093),
        ];
        for (lat, lon) in spots {
            for hour in 0..24 {
                let e = estimate(lat, lon, at(2025, 3, 10, hour, 0));
                assert!(
                    (11..=19).contains(&e.satellites),
                    "satellites {} out of range at ({}, {}) hour {}",
                    e.satellites,
                    lat,
                    lon,
                    hour
                );
            }
        }
    }

    #[test]
    fn test_orbital_seed_incorporates_both_coordinates() {
        let seed = time_seed(at(2024, 6, 15, 14, 0));
        let base = orbital_seed(48.8566, 2.3522, seed);
        assert_ne!(base, orbital_seed(40.7128, 2.3522, seed));
        assert_ne!(base, orbital_seed(48.8566, -74.0060, seed));
    }

    #[test]
    fn test_equal_coordinate_sums_alias_to_the_same_estimate() {
        // The orbital seed is lat + lon + time seed, so swapped coordinates
        // with the same sum land on the same satellite count.
        let t = at(2024, 6, 15, 14, 0);
        assert_eq!(
            estimate(10.0, 20.0, t).satellites,
            estimate(20.0, 10.0, t).satellites
        );
    }

    #[test]
    fn test_negative_and_fractional_coordinates_need_no_special_casing() {
        let t = at(2023, 11, 2, 3, 17);
        for (lat, lon) in [(-0.001, 0.002), (-89.9, -179.9), (89.9, 179.9), (-12.04318, -77.02824)] {
            let e = estimate(lat, lon, t);
            assert!((1.0..=9.0).contains(&e.kp_index));
            assert!((11..=19).contains(&e.satellites));
        }
    }

    #[test]
    fn test_noise_stays_in_unit_interval_for_negative_seeds() {
        for i in -400..400 {
            let n = seeded_noise(f64::from(i) * 7.31);
            assert!((0.0..1.0).contains(&n), "noise {} escaped [0,1) for seed {}", n, i);
        }
    }

    #[test]
    fn test_kp_spike_ladder() {
        // Reconstruct the pre-rounding value from the noise to check the
        // additions are applied exactly when the thresholds are exceeded.
        for hour in 0..24 {
            let t = at(2025, 7, 4, hour, 0);
            let noise = seeded_noise(time_seed(t) as f64);
            let mut expected = 1.0 + noise * 3.0;
            if noise > 0.90 {
                expected += 2.0;
            }
            if noise > 0.98 {
                expected += 3.0;
            }
            let expected = (expected * 10.0).round() / 10.0;
            assert_eq!(estimate(0.0, 0.0, t).kp_index, expected);
        }
    }
}
