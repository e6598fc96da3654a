// Environment snapshot - unified view over the forecast, air and flood feeds
use super::feed::{AirQualityPayload, FeedOutcomes, FloodPayload, ForecastPayload, decode};
use super::outcome::Outcome;
use super::risk::{self, RiskAssessment};
use super::series::{value_at, window_max, window_mean, window_sum};
use super::time_index::locate_current_index;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FORECAST_SOURCE: &str = "Open-Meteo Weather Forecast API";
pub const AIR_QUALITY_SOURCE: &str = "Open-Meteo Air Quality API";
pub const FLOOD_SOURCE: &str = "Open-Meteo Global Flood API";

/// Daily river discharge samples reported in `next_days`.
const NEXT_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    pub temperature_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub precipitation_probability_pct: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub us_aqi: Option<f64>,
    pub european_aqi: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextHoursSummary {
    pub max_precip_probability: Option<f64>,
    pub total_precip_mm: Option<f64>,
    pub avg_pm2_5: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub times: Vec<String>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextDaysSummary {
    pub river_discharge: DailySeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub location: Location,
    pub current: CurrentReading,
    pub next_hours: NextHoursSummary,
    pub next_days: NextDaysSummary,
    pub risk: RiskAssessment,
    pub sources: Vec<String>,
}

impl EnvironmentSnapshot {
    /// Build a snapshot from settled feed outcomes.
    ///
    /// Never fails: a failed or malformed feed leaves its readings null and
    /// shows up as an annotated entry in `sources`.
    pub fn assemble(location: Location, feeds: &FeedOutcomes, now: DateTime<Utc>) -> Self {
        let forecast: ForecastPayload = decode(&feeds.weather);
        let air: AirQualityPayload = decode(&feeds.air);
        let flood: FloodPayload = decode(&feeds.flood);

        let weather = &forecast.hourly;
        let air = &air.hourly;

        // Locating on an empty series yields 0, so emptiness gates extraction.
        let weather_index = current_index(&weather.time, now);
        let air_index = current_index(&air.time, now);
        tracing::debug!(?weather_index, ?air_index, "located current hour");

        let current = CurrentReading {
            temperature_c: reading(&weather.temperature_2m, weather_index),
            precipitation_mm: reading(&weather.precipitation, weather_index),
            precipitation_probability_pct: reading(&weather.precipitation_probability, weather_index),
            pm2_5: reading(&air.pm2_5, air_index),
            pm10: reading(&air.pm10, air_index),
            us_aqi: reading(&air.us_aqi, air_index),
            european_aqi: reading(&air.european_aqi, air_index),
        };

        let next_hours = NextHoursSummary {
            max_precip_probability: weather_index
                .filter(|_| !weather.precipitation_probability.is_empty())
                .and_then(|i| window_max(&weather.precipitation_probability, i)),
            total_precip_mm: weather_index
                .filter(|_| !weather.precipitation.is_empty())
                .map(|i| window_sum(&weather.precipitation, i)),
            avg_pm2_5: air_index
                .filter(|_| !air.pm2_5.is_empty())
                .and_then(|i| window_mean(&air.pm2_5, i)),
        };

        let next_days = NextDaysSummary {
            river_discharge: next_days(&flood.daily.time, &flood.daily.river_discharge),
        };

        let risk = RiskAssessment {
            rain: risk::rain_risk(next_hours.max_precip_probability),
            air_quality: risk::air_quality(current.us_aqi),
            flood: risk::flood_risk(&flood.daily.river_discharge),
        };
        tracing::debug!(?risk, "classified risk");

        let sources = vec![
            annotate(FORECAST_SOURCE, &feeds.weather),
            annotate(AIR_QUALITY_SOURCE, &feeds.air),
            annotate(FLOOD_SOURCE, &feeds.flood),
        ];

        Self {
            location,
            current,
            next_hours,
            next_days,
            risk,
            sources,
        }
    }
}

fn reading(values: &[Option<f64>], index: Option<usize>) -> Option<f64> {
    index.and_then(|i| value_at(values, i as isize))
}

fn current_index(times: &[String], now: DateTime<Utc>) -> Option<usize> {
    if times.is_empty() {
        return None;
    }
    Some(locate_current_index(times, now))
}

// Both arrays are cut to the same length so the pairs stay aligned.
fn next_days(times: &[String], values: &[Option<f64>]) -> DailySeries {
    let len = times.len().min(values.len()).min(NEXT_DAYS);
    DailySeries {
        times: times[..len].to_vec(),
        values: values[..len].to_vec(),
    }
}

fn annotate(source: &str, outcome: &Outcome<Value>) -> String {
    if outcome.is_ok() {
        return source.to_string();
    }
    let error = outcome.error().unwrap_or("unknown error");
    format!("{source} (failed: {error})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::{AirQuality, FloodRisk, RainRisk};
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 14, 20, 0).unwrap()
    }

    fn hours(count: usize) -> Vec<String> {
        (0..count).map(|h| format!("2025-06-10T{:02}:00", 10 + h)).collect()
    }

    fn weather_ok() -> Outcome<Value> {
        Outcome::success(json!({
            "hourly": {
                "time": hours(10),
                "temperature_2m": [18.0, 19.0, 20.0, 21.0, 22.5, 23.0, 23.5, 22.0, 21.0, 20.0],
                "precipitation": [0.0, 0.0, 0.0, 0.0, 0.4, 1.1, null, 2.0, 0.5, 0.0, 9.0],
                "precipitation_probability": [5, 5, 10, 20, 35, 50, null, 75, 40, 10, 99]
            }
        }))
    }

    fn air_ok() -> Outcome<Value> {
        Outcome::success(json!({
            "hourly": {
                "time": hours(8),
                "pm2_5": [1.0, 1.0, 1.0, 1.0, 12.0, 13.0, null, 14.0],
                "pm10": [2.0, 2.0, 2.0, 2.0, 20.0],
                "us_aqi": [10, 10, 10, 10, 57, 60, 61, 62],
                "european_aqi": [5, 5, 5, 5, 22]
            }
        }))
    }

    fn flood_ok() -> Outcome<Value> {
        Outcome::success(json!({
            "daily": {
                "time": ["2025-06-10", "2025-06-11", "2025-06-12", "2025-06-13",
                         "2025-06-14", "2025-06-15", "2025-06-16", "2025-06-17"],
                "river_discharge": [100.0, 110.0, 125.0, 118.0, 90.0, 80.0, 70.0, 60.0]
            }
        }))
    }

    fn location() -> Location {
        Location { lat: -8.05, lon: -34.9 }
    }

    #[test]
    fn test_assemble_all_feeds() {
        let feeds = FeedOutcomes {
            weather: weather_ok(),
            air: air_ok(),
            flood: flood_ok(),
        };

        let snapshot = EnvironmentSnapshot::assemble(location(), &feeds, now());

        // 14:00 is index 4 in both hourly series.
        assert_eq!(snapshot.current.temperature_c, Some(22.5));
        assert_eq!(snapshot.current.precipitation_mm, Some(0.4));
        assert_eq!(snapshot.current.precipitation_probability_pct, Some(35.0));
        assert_eq!(snapshot.current.pm2_5, Some(12.0));
        assert_eq!(snapshot.current.pm10, Some(20.0));
        assert_eq!(snapshot.current.us_aqi, Some(57.0));
        assert_eq!(snapshot.current.european_aqi, Some(22.0));

        assert_eq!(snapshot.next_hours.max_precip_probability, Some(75.0));
        assert_eq!(snapshot.next_hours.total_precip_mm, Some(0.4 + 1.1 + 2.0 + 0.5 + 0.0));
        assert_eq!(snapshot.next_hours.avg_pm2_5, Some(13.0));

        assert_eq!(snapshot.next_days.river_discharge.times.len(), 7);
        assert_eq!(snapshot.next_days.river_discharge.values.len(), 7);

        assert_eq!(snapshot.risk.rain, RainRisk::High);
        assert_eq!(snapshot.risk.air_quality, AirQuality::Moderate);
        assert_eq!(snapshot.risk.flood, FloodRisk::Medium);

        assert_eq!(
            snapshot.sources,
            vec![FORECAST_SOURCE, AIR_QUALITY_SOURCE, FLOOD_SOURCE]
        );
    }

    #[test]
    fn test_flood_failure_is_isolated() {
        let feeds = FeedOutcomes {
            weather: weather_ok(),
            air: air_ok(),
            flood: Outcome::failure("HTTP status server error (502 Bad Gateway)"),
        };

        let snapshot = EnvironmentSnapshot::assemble(location(), &feeds, now());

        assert_eq!(snapshot.risk.flood, FloodRisk::Unknown);
        assert!(snapshot.next_days.river_discharge.values.is_empty());
        assert!(snapshot.next_days.river_discharge.times.is_empty());
        assert_eq!(snapshot.current.temperature_c, Some(22.5));

        let failed: Vec<_> = snapshot.sources.iter().filter(|s| s.contains("(failed:")).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0],
            "Open-Meteo Global Flood API (failed: HTTP status server error (502 Bad Gateway))"
        );
    }

    #[test]
    fn test_all_feeds_failed() {
        let feeds = FeedOutcomes {
            weather: Outcome::failure("timed out"),
            air: Outcome::failure("timed out"),
            flood: Outcome::failure("timed out"),
        };

        let snapshot = EnvironmentSnapshot::assemble(location(), &feeds, now());

        assert_eq!(snapshot.current, CurrentReading::default());
        assert_eq!(snapshot.next_hours, NextHoursSummary::default());
        assert_eq!(snapshot.next_days, NextDaysSummary::default());
        assert_eq!(snapshot.risk.rain, RainRisk::Low);
        assert_eq!(snapshot.risk.air_quality, AirQuality::Unknown);
        assert_eq!(snapshot.risk.flood, FloodRisk::Unknown);
        assert!(snapshot.sources.iter().all(|s| s.ends_with("(failed: timed out)")));
    }

    #[test]
    fn test_missing_metric_keys_degrade_to_null() {
        let feeds = FeedOutcomes {
            weather: Outcome::success(json!({"hourly": {"time": hours(3)}})),
            air: Outcome::success(json!({"hourly": {"time": [], "us_aqi": [400]}})),
            flood: Outcome::success(json!({"daily": {}})),
        };

        let snapshot = EnvironmentSnapshot::assemble(location(), &feeds, now());

        assert_eq!(snapshot.current, CurrentReading::default());
        assert_eq!(snapshot.next_hours.total_precip_mm, None);
        assert_eq!(snapshot.risk.air_quality, AirQuality::Unknown);
        assert_eq!(snapshot.risk.flood, FloodRisk::Unknown);
        assert!(snapshot.sources.iter().all(|s| !s.contains("failed")));
    }

    #[test]
    fn test_all_null_precipitation_window_sums_to_zero() {
        let feeds = FeedOutcomes {
            weather: Outcome::success(json!({
                "hourly": {
                    "time": hours(6),
                    "precipitation": [null, null, null, null, null, null],
                    "precipitation_probability": [null, null, null, null, null, null]
                }
            })),
            air: Outcome::failure("connection reset"),
            flood: Outcome::failure("connection reset"),
        };

        let snapshot = EnvironmentSnapshot::assemble(location(), &feeds, now());

        assert_eq!(snapshot.next_hours.total_precip_mm, Some(0.0));
        assert_eq!(snapshot.next_hours.max_precip_probability, None);
        assert_eq!(snapshot.risk.rain, RainRisk::Low);
    }

    #[test]
    fn test_next_days_truncated_in_lock_step() {
        let series = next_days(
            &["a".into(), "b".into(), "c".into()],
            &[Some(1.0), Some(2.0)],
        );
        assert_eq!(series.times, vec!["a", "b"]);
        assert_eq!(series.values, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let feeds = FeedOutcomes {
            weather: weather_ok(),
            air: air_ok(),
            flood: Outcome::failure("boom"),
        };

        let snapshot = EnvironmentSnapshot::assemble(location(), &feeds, now());
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["risk"]["flood"], "unknown");
        assert_eq!(json["risk"]["air_quality"], "moderate");
        assert_eq!(json["next_days"]["river_discharge"]["values"], json!([]));
        assert_eq!(json["location"], json!({"lat": -8.05, "lon": -34.9}));
    }
}
