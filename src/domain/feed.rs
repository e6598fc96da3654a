// Upstream feed payloads - partial schema over the Open-Meteo JSON bodies
//
// Every field is optional. A missing key, a value of the wrong type, or a
// non-numeric array entry decodes to `None` instead of failing the payload.
use super::outcome::Outcome;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The three settled upstream calls behind one snapshot, kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedOutcomes {
    pub weather: Outcome<Value>,
    pub air: Outcome<Value>,
    pub flood: Outcome<Value>,
}

/// Body of the forecast endpoint (`hourly` block only).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub hourly: ForecastHourly,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastHourly {
    #[serde(default, deserialize_with = "timestamps")]
    pub time: Vec<String>,
    #[serde(default, deserialize_with = "numbers")]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "numbers")]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "numbers")]
    pub precipitation_probability: Vec<Option<f64>>,
}

/// Body of the air-quality endpoint (`hourly` block only).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualityPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub hourly: AirQualityHourly,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualityHourly {
    #[serde(default, deserialize_with = "timestamps")]
    pub time: Vec<String>,
    #[serde(default, deserialize_with = "numbers")]
    pub pm2_5: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "numbers")]
    pub pm10: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "numbers")]
    pub us_aqi: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "numbers")]
    pub european_aqi: Vec<Option<f64>>,
}

/// Body of the flood endpoint (`daily` block only).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FloodPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub daily: FloodDaily,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FloodDaily {
    #[serde(default, deserialize_with = "timestamps")]
    pub time: Vec<String>,
    #[serde(default, deserialize_with = "numbers")]
    pub river_discharge: Vec<Option<f64>>,
}

/// Body of the geocoding search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResult {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub admin1: Option<String>,
}

/// Decode the payload of an outcome, falling back to an empty payload when
/// the call failed or the body isn't an object.
pub fn decode<T: DeserializeOwned + Default>(outcome: &Outcome<Value>) -> T {
    outcome
        .data()
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default()
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn numbers<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(Value::as_f64).collect(),
        _ => Vec::new(),
    })
}

// Non-string entries become empty strings, which never parse as timestamps.
fn timestamps<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().unwrap_or_default().to_string())
            .collect(),
        _ => Vec::new(),
    })
}
