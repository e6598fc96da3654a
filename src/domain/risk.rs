// Risk classification - qualitative levels derived from extracted readings
use serde::{Deserialize, Serialize};

/// Keeps the flood ratio finite when the baseline discharge is zero. Small
/// baselines blow up the relative increase on purpose.
const FLOOD_EPSILON: f64 = 1e-6;
const RATIO_SCALE: f64 = 1e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQuality {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloodRisk {
    Low,
    Medium,
    High,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub rain: RainRisk,
    pub air_quality: AirQuality,
    pub flood: FloodRisk,
}

/// Rain risk from the highest precipitation probability (%) in the next
/// hours. A window with no data counts as 0%.
pub fn rain_risk(max_precip_probability: Option<f64>) -> RainRisk {
    let probability = max_precip_probability.unwrap_or(0.0);
    if probability >= 70.0 {
        RainRisk::High
    } else if probability >= 40.0 {
        RainRisk::Medium
    } else {
        RainRisk::Low
    }
}

/// US AQI banding.
pub fn air_quality(us_aqi: Option<f64>) -> AirQuality {
    let Some(aqi) = us_aqi.filter(|v| !v.is_nan()) else {
        return AirQuality::Unknown;
    };

    match aqi {
        v if v <= 50.0 => AirQuality::Good,
        v if v <= 100.0 => AirQuality::Moderate,
        v if v <= 150.0 => AirQuality::UnhealthySensitive,
        v if v <= 200.0 => AirQuality::Unhealthy,
        v if v <= 300.0 => AirQuality::VeryUnhealthy,
        _ => AirQuality::Hazardous,
    }
}

/// Flood risk from the relative rise of daily river discharge over the next
/// few days against today's value.
pub fn flood_risk(river_discharge: &[Option<f64>]) -> FloodRisk {
    if river_discharge.is_empty() {
        return FloodRisk::Unknown;
    }
    if river_discharge.len() < 3 {
        return FloodRisk::Low;
    }

    let increase = relative_increase(river_discharge);
    if increase >= 0.5 {
        FloodRisk::High
    } else if increase >= 0.2 {
        FloodRisk::Medium
    } else {
        FloodRisk::Low
    }
}

fn relative_increase(river_discharge: &[Option<f64>]) -> f64 {
    let baseline = river_discharge.first().copied().flatten().unwrap_or(0.0);
    let ahead = if river_discharge.len() >= 4 {
        river_discharge[1..4]
            .iter()
            .filter_map(|v| *v)
            .reduce(f64::max)
            .unwrap_or(0.0)
    } else {
        river_discharge.last().copied().flatten().unwrap_or(0.0)
    };

    let increase = (ahead - baseline) / (baseline + FLOOD_EPSILON);
    if !increase.is_finite() {
        return 0.0;
    }
    // The epsilon alone pulls exact 20%/50% rises just under their threshold.
    (increase * RATIO_SCALE).round() / RATIO_SCALE
}
