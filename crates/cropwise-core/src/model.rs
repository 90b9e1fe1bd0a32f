use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven measured quantities a crop rule can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Rainfall,
    Temperature,
    Humidity,
}

impl Axis {
    /// All axes in evaluation order.
    pub const ALL: [Axis; 7] = [
        Axis::Nitrogen,
        Axis::Phosphorus,
        Axis::Potassium,
        Axis::Ph,
        Axis::Rainfall,
        Axis::Temperature,
        Axis::Humidity,
    ];

    /// Field name used in JSON requests and rule files.
    pub fn key(&self) -> &'static str {
        match self {
            Axis::Nitrogen => "nitrogen",
            Axis::Phosphorus => "phosphorus",
            Axis::Potassium => "potassium",
            Axis::Ph => "ph",
            Axis::Rainfall => "rainfall",
            Axis::Temperature => "temperature",
            Axis::Humidity => "humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Axis::Nitrogen | Axis::Phosphorus | Axis::Potassium => "kg/ha",
            Axis::Ph => "",
            Axis::Rainfall => "mm",
            Axis::Temperature => "°C",
            Axis::Humidity => "%",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Nitrogen => write!(f, "Nitrogen"),
            Axis::Phosphorus => write!(f, "Phosphorus"),
            Axis::Potassium => write!(f, "Potassium"),
            Axis::Ph => write!(f, "pH"),
            Axis::Rainfall => write!(f, "Rainfall"),
            Axis::Temperature => write!(f, "Temperature"),
            Axis::Humidity => write!(f, "Humidity"),
        }
    }
}

/// Soil measurements entered by the farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilSample {
    #[serde(with = "rust_decimal::serde::float")]
    pub nitrogen: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub phosphorus: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub potassium: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ph: Decimal,
    /// Seasonal rainfall in mm.
    #[serde(with = "rust_decimal::serde::float")]
    pub rainfall: Decimal,
}

/// Current weather at the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Degrees Celsius.
    #[serde(with = "rust_decimal::serde::float")]
    pub temperature: Decimal,
    /// Relative humidity in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub humidity: Decimal,
}

/// A validated soil sample paired with the weather it was evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub soil: SoilSample,
    pub weather: WeatherReading,
}

impl PredictionRequest {
    /// The measured value for a rule axis.
    pub fn value(&self, axis: Axis) -> Decimal {
        match axis {
            Axis::Nitrogen => self.soil.nitrogen,
            Axis::Phosphorus => self.soil.phosphorus,
            Axis::Potassium => self.soil.potassium,
            Axis::Ph => self.soil.ph,
            Axis::Rainfall => self.soil.rainfall,
            Axis::Temperature => self.weather.temperature,
            Axis::Humidity => self.weather.humidity,
        }
    }
}

/// Geographic coordinates of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(with = "rust_decimal::serde::float")]
    pub lat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub lon: Decimal,
}

impl Location {
    /// Coordinates rounded to two decimals (roughly 1 km), used as a cache key.
    pub fn grid_cell(&self) -> (Decimal, Decimal) {
        (self.lat.round_dp(2), self.lon.round_dp(2))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// Weather as returned by the weather lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub temperature: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub humidity: Decimal,
    pub description: String,
    /// Place name reported by the service.
    pub location: String,
}

impl WeatherReport {
    pub fn reading(&self) -> WeatherReading {
        WeatherReading {
            temperature: self.temperature,
            humidity: self.humidity,
        }
    }
}

/// Opaque user identity handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
