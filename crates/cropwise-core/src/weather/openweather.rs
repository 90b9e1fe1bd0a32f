use crate::error::CropwiseError;
use crate::model::{Location, WeatherReport};
use crate::validate::check_weather;
use crate::weather::WeatherProvider;
use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl OpenWeatherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

/// Current-weather client for the OpenWeatherMap `data/2.5/weather` endpoint.
pub struct OpenWeatherClient {
    config: OpenWeatherConfig,
    client: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, CropwiseError> {
        if config.api_key.trim().is_empty() {
            return Err(CropwiseError::Config(
                "OpenWeather API key not configured".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CropwiseError::Config(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, location: Location) -> Result<WeatherReport, CropwiseError> {
        tracing::debug!(%location, "fetching weather from OpenWeather");

        let url = format!(
            "{}/data/2.5/weather",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropwiseError::Upstream(format!(
                "weather API error: {} {}",
                status,
                body.trim()
            )));
        }

        let payload: Value = response.json().await?;
        parse_payload(&payload)
    }

    fn backend_name(&self) -> &str {
        "openweather"
    }
}

/// Map an OpenWeather response body to a report.
///
/// Temperature is rounded to one decimal. Missing fields and readings outside
/// the accepted weather ranges are treated as a malformed upstream payload.
pub fn parse_payload(payload: &Value) -> Result<WeatherReport, CropwiseError> {
    let temperature = payload["main"]["temp"]
        .as_f64()
        .and_then(Decimal::from_f64)
        .ok_or_else(|| malformed("main.temp"))?
        .round_dp(1);

    let humidity = payload["main"]["humidity"]
        .as_f64()
        .and_then(Decimal::from_f64)
        .ok_or_else(|| malformed("main.humidity"))?;

    let description = payload["weather"][0]["description"]
        .as_str()
        .ok_or_else(|| malformed("weather[0].description"))?
        .to_string();

    let location = payload["name"].as_str().unwrap_or_default().to_string();

    let report = WeatherReport {
        temperature,
        humidity,
        description,
        location,
    };

    check_weather(&report.reading()).map_err(|e| {
        let detail: Vec<String> = e.issues().iter().map(|i| i.to_string()).collect();
        CropwiseError::Upstream(format!(
            "weather API returned an implausible reading: {}",
            detail.join("; ")
        ))
    })?;

    Ok(report)
}

fn malformed(field: &str) -> CropwiseError {
    CropwiseError::Upstream(format!("weather API response is missing '{field}'"))
}
