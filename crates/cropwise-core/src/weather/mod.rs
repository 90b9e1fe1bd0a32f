pub mod openweather;

use crate::error::CropwiseError;
use crate::model::{Location, WeatherReport};
use async_trait::async_trait;

/// Trait for current-weather lookup backends.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current weather at a location.
    async fn current(&self, location: Location) -> Result<WeatherReport, CropwiseError>;

    /// Name of this weather backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Stand-in used when no weather backend is configured. Every lookup fails.
#[derive(Debug, Default)]
pub struct DisabledWeather;

#[async_trait]
impl WeatherProvider for DisabledWeather {
    async fn current(&self, _location: Location) -> Result<WeatherReport, CropwiseError> {
        Err(CropwiseError::Config(
            "weather lookup is disabled. Set OPENWEATHER_API_KEY to enable it".into(),
        ))
    }

    fn backend_name(&self) -> &str {
        "disabled"
    }
}
