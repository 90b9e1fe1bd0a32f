pub mod crops;
pub mod fertilizer;
pub mod predict;
pub mod serve;
pub mod weather;

use crate::{TableArgs, WeatherArgs};
use cropwise_core::error::CropwiseError;
use cropwise_core::rules::{self, builtin, schema::CropTableDef};
use cropwise_core::weather::openweather::{OpenWeatherClient, OpenWeatherConfig};
use cropwise_core::weather::{DisabledWeather, WeatherProvider};
use std::sync::Arc;

/// Load the custom table if one was given, otherwise the named preset.
pub fn load_table(args: &TableArgs) -> Result<CropTableDef, CropwiseError> {
    match &args.table_file {
        Some(path) => rules::load_table(path),
        None => builtin::load_preset(&args.preset),
    }
}

/// OpenWeather when an API key is configured, a disabled backend otherwise.
pub fn weather_provider(args: &WeatherArgs) -> Result<Arc<dyn WeatherProvider>, CropwiseError> {
    match &args.openweather_api_key {
        Some(key) => {
            let mut config = OpenWeatherConfig::new(key.clone());
            config.base_url = args.openweather_base_url.clone();
            Ok(Arc::new(OpenWeatherClient::new(config)?))
        }
        None => Ok(Arc::new(DisabledWeather)),
    }
}
