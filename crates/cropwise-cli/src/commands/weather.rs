use crate::commands::weather_provider;
use crate::output;
use crate::WeatherArgs;
use cropwise_core::error::CropwiseError;
use cropwise_core::validate;
use serde_json::json;

pub async fn run(lat: f64, lon: f64, args: &WeatherArgs, format: &str) -> Result<(), CropwiseError> {
    let location = validate::parse_location(&json!({ "lat": lat, "lon": lon }))?;
    let provider = weather_provider(args)?;
    let report = provider.current(location).await?;

    match format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_weather(&report),
    }

    Ok(())
}
