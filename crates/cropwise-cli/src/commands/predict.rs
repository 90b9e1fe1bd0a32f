use crate::commands::{load_table, weather_provider};
use crate::output;
use crate::PredictArgs;
use cropwise_core::error::CropwiseError;
use cropwise_core::history::MemoryHistory;
use cropwise_core::model::WeatherReport;
use cropwise_core::rules::schema::CropTableDef;
use cropwise_core::scoring::Evaluation;
use cropwise_core::weather::WeatherProvider;
use cropwise_core::PredictionService;
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn run(args: PredictArgs) -> Result<(), CropwiseError> {
    let table = load_table(&args.table)?;
    let body = request_body(&args);

    let (evaluation, report) = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => {
            let provider = weather_provider(&args.weather)?;
            let location = json!({ "lat": lat, "lon": lon });
            let (evaluation, report) = evaluate_at(table, provider, &body, &location).await?;
            (evaluation, Some(report))
        }
        _ => (cropwise_core::evaluate_json(&table, &body)?, None),
    };

    match args.output.as_str() {
        "json" => {
            if args.verbose {
                output::json::print(&evaluation)?;
            } else {
                output::json::print(&evaluation.result)?;
            }
        }
        _ => output::table::print_evaluation(&evaluation, report.as_ref(), args.verbose),
    }

    Ok(())
}

/// Score `soil` under the current weather at `location`.
///
/// Goes through the prediction service so soil and location are both
/// validated before the weather backend is called.
async fn evaluate_at(
    table: CropTableDef,
    provider: Arc<dyn WeatherProvider>,
    soil: &Value,
    location: &Value,
) -> Result<(Evaluation, WeatherReport), CropwiseError> {
    let service = PredictionService::new(table, provider, Arc::new(MemoryHistory::new()));
    let located = service.predict_at(soil, location, None).await?;

    // Re-score with the fetched weather to keep the full ranking for output.
    let mut body = soil.clone();
    let reading = serde_json::to_value(located.weather.reading())?;
    body["temperature"] = reading["temperature"].clone();
    body["humidity"] = reading["humidity"].clone();
    let evaluation = cropwise_core::evaluate_json(service.table(), &body)?;

    Ok((evaluation, located.weather))
}

/// Soil readings plus any weather given on the command line, in the shape the
/// HTTP API accepts.
fn request_body(args: &PredictArgs) -> Value {
    let mut body = json!({
        "nitrogen": args.nitrogen,
        "phosphorus": args.phosphorus,
        "potassium": args.potassium,
        "ph": args.ph,
        "rainfall": args.rainfall,
    });
    if let Some(t) = args.temperature {
        body["temperature"] = json!(t);
    }
    if let Some(h) = args.humidity {
        body["humidity"] = json!(h);
    }
    body
}
