use crate::output;
use cropwise_core::error::CropwiseError;
use cropwise_core::{fertilizer, validate};
use serde_json::json;

pub fn run(
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    ph: f64,
    format: &str,
) -> Result<(), CropwiseError> {
    // Rainfall plays no part in the advice.
    let soil = validate::parse_soil_sample(&json!({
        "nitrogen": nitrogen,
        "phosphorus": phosphorus,
        "potassium": potassium,
        "ph": ph,
        "rainfall": 0,
    }))?;

    let advice = fertilizer::advise(&soil);

    match format {
        "json" => output::json::print(&advice)?,
        _ => output::table::print_advice(&advice),
    }

    Ok(())
}
