pub mod error;
pub mod fertilizer;
pub mod history;
pub mod model;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod validate;
pub mod weather;

use error::CropwiseError;
use model::PredictionRequest;
use rules::schema::CropTableDef;
use scoring::outcome::{Evaluation, PredictionResult};

pub use service::{LocatedPrediction, PredictionService};

/// Main API entry point: score a validated request against a crop table.
///
/// Ranks every crop, picks the winner and two alternatives, and attaches
/// fertilizer advice for the soil sample. Pure and synchronous.
pub fn evaluate(
    table: &CropTableDef,
    request: &PredictionRequest,
) -> Result<Evaluation, CropwiseError> {
    let ranking = scoring::rank(table, request);
    let recommendation = scoring::recommend(&ranking)?;
    let fertilizer = fertilizer::advise(&request.soil);

    Ok(Evaluation {
        ranking,
        result: PredictionResult {
            crop: recommendation.crop,
            confidence: recommendation.confidence,
            alternative_crops: recommendation.alternative_crops,
            fertilizer,
        },
    })
}

/// Validate a raw JSON request and evaluate it in one step.
pub fn evaluate_json(
    table: &CropTableDef,
    body: &serde_json::Value,
) -> Result<Evaluation, CropwiseError> {
    let request = validate::parse_prediction_request(body)?;
    evaluate(table, &request)
}
