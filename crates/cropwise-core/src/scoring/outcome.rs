use crate::fertilizer::NutrientAdvice;
use crate::model::Axis;
use crate::rules::schema::RangeDef;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one range predicate for one crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    pub axis: Axis,
    /// The measured value that was tested.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    /// The crop's acceptance range for this axis.
    pub range: RangeDef,
    pub matched: bool,
}

/// A candidate crop and how many of its criteria the field meets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropScore {
    pub crop: String,
    /// Number of matched criteria, 0 to 7.
    pub score: u8,
    pub criteria: Vec<CriterionResult>,
}

impl CropScore {
    pub fn unmet(&self) -> impl Iterator<Item = &CriterionResult> {
        self.criteria.iter().filter(|c| !c.matched)
    }
}

/// The winning crop with its runners-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub crop: String,
    pub score: u8,
    /// Fraction of criteria met (score / 7), not a probability.
    pub confidence: f64,
    pub alternative_crops: Vec<String>,
}

/// Response returned to callers and stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub crop: String,
    pub confidence: f64,
    pub alternative_crops: Vec<String>,
    pub fertilizer: Vec<NutrientAdvice>,
}

/// Full evaluation: the prediction plus the ranking it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub ranking: Vec<CropScore>,
    pub result: PredictionResult,
}
