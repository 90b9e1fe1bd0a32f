use crate::error::CropwiseError;
use crate::model::{Axis, PredictionRequest};
use crate::rules::schema::{CropRuleDef, CropTableDef};
use crate::scoring::outcome::{CriterionResult, CropRecommendation, CropScore};

/// Highest score a crop can reach: one point per axis.
pub const MAX_SCORE: u8 = Axis::ALL.len() as u8;

/// Number of runner-up crops reported next to the winner.
pub const ALTERNATIVES: usize = 2;

/// Score every crop in the table and order them best first.
///
/// The sort is stable, so crops with equal scores keep table order and the
/// earlier declared crop wins a tie.
pub fn rank(table: &CropTableDef, request: &PredictionRequest) -> Vec<CropScore> {
    let mut ranking: Vec<CropScore> = table
        .crops
        .iter()
        .map(|rule| score_crop(rule, request))
        .collect();
    ranking.sort_by(|a, b| b.score.cmp(&a.score));
    ranking
}

/// Pick the winner and its alternatives from a ranking produced by [`rank`].
pub fn recommend(ranking: &[CropScore]) -> Result<CropRecommendation, CropwiseError> {
    let best = ranking
        .first()
        .ok_or_else(|| CropwiseError::TableInvalid("crop table has no crops".into()))?;

    let alternative_crops: Vec<String> = ranking
        .iter()
        .skip(1)
        .take(ALTERNATIVES)
        .map(|c| c.crop.clone())
        .collect();

    if alternative_crops.len() < ALTERNATIVES {
        return Err(CropwiseError::TableInvalid(format!(
            "need at least {} crops to report alternatives, found {}",
            ALTERNATIVES + 1,
            ranking.len()
        )));
    }

    Ok(CropRecommendation {
        crop: best.crop.clone(),
        score: best.score,
        confidence: f64::from(best.score) / f64::from(MAX_SCORE),
        alternative_crops,
    })
}

/// Evaluate the seven predicates of a single crop.
fn score_crop(rule: &CropRuleDef, request: &PredictionRequest) -> CropScore {
    let criteria: Vec<CriterionResult> = Axis::ALL
        .iter()
        .filter_map(|axis| {
            rule.criteria.get(axis).map(|range| {
                let value = request.value(*axis);
                CriterionResult {
                    axis: *axis,
                    value,
                    range: range.clone(),
                    matched: range.contains(value),
                }
            })
        })
        .collect();

    let score = criteria.iter().filter(|c| c.matched).count() as u8;

    CropScore {
        crop: rule.crop.clone(),
        score,
        criteria,
    }
}
