pub mod engine;
pub mod outcome;

pub use engine::{rank, recommend, MAX_SCORE};
pub use outcome::{CriterionResult, CropRecommendation, CropScore, Evaluation, PredictionResult};
