pub mod jsonl;
pub mod memory;

use crate::error::CropwiseError;
use crate::model::{PredictionRequest, SoilSample, UserId, WeatherReading};
use crate::scoring::outcome::PredictionResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use jsonl::JsonlHistory;
pub use memory::MemoryHistory;

/// One stored prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub soil: SoilSample,
    pub weather: WeatherReading,
    pub result: PredictionResult,
}

impl HistoryRecord {
    pub fn new(user_id: UserId, request: &PredictionRequest, result: &PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
            soil: request.soil,
            weather: request.weather,
            result: result.clone(),
        }
    }
}

/// Append-only per-user prediction log.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, record: HistoryRecord) -> Result<(), CropwiseError>;

    /// All records for a user, newest first.
    async fn list(&self, user: &UserId) -> Result<Vec<HistoryRecord>, CropwiseError>;
}

/// Order records newest first. Records with equal timestamps keep the order given.
pub(crate) fn newest_first(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
