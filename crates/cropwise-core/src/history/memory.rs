use crate::error::CropwiseError;
use crate::history::{newest_first, HistoryRecord, HistoryStore};
use crate::model::UserId;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local history, lost on restart.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: RwLock<Vec<HistoryRecord>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(&self, record: HistoryRecord) -> Result<(), CropwiseError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn list(&self, user: &UserId) -> Result<Vec<HistoryRecord>, CropwiseError> {
        let records = self.records.read().await;
        let mut mine: Vec<HistoryRecord> = records
            .iter()
            .rev()
            .filter(|r| &r.user_id == user)
            .cloned()
            .collect();
        newest_first(&mut mine);
        Ok(mine)
    }
}
