use crate::error::CropwiseError;
use crate::history::{newest_first, HistoryRecord, HistoryStore};
use crate::model::UserId;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// History kept as one JSON record per line in a local file.
pub struct JsonlHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryStore for JsonlHistory {
    async fn append(&self, record: HistoryRecord) -> Result<(), CropwiseError> {
        let mut line =
            serde_json::to_string(&record).map_err(|e| CropwiseError::Persistence(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| persistence(&self.path, e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| persistence(&self.path, e))?;
        file.flush().await.map_err(|e| persistence(&self.path, e))?;
        Ok(())
    }

    async fn list(&self, user: &UserId) -> Result<Vec<HistoryRecord>, CropwiseError> {
        // Held so a concurrent append never leaves us a partial last line.
        let content = {
            let _guard = self.write_lock.lock().await;
            tokio::fs::read_to_string(&self.path).await
        };
        let content = match content {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(persistence(&self.path, e)),
        };

        let lines: Vec<&str> = content.lines().collect();
        let mut mine = Vec::new();
        for (idx, line) in lines.iter().enumerate().rev() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryRecord>(line) {
                Ok(record) if &record.user_id == user => mine.push(record),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = idx + 1,
                        "skipping unreadable history line: {}",
                        e
                    );
                }
            }
        }

        newest_first(&mut mine);
        Ok(mine)
    }
}

fn persistence(path: &Path, err: std::io::Error) -> CropwiseError {
    CropwiseError::Persistence(format!("{}: {}", path.display(), err))
}
