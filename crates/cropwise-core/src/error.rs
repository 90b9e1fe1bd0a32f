use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CropwiseError {
    #[error("Invalid input parameters")]
    Validation(Vec<FieldIssue>),

    #[error("upstream service failed: {0}")]
    Upstream(String),

    #[error("failed to write prediction history: {0}")]
    Persistence(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to load crop table from {path}: {reason}")]
    TableLoad { path: PathBuf, reason: String },

    #[error("invalid crop table: {0}")]
    TableInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CropwiseError {
    /// Field issues for a validation failure, empty for every other kind.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            CropwiseError::Validation(issues) => issues,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for CropwiseError {
    fn from(err: reqwest::Error) -> Self {
        CropwiseError::Upstream(err.to_string())
    }
}
