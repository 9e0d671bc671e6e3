use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can end a scan or lookup. None of these are retried; the
/// caller shows the message and the action is over.
#[derive(Error, Debug)]
pub enum FoodError {
    #[error("No camera found")]
    NoCameraFound,
    #[error("Scanner error: {0}")]
    ScanHardware(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("API request failed with status: {0}")]
    Upstream(StatusCode),
    #[error("Failed to parse response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl FoodError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FoodError::NotFound(_))
    }
}

pub type FoodResult<T> = Result<T, FoodError>;
