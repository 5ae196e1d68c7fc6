use shared::error::ShapeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Please enter order_uid")]
    MissingOrderUid,
    #[error("Please enter JSON")]
    MissingJson,
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Fetch error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Fetch error: invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Fetch error: {0}")]
    Shape(#[from] ShapeError),
}

impl FlowError {
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingOrderUid | Self::MissingJson | Self::InvalidJson(_)
        )
    }
}
