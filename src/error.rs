use crate::client::Operation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure or non-2xx answer. The message names the operation
    /// only; `detail` is kept for the diagnostic log.
    #[error("Failed to {operation}")]
    RequestFailed { operation: Operation, detail: String },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Could not build HTTP client: {0}")]
    ClientInit(String),
}

impl ApiError {
    pub fn request_failed(operation: Operation, detail: impl ToString) -> Self {
        ApiError::RequestFailed {
            operation,
            detail: detail.to_string(),
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::RequestFailed { detail, .. } => detail.as_str(),
            ApiError::InvalidBaseUrl(detail) | ApiError::ClientInit(detail) => detail.as_str(),
        }
    }
}

#[derive(Error, Debug)]
pub enum PopupError {
    #[error("Cannot access current tab")]
    TabResolutionFailed,

    #[error(transparent)]
    RequestFailed(#[from] ApiError),

    #[error("No URL available")]
    NoActiveSite,

    #[error("{0}")]
    Settings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
