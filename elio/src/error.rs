use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElioError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vision error: {0}")]
    Vision(String),

    #[error("Vision unavailable: {0}")]
    VisionUnavailable(String),
}

impl From<validator::ValidationErrors> for ElioError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ElioError::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ElioError>;
