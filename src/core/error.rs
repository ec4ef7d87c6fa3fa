use thiserror::Error;

/// Errors raised at the edges of the grid engine.
///
/// Cell-level problems never surface here: malformed values degrade to plain
/// text during rendering. Only dataset loading, page-size selection and
/// configuration can fail.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported page size {0} (expected one of 10, 25, 50, 100)")]
    InvalidPageSize(usize),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type GridResult<T> = std::result::Result<T, GridError>;
