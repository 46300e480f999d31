use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchEngineError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Search term must not be empty")]
    EmptyTerm,

    #[error("Filter {key} requires a non-negative integer, got {value:?}")]
    InvalidFilter { key: &'static str, value: String },

    #[error("Page number must be at least 1")]
    InvalidPage,

    #[error("User results cannot be bookmarked")]
    NotBookmarkable,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchEngineError {
    /// Short reason tag surfaced to the rendering layer alongside the
    /// human-readable message.
    pub fn reason(&self) -> &'static str {
        match self {
            SearchEngineError::Network(_) | SearchEngineError::Status { .. } => "network",
            SearchEngineError::Decode(_) => "decode",
            SearchEngineError::EmptyTerm
            | SearchEngineError::InvalidFilter { .. }
            | SearchEngineError::InvalidPage
            | SearchEngineError::NotBookmarkable => "validation",
            SearchEngineError::Storage(_) | SearchEngineError::Io(_) => "storage",
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchEngineError>;
