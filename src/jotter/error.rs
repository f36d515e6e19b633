use crate::model::RecordKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JotterError {
    /// The one failure the application handles: the remote API could not
    /// deliver a record. Covers connection errors, timeouts, and non-2xx
    /// responses alike; the router answers all of them with the error view.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected response for {kind}: missing '{key}' envelope")]
    Envelope { kind: RecordKind, key: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl JotterError {
    /// True for the failures the router routes to the error view.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            JotterError::Fetch { .. } | JotterError::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, JotterError>;
