//! Error types for the ITSD copilot.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItsdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Knowledge base snapshot error: {0}")]
    Snapshot(String),

    #[error("Command '{0}' is not in the safe commands list")]
    UnknownCommand(String),

    /// Broken invariant inside the engine (e.g. a static pattern that fails to compile).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ItsdError {
    pub fn code(&self) -> i32 {
        match self {
            ItsdError::Io(_) => -32006,
            ItsdError::Json(_) => -32700,
            ItsdError::Snapshot(_) => -32010,
            ItsdError::UnknownCommand(_) => -32601,
            ItsdError::Internal(_) => -32603,
        }
    }
}

impl From<regex::Error> for ItsdError {
    fn from(err: regex::Error) -> Self {
        ItsdError::Internal(format!("invalid pattern: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ItsdError>;
