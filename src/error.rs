//! Error types for the Prolific MCP server

use thiserror::Error;

/// Result type alias for Prolific operations
pub type Result<T> = std::result::Result<T, ProlificError>;

/// Main error type for the Prolific MCP server
#[derive(Error, Debug)]
pub enum ProlificError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No arguments provided")]
    MissingArguments,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("{0}")]
    InvalidInput(String),

    /// Remote service answered with a non-success status
    #[error("Failed to {operation}: {status} {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Request never produced a usable response (connect error, bad JSON, ...)
    #[error("Failed to {operation}: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to read or parse template: {0}")]
    Template(String),

    #[error("Study created but failed to publish: {0}")]
    PublishFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProlificError {
    /// HTTP status of a failed remote call, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ProlificError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            ProlificError::UnknownTool(_) => -32601,
            ProlificError::MissingArguments
            | ProlificError::InvalidArguments { .. }
            | ProlificError::InvalidInput(_) => -32602,
            _ => -32000,
        }
    }
}
