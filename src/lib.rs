//! Prolific MCP - research platform tools for AI agents
//!
//! Exposes the Prolific REST API (studies, submissions, workspaces,
//! screening filters) as Model Context Protocol tools served over stdio.

pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod template;
pub mod types;

pub use client::ProlificClient;
pub use config::ProlificConfig;
pub use error::{ProlificError, Result};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
