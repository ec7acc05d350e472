//! Study template loading
//!
//! Templates are local YAML or JSON files holding a study definition in the
//! shape the Prolific API expects. The content is passed through unchanged.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ProlificError, Result};

/// Supported template formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

impl TemplateFormat {
    /// Detect format from file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(TemplateFormat::Yaml),
            "json" => Some(TemplateFormat::Json),
            _ => None,
        }
    }

    /// Parse template content in this format
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self {
            TemplateFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ProlificError::Template(e.to_string()))
            }
            TemplateFormat::Json => {
                serde_json::from_str(content).map_err(|e| ProlificError::Template(e.to_string()))
            }
        }
    }
}

/// Expand `~` and resolve the template path
pub fn resolve_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}

/// Read and parse a study template from disk
pub fn load_template(raw_path: &str) -> Result<Value> {
    let path = resolve_path(raw_path);
    let format = TemplateFormat::from_path(&path).ok_or_else(|| {
        ProlificError::Template(
            "Unsupported template file format. Use .yaml, .yml, or .json".to_string(),
        )
    })?;

    let content = std::fs::read_to_string(&path)
        .map_err(|e| ProlificError::Template(format!("{}: {}", path.display(), e)))?;

    let study = format.parse(&content)?;
    tracing::debug!(path = %path.display(), ?format, "Loaded study template");
    Ok(study)
}
