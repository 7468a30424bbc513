use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Junk emitted by one of the PDF text extractors in front of real content.
pub const DEFAULT_ARTIFACT: &str = "Closure: ()=>String from Function toString..";

/// Matches the upload cap of the receipt service (16 MiB).
pub const DEFAULT_MAX_TEXT_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse template TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for the fee receipt template. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptTemplate {
    /// Literal strings removed from the text before any rule runs.
    pub artifacts: Vec<String>,
    /// Raw text larger than this is rejected by the pipeline.
    pub max_text_bytes: usize,
}

impl Default for ReceiptTemplate {
    fn default() -> Self {
        Self {
            artifacts: vec![DEFAULT_ARTIFACT.to_string()],
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

impl ReceiptTemplate {
    pub fn from_toml(toml_content: &str) -> Result<Self, TemplateError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
