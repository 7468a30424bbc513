use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read page {page} ({path}): {source}")]
    Read {
        page: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Document decode error: {0}")]
    Decode(String),
}

/// Anything that can hand over a document as raw per-page text, in page order.
pub trait PageSource: Send + Sync {
    fn pages(&self) -> Result<Vec<String>, SourceError>;
}

// ── In-memory pages ───────────────────────────────────────────────────────────

/// Pages that are already decoded. Used by embedders and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pub pages: Vec<String>,
}

impl StaticPages {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { pages: pages.into_iter().map(Into::into).collect() }
    }
}

impl PageSource for StaticPages {
    fn pages(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.pages.clone())
    }
}

// ── Text files ────────────────────────────────────────────────────────────────

/// One UTF-8 text file per page, as written by an external PDF-to-text step.
#[derive(Debug, Clone)]
pub struct TextFiles {
    paths: Vec<PathBuf>,
}

impl TextFiles {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl PageSource for TextFiles {
    fn pages(&self) -> Result<Vec<String>, SourceError> {
        self.paths
            .iter()
            .enumerate()
            .map(|(idx, path)| {
                std::fs::read_to_string(path).map_err(|source| SourceError::Read {
                    page: idx + 1,
                    path: path.clone(),
                    source,
                })
            })
            .collect()
    }
}
