use feeslip_core::ReceiptAnalysis;
use thiserror::Error;

use crate::analyze::Analyzer;
use crate::normalize::normalize_pages;
use crate::source::{PageSource, SourceError};
use crate::template::ReceiptTemplate;

/// Failures that make a document unusable as a whole. Retrying is pointless:
/// the same input produces the same failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Page source failed: {0}")]
    Source(#[from] SourceError),
    #[error("Document text is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },
}

/// The result of a single receipt run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub page_count: usize,
    /// Text the rules were applied to.
    pub normalized_text: String,
    pub analysis: ReceiptAnalysis,
}

/// Orchestrates: page source → normalize → analyze.
pub struct ReceiptPipeline<S: PageSource> {
    source: S,
    analyzer: Analyzer,
    max_text_bytes: usize,
}

impl<S: PageSource> ReceiptPipeline<S> {
    pub fn new(source: S, template: &ReceiptTemplate) -> Self {
        Self {
            source,
            analyzer: Analyzer::new(template),
            max_text_bytes: template.max_text_bytes,
        }
    }

    pub fn run(&self) -> Result<PipelineOutput, PipelineError> {
        let pages = self.source.pages()?;

        let len: usize = pages.iter().map(String::len).sum();
        if len > self.max_text_bytes {
            return Err(PipelineError::InputTooLarge { len, limit: self.max_text_bytes });
        }

        let normalized_text = normalize_pages(&pages);
        let analysis = self.analyzer.analyze(&normalized_text);

        tracing::info!(
            pages = pages.len(),
            fields = analysis.student_details.found_count(),
            transport_fee_found = analysis.transport_fee_found,
            needs_review = analysis.needs_review(),
            "receipt analysed"
        );

        Ok(PipelineOutput { page_count: pages.len(), normalized_text, analysis })
    }
}
