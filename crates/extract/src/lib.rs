pub mod analyze;
pub mod normalize;
pub mod pipeline;
pub mod rules;
pub mod source;
pub mod template;

pub use analyze::{Analyzer, TRANSPORT_FEE_MISSING};
pub use normalize::{collapse_whitespace, normalize_pages};
pub use pipeline::{PipelineError, PipelineOutput, ReceiptPipeline};
pub use rules::{
    student_rules, transport_fee_rule, Capture, FeeRule, Field, LabelRule, RuleOutcome,
};
pub use source::{PageSource, SourceError, StaticPages, TextFiles};
pub use template::{ReceiptTemplate, TemplateError};
