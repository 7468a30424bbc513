use feeslip_core::{Amount, FeeLineItem, ReceiptAnalysis};

use crate::normalize::collapse_whitespace;
use crate::rules::{student_rules, transport_fee_rule, Field, RuleOutcome};
use crate::template::ReceiptTemplate;

pub const TRANSPORT_FEE_MISSING: &str = "Transport fee not found in the receipt";

/// Applies the receipt template's rules to normalized text.
#[derive(Debug, Clone)]
pub struct Analyzer {
    artifacts: Vec<String>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&ReceiptTemplate::default())
    }
}

impl Analyzer {
    pub fn new(template: &ReceiptTemplate) -> Self {
        let artifacts = template
            .artifacts
            .iter()
            .filter(|a| !a.is_empty())
            .cloned()
            .collect();
        Self { artifacts }
    }

    /// Extract student details and the transport fee line.
    ///
    /// Never fails as a whole: misses leave fields unset, rule failures are
    /// recorded in `errors` and every other field is still extracted.
    pub fn analyze(&self, text: &str) -> ReceiptAnalysis {
        let text = self.strip_artifacts(text);
        let mut builder = AnalysisBuilder::default();

        for rule in student_rules() {
            builder.student_field(rule.field, rule.apply(&text));
        }

        let fee_rule = transport_fee_rule();
        builder.transport_fee(fee_rule.particular, fee_rule.apply(&text));

        builder.build()
    }

    fn strip_artifacts(&self, text: &str) -> String {
        let mut cleaned = text.to_string();
        for artifact in &self.artifacts {
            if cleaned.contains(artifact.as_str()) {
                tracing::debug!(%artifact, "stripping extraction artifact");
                cleaned = cleaned.replace(artifact.as_str(), "");
            }
        }
        collapse_whitespace(&cleaned)
    }
}

// ── Result builder ───────────────────────────────────────────────────────────

/// Accumulates rule outcomes; the record only leaves through `build`.
#[derive(Default)]
struct AnalysisBuilder {
    analysis: ReceiptAnalysis,
}

impl AnalysisBuilder {
    fn student_field(&mut self, field: Field, value: Option<String>) {
        match value {
            Some(value) => {
                tracing::debug!(%field, %value, "field extracted");
                let details = &mut self.analysis.student_details;
                let slot = match field {
                    Field::ReceiptNo => &mut details.receipt_no,
                    Field::Usn => &mut details.usn,
                    Field::Name => &mut details.name,
                    Field::Branch => &mut details.branch,
                    Field::FatherName => &mut details.father_name,
                };
                *slot = Some(value);
            }
            None => tracing::debug!(%field, "field not found"),
        }
    }

    fn transport_fee(&mut self, particular: &str, outcome: RuleOutcome<(Amount, Amount)>) {
        match outcome {
            RuleOutcome::Found((concession, amount)) => {
                let sno = (self.analysis.fees.len() + 1).to_string();
                self.analysis.fees.push(FeeLineItem {
                    sno,
                    particular: particular.to_string(),
                    concession,
                    amount,
                });
                // Concession is already reflected in the payable amount.
                self.analysis.total_amount = amount;
                self.analysis.transport_fee_found = true;
            }
            RuleOutcome::Absent => {
                tracing::warn!("transport fee not found");
                self.analysis.warnings.push(TRANSPORT_FEE_MISSING.to_string());
            }
            RuleOutcome::Failed(reason) => {
                tracing::warn!(%reason, "transport fee could not be parsed");
                self.analysis.errors.push(reason);
                self.analysis.warnings.push(TRANSPORT_FEE_MISSING.to_string());
            }
        }
    }

    fn build(self) -> ReceiptAnalysis {
        self.analysis
    }
}
