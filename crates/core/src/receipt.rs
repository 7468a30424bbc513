use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// Identity fields printed on a fee receipt. Every field is either a trimmed,
/// non-empty string or `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetails {
    pub name: Option<String>,
    /// Admission number (USN).
    pub usn: Option<String>,
    /// Class / section.
    pub branch: Option<String>,
    pub father_name: Option<String>,
    pub receipt_no: Option<String>,
}

impl StudentDetails {
    /// Number of fields that were extracted.
    pub fn found_count(&self) -> usize {
        [
            &self.name,
            &self.usn,
            &self.branch,
            &self.father_name,
            &self.receipt_no,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLineItem {
    pub sno: String,
    pub particular: String,
    pub concession: Amount,
    pub amount: Amount,
}

/// The structured result of analysing one receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptAnalysis {
    pub student_details: StudentDetails,
    /// Fee lines in the order they were found.
    pub fees: Vec<FeeLineItem>,
    /// Payable amount of the transport fee line; zero when it was not found.
    pub total_amount: Amount,
    pub transport_fee_found: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ReceiptAnalysis {
    /// Whether a human should look at this receipt before it is trusted.
    pub fn needs_review(&self) -> bool {
        !self.transport_fee_found || !self.errors.is_empty()
    }
}
