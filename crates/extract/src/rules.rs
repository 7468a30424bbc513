use std::fmt;
use std::sync::OnceLock;

use feeslip_core::Amount;
use regex::Regex;

// ── Rule types ───────────────────────────────────────────────────────────────

/// Student fields the receipt template carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ReceiptNo,
    Usn,
    Name,
    Branch,
    FatherName,
}

impl Field {
    /// Wire key of the field inside `student_details`.
    pub fn key(self) -> &'static str {
        match self {
            Field::ReceiptNo => "receipt_no",
            Field::Usn => "usn",
            Field::Name => "name",
            Field::Branch => "branch",
            Field::FatherName => "father_name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What to take after a label.
#[derive(Debug, Clone)]
pub enum Capture {
    /// Capture group 1 of a pattern anchored right after the label.
    Token(Regex),
    /// Everything up to the earliest match of the terminator, or end of text.
    UntilLabel(Regex),
}

/// Result of applying a fee rule to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome<T> {
    Found(T),
    Absent,
    Failed(String),
}

/// A labelled field on the receipt: where it starts and where it stops.
#[derive(Debug, Clone)]
pub struct LabelRule {
    pub field: Field,
    pub label: Regex,
    pub capture: Capture,
}

impl LabelRule {
    pub fn new(field: Field, label: &str, capture: Capture) -> Result<Self, regex::Error> {
        Ok(Self { field, label: Regex::new(label)?, capture })
    }

    /// Try every occurrence of the label in order and keep the first one that
    /// yields a non-empty value. A miss is not a failure, so there is no error
    /// case here.
    pub fn apply(&self, text: &str) -> Option<String> {
        for label in self.label.find_iter(text) {
            let rest = &text[label.end()..];
            let captured = match &self.capture {
                Capture::Token(re) => re.captures(rest).and_then(|c| c.get(1)).map(|g| g.as_str()),
                Capture::UntilLabel(terminator) => Some(match terminator.find(rest) {
                    Some(t) => &rest[..t.start()],
                    None => rest,
                }),
            };
            if let Some(value) = captured.map(str::trim).filter(|v| !v.is_empty()) {
                return Some(value.to_string());
            }
        }
        None
    }
}

/// A fee line: a fixed label followed by concession and payable amount.
#[derive(Debug, Clone)]
pub struct FeeRule {
    pub particular: &'static str,
    pub pattern: Regex,
}

impl FeeRule {
    /// Returns `(concession, amount)` when the line is present.
    pub fn apply(&self, text: &str) -> RuleOutcome<(Amount, Amount)> {
        let Some(c) = self.pattern.captures(text) else {
            return RuleOutcome::Absent;
        };
        let (Some(concession), Some(amount)) = (c.get(1), c.get(2)) else {
            return RuleOutcome::Absent;
        };
        match (concession.as_str().parse::<Amount>(), amount.as_str().parse::<Amount>()) {
            (Ok(concession), Ok(amount)) => RuleOutcome::Found((concession, amount)),
            (Err(e), _) | (_, Err(e)) => {
                RuleOutcome::Failed(format!("{}: {e}", self.particular))
            }
        }
    }
}

// ── Receipt template rules ───────────────────────────────────────────────────

fn token(pattern: &str) -> Capture {
    Capture::Token(Regex::new(pattern).expect("invalid regex"))
}

fn until(terminator: &str) -> Capture {
    Capture::UntilLabel(Regex::new(terminator).expect("invalid regex"))
}

/// Student field rules in the order the labels appear on the receipt.
pub fn student_rules() -> &'static [LabelRule] {
    static RULES: OnceLock<Vec<LabelRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (Field::ReceiptNo, r"(?i)\bReceipt No\s*:", token(r"^\s*([A-Za-z]+/\d+/\d+-\d+)")),
            (Field::Usn, r"(?i)\bAdm No\s*:", token(r"^\s*(\w+)")),
            (Field::Name, r"(?i)\bName\s*:", until(r"(?i)Class/sec")),
            (Field::Branch, r"(?i)Class/sec\s*:", until(r"(?i)Father(?:['’]?s)?\s*Name")),
            (Field::FatherName, r"(?i)Father(?:['’]?s)?\s*Name\s*:", until(r"(?i)DType")),
        ]
        .into_iter()
        .map(|(field, label, capture)| {
            LabelRule::new(field, label, capture).expect("invalid regex")
        })
        .collect()
    })
}

pub fn transport_fee_rule() -> &'static FeeRule {
    static RULE: OnceLock<FeeRule> = OnceLock::new();
    RULE.get_or_init(|| FeeRule {
        particular: "Transport Fees",
        pattern: Regex::new(
            r"(?i)Transport Fees\s+IInstallment\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)",
        )
        .expect("invalid regex"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(field: Field) -> &'static LabelRule {
        student_rules().iter().find(|r| r.field == field).unwrap()
    }

    fn found(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn table_covers_every_field_once() {
        let fields: Vec<Field> = student_rules().iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec![Field::ReceiptNo, Field::Usn, Field::Name, Field::Branch, Field::FatherName]
        );
    }

    #[test]
    fn receipt_no_token_shape() {
        let r = rule(Field::ReceiptNo);
        assert_eq!(r.apply("Receipt No : NCET/123/24-25 Date"), found("NCET/123/24-25"));
        assert_eq!(r.apply("receipt no:abc/1/2-3"), found("abc/1/2-3"));
        assert_eq!(r.apply("Receipt No : 123"), None);
    }

    #[test]
    fn adm_no_single_token() {
        let r = rule(Field::Usn);
        assert_eq!(r.apply("Adm No : 1RV20CS001 Name : X"), found("1RV20CS001"));
        assert_eq!(r.apply("ADM NO:42"), found("42"));
        assert_eq!(r.apply("Adm No : -"), None);
    }

    #[test]
    fn name_stops_at_class_label() {
        let r = rule(Field::Name);
        assert_eq!(r.apply("Name : Asha Rao Class/sec : CS-A"), found("Asha Rao"));
        // Letters that the boundary label starts with are fine inside the value.
        assert_eq!(r.apply("Name : Chandra Cooper Class/sec : X"), found("Chandra Cooper"));
    }

    #[test]
    fn name_runs_to_end_without_terminator() {
        assert_eq!(rule(Field::Name).apply("Name : Asha Rao"), found("Asha Rao"));
    }

    #[test]
    fn empty_capture_falls_through_to_next_label() {
        let r = rule(Field::Name);
        assert_eq!(
            r.apply("Name : Class/sec : A Father's Name : Ramesh"),
            found("Ramesh")
        );
        assert_eq!(r.apply("Name :"), None);
    }

    #[test]
    fn branch_stops_at_father_label() {
        let r = rule(Field::Branch);
        assert_eq!(r.apply("Class/sec : CS-A Father's Name : R"), found("CS-A"));
        assert_eq!(r.apply("class/SEC: II PUC fathers name"), found("II PUC"));
    }

    #[test]
    fn father_name_variants() {
        let r = rule(Field::FatherName);
        assert_eq!(r.apply("Father's Name : Ramesh Rao DType: X"), found("Ramesh Rao"));
        assert_eq!(r.apply("Father Name: Ramesh DType"), found("Ramesh"));
        assert_eq!(r.apply("Father’s Name : Ramesh"), found("Ramesh"));
        assert_eq!(r.apply("Name : Asha"), None);
    }

    #[test]
    fn label_directly_after_colon_bounds_empty_capture() {
        let text = "Name :Class/sec : CS-A Father's Name : Ramesh Rao";
        // The empty student name falls through to the next `Name :` label.
        assert_eq!(rule(Field::Name).apply(text), found("Ramesh Rao"));
        assert_eq!(rule(Field::Branch).apply(text), found("CS-A"));
        assert_eq!(rule(Field::FatherName).apply(text), found("Ramesh Rao"));
        assert_eq!(rule(Field::Name).apply("Name :Class/sec : CS-A"), None);
    }

    #[test]
    fn labels_glued_to_previous_value() {
        let text = "Name : Asha RaoClass/sec : CS-AFather's Name : Ramesh RaoDType: X";
        assert_eq!(rule(Field::Name).apply(text), found("Asha Rao"));
        assert_eq!(rule(Field::Branch).apply(text), found("CS-A"));
        assert_eq!(rule(Field::FatherName).apply(text), found("Ramesh Rao"));
    }

    #[test]
    fn name_may_contain_class_as_a_word() {
        let r = rule(Field::Name);
        assert_eq!(r.apply("Name : Asha Classen Class/sec : X"), found("Asha Classen"));
    }

    #[test]
    fn transport_fee_parses_both_amounts() {
        let out = transport_fee_rule().apply("Transport Fees IInstallment 50 450.75 Total");
        assert_eq!(
            out,
            RuleOutcome::Found((Amount::parse("50").unwrap(), Amount::parse("450.75").unwrap()))
        );
    }

    #[test]
    fn transport_fee_absent() {
        let rule = transport_fee_rule();
        assert_eq!(rule.apply("Tuition Fees IInstallment 50 450"), RuleOutcome::Absent);
        assert_eq!(rule.apply("Transport Fees IIInstallment 50 450"), RuleOutcome::Absent);
        assert_eq!(rule.apply(""), RuleOutcome::Absent);
    }

    #[test]
    fn transport_fee_unparseable_amount_fails() {
        let text = format!("Transport Fees IInstallment 0 {}", "9".repeat(40));
        let out = transport_fee_rule().apply(&text);
        match out {
            RuleOutcome::Failed(reason) => assert!(reason.starts_with("Transport Fees")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
