use tracing::warn;

use crate::error::PipelineError;
use crate::models::StudentId;

pub const MAX_ID_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ContainsLetters,
    NonDigit,
    TooLong,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ContainsLetters => f.write_str("identifier contains letters"),
            Rule::NonDigit => f.write_str("identifier contains non-digit characters"),
            Rule::TooLong => write!(f, "identifier is longer than {MAX_ID_LEN} digits"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Zero-based student position in the export.
    pub row: usize,
    pub rule: Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clearance {
    pub anonymous: usize,
    pub missing: usize,
}

pub fn is_anonymous_id(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_digit())
        && value.chars().count() <= MAX_ID_LEN
}

/// Reports the first rule a failing identifier trips, `None` if it passes.
pub fn classify(value: &str) -> Option<Rule> {
    if is_anonymous_id(value) {
        return None;
    }
    let value = value.trim();
    if value.chars().any(char::is_alphabetic) {
        Some(Rule::ContainsLetters)
    } else if !value.chars().all(|c| c.is_ascii_digit()) || value.is_empty() {
        Some(Rule::NonDigit)
    } else {
        Some(Rule::TooLong)
    }
}

pub fn check<'a>(
    ids: impl IntoIterator<Item = &'a StudentId>,
) -> Result<Clearance, PipelineError> {
    let mut clearance = Clearance::default();
    let mut violations = Vec::new();

    for (row, id) in ids.into_iter().enumerate() {
        match id {
            StudentId::Missing => clearance.missing += 1,
            StudentId::Anonymous(value) => match classify(value) {
                None => clearance.anonymous += 1,
                Some(rule) => violations.push(Violation { row, rule }),
            },
        }
    }

    if !violations.is_empty() {
        warn!(
            violations = violations.len(),
            first_row = violations[0].row + 1,
            rule = %violations[0].rule,
            "rejecting upload, identifiers look like real names"
        );
        return Err(PipelineError::AnonymityViolation { violations });
    }

    if clearance.missing > 0 {
        warn!(missing = clearance.missing, "students without identifier");
    }
    Ok(clearance)
}
