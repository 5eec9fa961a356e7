use thiserror::Error;

use crate::anonymity::Violation;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The upload cannot be read as a paired survey export.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// At least one identifier looks like a real name.
    #[error(
        "הקובץ מכיל שמות אמיתיים. הכלי מקבל רק מספרי תלמידים (לצורך אנונימיות). {}",
        describe_violations(.violations)
    )]
    AnonymityViolation { violations: Vec<Violation> },
}

fn describe_violations(violations: &[Violation]) -> String {
    match violations.first() {
        Some(first) => format!(
            "{} suspicious identifier(s), first at student row {}: {}",
            violations.len(),
            first.row + 1,
            first.rule
        ),
        None => "suspicious identifiers found".to_string(),
    }
}

impl PipelineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        PipelineError::MalformedInput(reason.into())
    }

    /// Returns `true` if the run was refused to protect student identity.
    pub fn is_anonymity_violation(&self) -> bool {
        matches!(self, PipelineError::AnonymityViolation { .. })
    }
}

/// Conditions that do not stop a run but should be shown to the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    /// None of the tracked domain columns were recognised.
    SchemaMismatch { raw_columns: usize },
    /// Some students have no identifier at all.
    MissingIdentifiers { count: usize },
}

impl std::fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineWarning::SchemaMismatch { raw_columns } => write!(
                f,
                "none of the {raw_columns} columns match a known survey domain"
            ),
            PipelineWarning::MissingIdentifiers { count } => {
                write!(f, "{count} student(s) have no identifier")
            }
        }
    }
}
