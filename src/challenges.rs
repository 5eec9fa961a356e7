use crate::models::StudentRecord;
use crate::normalize::Field;

/// Status meaning "within the expected range for the age group".
pub const BASELINE_STATUS: &str = "תקין";

/// Survey domains that can raise a challenge. Declaration order is the
/// tracked order used for challenge lists and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    Language,
    Math,
    Emotional,
    Social,
    Behavioral,
    Attention,
    Sensory,
    Motivation,
}

impl Domain {
    pub const TRACKED: [Domain; 8] = [
        Domain::Language,
        Domain::Math,
        Domain::Emotional,
        Domain::Social,
        Domain::Behavioral,
        Domain::Attention,
        Domain::Sensory,
        Domain::Motivation,
    ];

    pub fn field(self) -> Field {
        match self {
            Domain::Language => Field::Language,
            Domain::Math => Field::Math,
            Domain::Emotional => Field::Emotional,
            Domain::Social => Field::Social,
            Domain::Behavioral => Field::Behavioral,
            Domain::Attention => Field::Attention,
            Domain::Sensory => Field::Sensory,
            Domain::Motivation => Field::Motivation,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Domain::Language => "שפה",
            Domain::Math => "מתמטיקה",
            Domain::Emotional => "רגשי",
            Domain::Social => "חברתי",
            Domain::Behavioral => "התנהגותי",
            Domain::Attention => "קשב",
            Domain::Sensory => "חושי/מוטורי",
            Domain::Motivation => "מוטיבציה",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn is_challenge(status: &str) -> bool {
    status.trim() != BASELINE_STATUS
}

/// Domains with a non-baseline status, in tracked order. Domains missing
/// from the export or left empty are skipped.
pub fn challenges_for(record: &StudentRecord) -> Vec<Domain> {
    Domain::TRACKED
        .iter()
        .copied()
        .filter(|domain| record.status(*domain).is_some_and(is_challenge))
        .collect()
}

pub fn extract(mut record: StudentRecord) -> StudentRecord {
    record.challenges = challenges_for(&record);
    record.challenge_count = record.challenges.len();
    record
}
