use crate::challenges::Domain;
use crate::normalize::Field;

/// Placeholder shown for students whose identifier cell is empty.
pub const MISSING_ID_PLACEHOLDER: &str = "ללא שם";

/// A single cell from the survey export. Only empty cells are `Absent`;
/// whitespace is kept so the anonymity and baseline checks see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Present(String),
    Absent,
}

impl CellValue {
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Absent
        } else {
            CellValue::Present(raw.to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Present(value) => Some(value),
            CellValue::Absent => None,
        }
    }
}

static ABSENT: CellValue = CellValue::Absent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell at `row`/`column`, `Absent` for short rows.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&ABSENT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StudentId {
    Anonymous(String),
    Missing,
}

impl StudentId {
    pub fn from_cell(cell: &CellValue) -> Self {
        match cell.as_str() {
            Some(value) => StudentId::Anonymous(value.trim().to_string()),
            None => StudentId::Missing,
        }
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentId::Anonymous(id) => f.write_str(id),
            StudentId::Missing => f.write_str(MISSING_ID_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub id: StudentId,
    /// Normalized fields of the primary row plus `Strengths_Detail`.
    pub fields: Vec<(Field, CellValue)>,
    pub challenges: Vec<Domain>,
    pub challenge_count: usize,
}

impl StudentRecord {
    pub fn field(&self, field: Field) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value)
    }

    pub fn status(&self, domain: Domain) -> Option<&str> {
        self.field(domain.field()).and_then(CellValue::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCount {
    pub domain: Domain,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentChallengeCount {
    pub id: StudentId,
    pub challenge_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassSummary {
    /// Per-domain counts in first-appearance order.
    pub counts: Vec<DomainCount>,
    pub students: Vec<StudentChallengeCount>,
}

/// Plain tabular data handed to document encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
