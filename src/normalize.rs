use tracing::{debug, warn};

use crate::challenges::Domain;
use crate::error::{PipelineError, PipelineWarning};
use crate::models::{CellValue, RawTable, StudentId, StudentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Language,
    Math,
    Motivation,
    Emotional,
    Behavioral,
    Social,
    Attention,
    Sensory,
    StrengthsBool,
    Family,
    StrengthsDetail,
}

impl Field {
    pub fn canonical(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Language => "Language",
            Field::Math => "Math",
            Field::Motivation => "Motivation",
            Field::Emotional => "Emotional",
            Field::Behavioral => "Behavioral",
            Field::Social => "Social",
            Field::Attention => "Attention",
            Field::Sensory => "Sensory",
            Field::StrengthsBool => "Strengths_Bool",
            Field::Family => "Family",
            Field::StrengthsDetail => "Strengths_Detail",
        }
    }
}

/// Header the survey tool gives the blank identifier column.
pub const ID_COLUMN: &str = "Unnamed: 0";

pub const STRENGTHS_COLUMN: &str = "התלמיד מגלה עניין ו/או חוזקות בתחום ייחודי אחד או יותר";

pub const KNOWN_COLUMNS: &[(&str, Field)] = &[
    (ID_COLUMN, Field::Name),
    (
        "שליטה במיומנויות השפה (דבורה וכתובה) בהתאם למצופה מבני הגיל",
        Field::Language,
    ),
    ("שליטה במתמטיקה בהתאם למצופה מבני הגיל", Field::Math),
    (
        "מוטיבציה והרגלי למידה בהתאם למצופה מבני הגיל",
        Field::Motivation,
    ),
    ("היבטים רגשיים בהתאם למצופה מבני הגיל", Field::Emotional),
    ("היבטים התנהגותיים בהתאם למצופה מבני הגיל", Field::Behavioral),
    ("היבטים חברתיים בהתאם למצופה מבני הגיל", Field::Social),
    (
        "תפקודי קשב ופעלתנות יתר בהתאם למצופה מבני הגיל",
        Field::Attention,
    ),
    (
        "תפקוד חושי - תנועתי - מרחבי בהתאם למצופה מבני הגיל",
        Field::Sensory,
    ),
    (STRENGTHS_COLUMN, Field::StrengthsBool),
    (
        "היבטים אישיים ו/או משפחתיים שיש לתת עליהם את הדעת",
        Field::Family,
    ),
];

#[derive(Debug, Clone)]
pub struct Normalized {
    /// Canonical columns in the order they appear in the export.
    pub columns: Vec<Field>,
    pub records: Vec<StudentRecord>,
    pub warning: Option<PipelineWarning>,
}

impl Normalized {
    pub fn ids(&self) -> Vec<&StudentId> {
        self.records.iter().map(|record| &record.id).collect()
    }
}

/// Builds one record per primary/detail pair, keeping only recognised columns.
/// Student rows without an identifier column cannot be checked for names and
/// are refused.
pub fn normalize(
    primary: &RawTable,
    detail: &RawTable,
) -> Result<Normalized, PipelineError> {
    let mut matched: Vec<(usize, Field)> = Vec::new();
    for (index, header) in primary.headers.iter().enumerate() {
        let known = KNOWN_COLUMNS
            .iter()
            .find(|(label, _)| *label == header.as_str())
            .map(|(_, field)| *field);
        // first occurrence wins on duplicated headers
        if let Some(field) = known {
            if !matched.iter().any(|(_, seen)| *seen == field) {
                matched.push((index, field));
            }
        }
    }

    if !primary.rows.is_empty() && !matched.iter().any(|(_, field)| *field == Field::Name) {
        return Err(PipelineError::malformed(format!(
            "no identifier column: the first header must be blank, found {:?}",
            primary.headers.first().map(String::as_str).unwrap_or_default()
        )));
    }

    let strengths_detail = detail.column_index(STRENGTHS_COLUMN);

    let mut columns: Vec<Field> = matched.iter().map(|(_, field)| *field).collect();
    if strengths_detail.is_some() {
        columns.push(Field::StrengthsDetail);
    }

    let records = (0..primary.rows.len())
        .map(|row| {
            let mut fields: Vec<(Field, CellValue)> = matched
                .iter()
                .map(|(index, field)| (*field, primary.cell(row, *index).clone()))
                .collect();
            if let Some(index) = strengths_detail {
                fields.push((Field::StrengthsDetail, detail.cell(row, index).clone()));
            }

            let id = fields
                .iter()
                .find(|(field, _)| *field == Field::Name)
                .map(|(_, cell)| StudentId::from_cell(cell))
                .unwrap_or(StudentId::Missing);

            StudentRecord {
                id,
                fields,
                challenges: Vec::new(),
                challenge_count: 0,
            }
        })
        .collect();

    let recognised_domains = Domain::TRACKED
        .iter()
        .filter(|domain| columns.contains(&domain.field()))
        .count();
    let warning = if recognised_domains == 0 {
        warn!(
            raw_columns = primary.headers.len(),
            "no known survey domain columns in export"
        );
        Some(PipelineWarning::SchemaMismatch {
            raw_columns: primary.headers.len(),
        })
    } else {
        None
    };

    debug!(
        columns = columns.len(),
        domains = recognised_domains,
        "normalized survey columns"
    );

    Ok(Normalized {
        columns,
        records,
        warning,
    })
}
