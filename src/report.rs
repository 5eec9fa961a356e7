use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CellValue, ClassSummary, StudentRecord, Table};
use crate::normalize::Field;
use crate::strategies::strategy_for;

pub const CLASS_REPORT_TITLE: &str = "דוח אתגרים כיתתי";
const STUDENTS_NOUN: &str = "תלמידים";

/// Header line plus one `<label>: <count> students` line per domain.
pub fn render_class_report(summary: &ClassSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{CLASS_REPORT_TITLE}");
    for entry in summary.ranked() {
        let _ = writeln!(
            output,
            "{}: {} {}",
            entry.domain.label(),
            entry.count,
            STUDENTS_NOUN
        );
    }
    output
}

pub fn manager_view(summary: &ClassSummary) -> Table {
    Table {
        headers: vec!["student_id".to_string(), "challenge_count".to_string()],
        rows: summary
            .students
            .iter()
            .map(|student| vec![student.id.to_string(), student.challenge_count.to_string()])
            .collect(),
    }
}

/// The normalized export with the derived challenge columns appended.
pub fn normalized_view(records: &[StudentRecord], columns: &[Field]) -> Table {
    let mut headers: Vec<String> = columns
        .iter()
        .map(|field| field.canonical().to_string())
        .collect();
    headers.push("Challenges".to_string());
    headers.push("Challenge_Count".to_string());

    let rows = records
        .iter()
        .map(|record| {
            let mut row: Vec<String> = columns
                .iter()
                .map(|field| match field {
                    Field::Name => record.id.to_string(),
                    other => record
                        .field(*other)
                        .and_then(CellValue::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect();
            row.push(
                record
                    .challenges
                    .iter()
                    .map(|domain| domain.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            row.push(record.challenge_count.to_string());
            row
        })
        .collect();

    Table { headers, rows }
}

pub fn render_student_plan(record: &StudentRecord, generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# תוכנית עבודה אישית - תלמיד {}", record.id);
    let _ = writeln!(output, "הופק בתאריך {generated_on}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## תחומי אתגר ({})", record.challenge_count);

    if record.challenges.is_empty() {
        let _ = writeln!(output, "לא זוהו תחומי אתגר.");
    } else {
        for domain in &record.challenges {
            let _ = writeln!(output);
            let _ = writeln!(output, "### {}", domain.label());
            for (context, suggestion) in strategy_for(*domain).contexts() {
                let _ = writeln!(output, "- {context}: {suggestion}");
            }
        }
    }

    let strengths = record
        .field(Field::StrengthsDetail)
        .and_then(CellValue::as_str)
        .filter(|text| !text.trim().is_empty());
    if let Some(strengths) = strengths {
        let _ = writeln!(output);
        let _ = writeln!(output, "## חוזקות");
        let _ = writeln!(output, "{}", strengths.trim());
    }

    let family = record
        .field(Field::Family)
        .and_then(CellValue::as_str)
        .filter(|text| !text.trim().is_empty());
    if let Some(family) = family {
        let _ = writeln!(output);
        let _ = writeln!(output, "## היבטים אישיים ומשפחתיים");
        let _ = writeln!(output, "{}", family.trim());
    }

    output
}

#[derive(Debug, Serialize)]
pub struct SummaryJson {
    pub students: usize,
    pub total_challenges: usize,
    pub domains: Vec<DomainJson>,
    pub per_student: Vec<StudentJson>,
}

#[derive(Debug, Serialize)]
pub struct DomainJson {
    pub domain: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StudentJson {
    pub student_id: String,
    pub challenge_count: usize,
}

pub fn summary_json(summary: &ClassSummary) -> SummaryJson {
    SummaryJson {
        students: summary.students.len(),
        total_challenges: summary.total_occurrences(),
        domains: summary
            .ranked()
            .into_iter()
            .map(|entry| DomainJson {
                domain: entry.domain.label(),
                count: entry.count,
            })
            .collect(),
        per_student: summary
            .students
            .iter()
            .map(|student| StudentJson {
                student_id: student.id.to_string(),
                challenge_count: student.challenge_count,
            })
            .collect(),
    }
}
