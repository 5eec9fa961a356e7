use tracing::{info, info_span};
use uuid::Uuid;

use crate::aggregate::summarize;
use crate::anonymity::{self, Clearance};
use crate::challenges::extract;
use crate::error::{PipelineError, PipelineWarning};
use crate::models::{ClassSummary, StudentRecord};
use crate::normalize::{normalize, Field};
use crate::{demux, ingest};

/// Everything one upload produces. Owned by the caller, nothing is shared
/// between runs.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub columns: Vec<Field>,
    pub records: Vec<StudentRecord>,
    pub summary: ClassSummary,
    pub clearance: Clearance,
    pub warnings: Vec<PipelineWarning>,
}

pub fn run(bytes: &[u8]) -> Result<RunOutcome, PipelineError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("run", %run_id);
    let _guard = span.enter();

    let raw = ingest::load(bytes)?;
    let (primary, detail) = demux::split(&raw)?;
    let normalized = normalize(&primary, &detail)?;

    let clearance = anonymity::check(normalized.ids())?;

    let mut warnings: Vec<PipelineWarning> = normalized.warning.into_iter().collect();
    if clearance.missing > 0 {
        warnings.push(PipelineWarning::MissingIdentifiers {
            count: clearance.missing,
        });
    }

    let records: Vec<StudentRecord> = normalized.records.into_iter().map(extract).collect();
    let summary = summarize(&records);

    info!(
        students = records.len(),
        challenges = summary.total_occurrences(),
        warnings = warnings.len(),
        "run complete"
    );

    Ok(RunOutcome {
        run_id,
        columns: normalized.columns,
        records,
        summary,
        clearance,
        warnings,
    })
}

impl RunOutcome {
    pub fn student(&self, id: &str) -> Option<&StudentRecord> {
        self.records
            .iter()
            .find(|record| record.id.to_string() == id.trim())
    }
}
