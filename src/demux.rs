use crate::error::PipelineError;
use crate::models::RawTable;

/// Splits the export into its primary rows (even indices) and the detail
/// rows that follow each of them (odd indices).
pub fn split(raw: &RawTable) -> Result<(RawTable, RawTable), PipelineError> {
    if raw.rows.len() % 2 != 0 {
        return Err(PipelineError::malformed(format!(
            "expected a detail row after every student row, but the file has {} data rows",
            raw.rows.len()
        )));
    }

    let mut primary = Vec::with_capacity(raw.rows.len() / 2);
    let mut detail = Vec::with_capacity(raw.rows.len() / 2);
    for pair in raw.rows.chunks_exact(2) {
        primary.push(pair[0].clone());
        detail.push(pair[1].clone());
    }

    Ok((
        RawTable {
            headers: raw.headers.clone(),
            rows: primary,
        },
        RawTable {
            headers: raw.headers.clone(),
            rows: detail,
        },
    ))
}
