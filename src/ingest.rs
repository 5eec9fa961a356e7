use std::borrow::Cow;

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1255;
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::models::{CellValue, RawTable};

const UTF8_BOM: &str = "\u{feff}";

/// Decodes an upload as UTF-8, falling back to Windows-1255.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, PipelineError> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text.strip_prefix(UTF8_BOM).unwrap_or(text)));
    }

    warn!("upload is not valid UTF-8, retrying as windows-1255");
    WINDOWS_1255
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| {
            PipelineError::malformed("file is neither UTF-8 nor windows-1255 encoded text")
        })
}

/// Parses the survey export. The first line is a preamble written by the
/// survey tool, the header sits on the second line.
pub fn parse_table(text: &str) -> Result<RawTable, PipelineError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let mut next_record = |what: &str| -> Result<Option<csv::StringRecord>, PipelineError> {
        records
            .next()
            .transpose()
            .map_err(|err| PipelineError::malformed(format!("cannot parse {what} as CSV: {err}")))
    };

    if next_record("preamble")?.is_none() {
        return Err(PipelineError::malformed("file is empty"));
    }
    let header = next_record("header")?
        .ok_or_else(|| PipelineError::malformed("file has no header row"))?;

    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if name.is_empty() {
                format!("Unnamed: {index}")
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    while let Some(record) = next_record("data row")? {
        rows.push(record.iter().map(CellValue::from_raw).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed survey export");
    Ok(RawTable { headers, rows })
}

pub fn load(bytes: &[u8]) -> Result<RawTable, PipelineError> {
    let text = decode(bytes)?;
    parse_table(&text)
}
