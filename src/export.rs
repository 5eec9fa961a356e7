use anyhow::Result;
use csv::WriterBuilder;
use tracing::debug;

use crate::models::Table;

/// Turns pipeline output into downloadable bytes.
pub trait ArtifactEncoder {
    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &str;

    fn encode_table(&self, table: &Table) -> Result<Vec<u8>>;

    fn encode_report(&self, report: &str) -> Result<Vec<u8>>;
}

/// UTF-8 CSV with a byte-order mark so spreadsheet tools detect Hebrew text.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvEncoder;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

impl ArtifactEncoder for CsvEncoder {
    fn extension(&self) -> &str {
        "csv"
    }

    fn encode_table(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(UTF8_BOM.to_vec());
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        let bytes = writer.into_inner().map_err(|err| err.into_error())?;
        debug!(rows = table.rows.len(), bytes = bytes.len(), "encoded table");
        Ok(bytes)
    }

    fn encode_report(&self, report: &str) -> Result<Vec<u8>> {
        Ok(report.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            headers: vec!["student_id".to_string(), "challenge_count".to_string()],
            rows: vec![
                vec!["3".to_string(), "2".to_string()],
                vec!["ללא שם".to_string(), "0".to_string()],
            ],
        }
    }

    #[test]
    fn table_starts_with_bom_and_header() {
        let bytes = CsvEncoder.encode_table(&table()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["student_id,challenge_count", "3,2", "ללא שם,0"]);
    }

    #[test]
    fn values_with_commas_are_quoted() {
        let table = Table {
            headers: vec!["Challenges".to_string()],
            rows: vec![vec!["שפה, חברתי".to_string()]],
        };
        let bytes = CsvEncoder.encode_table(&table).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.contains("\"שפה, חברתי\""));
    }

    #[test]
    fn report_is_plain_utf8() {
        let bytes = CsvEncoder.encode_report("דוח\n").unwrap();
        assert_eq!(bytes, "דוח\n".as_bytes());
        assert_eq!(CsvEncoder.extension(), "csv");
    }
}
