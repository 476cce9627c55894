// 📦 Batch Validation - many (kind, value) rows in, entries + summary out
//
// CSV input carries a `kind,value` header. Unknown kinds do not abort the
// batch; they become rejected entries counted as unsupported.
// Raw values never reach the logs, only masked forms.

use crate::identifiers::{self, mask_input, IdKind};
use crate::validation::ValidationResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

// ============================================================================
// RECORDS
// ============================================================================

/// One input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub kind: String,
    pub value: String,
}

impl BatchRecord {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        BatchRecord {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// One validated row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// 1-based data row number (header excluded)
    pub line: usize,

    /// `None` when the row's kind was not recognized
    pub kind: Option<IdKind>,

    /// Masked value when the digit count matched, otherwise `None`
    pub masked: Option<String>,

    pub result: ValidationResult,
}

// ============================================================================
// LOADING
// ============================================================================

pub fn load_csv(csv_path: &Path) -> Result<Vec<BatchRecord>> {
    let rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let records = read_records(rdr)?;
    info!(path = %csv_path.display(), rows = records.len(), "loaded batch file");
    Ok(records)
}

pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<Vec<BatchRecord>> {
    read_records(csv::Reader::from_reader(reader))
}

fn read_records<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<BatchRecord>> {
    let mut records = Vec::new();

    for (idx, result) in rdr.deserialize().enumerate() {
        let record: BatchRecord =
            result.with_context(|| format!("Failed to deserialize row {}", idx + 1))?;
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// VALIDATION
// ============================================================================

pub fn validate_record(line: usize, record: &BatchRecord) -> BatchEntry {
    let kind = match record.kind.parse::<IdKind>() {
        Ok(kind) => kind,
        Err(err) => {
            warn!(line, kind = %record.kind, "unsupported identifier kind");
            return BatchEntry {
                line,
                kind: None,
                masked: None,
                result: ValidationResult::rejected(err.to_string()),
            };
        }
    };

    let result = identifiers::validate(kind, &record.value);
    let masked = mask_input(kind, &record.value).ok();

    debug!(
        line,
        kind = %kind,
        value = masked.as_deref().unwrap_or("-"),
        valid = result.is_valid,
        "validated row"
    );

    BatchEntry {
        line,
        kind: Some(kind),
        masked,
        result,
    }
}

pub fn validate_batch(records: &[BatchRecord]) -> Vec<BatchEntry> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| validate_record(idx + 1, record))
        .collect()
}

/// Write `line,kind,value,is_valid,message` rows; values are masked
pub fn write_csv<W: Write>(writer: W, entries: &[BatchEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["line", "kind", "value", "is_valid", "message"])?;

    for entry in entries {
        let line = entry.line.to_string();
        wtr.write_record([
            line.as_str(),
            entry.kind.map(|k| k.code()).unwrap_or(""),
            entry.masked.as_deref().unwrap_or(""),
            if entry.result.is_valid { "true" } else { "false" },
            entry.result.message.as_str(),
        ])?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

// ============================================================================
// BATCH SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub format_failures: usize,
    pub checksum_failures: usize,
    pub unsupported: usize,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = BatchSummary {
            total: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            if entry.kind.is_none() {
                summary.unsupported += 1;
            } else if entry.result.is_valid {
                summary.valid += 1;
            } else if entry.result.is_checksum_failure() {
                summary.checksum_failures += 1;
            } else {
                summary.format_failures += 1;
            }
        }

        summary
    }

    pub fn invalid(&self) -> usize {
        self.total - self.valid
    }

    pub fn valid_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.valid as f64 / self.total as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "{} identifiers: {} valid ({:.1}%) | {} format, {} checksum, {} unsupported",
            self.total,
            self.valid,
            self.valid_ratio() * 100.0,
            self.format_failures,
            self.checksum_failures,
            self.unsupported
        )
    }
}

/// Entries plus their summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn build(records: &[BatchRecord]) -> Self {
        let entries = validate_batch(records);
        let summary = BatchSummary::from_entries(&entries);
        BatchReport { entries, summary }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<BatchRecord> {
        vec![
            BatchRecord::new("brn", "123-45-67891"),
            BatchRecord::new("brn", "1234567890"),
            BatchRecord::new("rrn", "900101-1234568"),
            BatchRecord::new("crn", "110111-123"),
            BatchRecord::new("vat", "DE123456789"),
        ]
    }

    #[test]
    fn test_batch_summary_counts() {
        let report = BatchReport::build(&sample_records());
        let summary = &report.summary;

        assert_eq!(summary.total, 5);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.checksum_failures, 1);
        assert_eq!(summary.format_failures, 1);
        assert_eq!(summary.unsupported, 1);
        assert_eq!(summary.invalid(), 3);
        assert!(summary.summary().contains("5 identifiers"));
    }

    #[test]
    fn test_entries_keep_line_numbers_and_mask_values() {
        let entries = validate_batch(&sample_records());

        assert_eq!(entries[0].line, 1);
        assert_eq!(entries[0].masked.as_deref(), Some("123-45-*****"));
        assert_eq!(entries[2].masked.as_deref(), Some("900101-1******"));
        // Wrong digit count → nothing to mask
        assert_eq!(entries[3].masked, None);
    }

    #[test]
    fn test_unsupported_kind_entry() {
        let entry = validate_record(7, &BatchRecord::new("vat", "DE123456789"));

        assert_eq!(entry.line, 7);
        assert_eq!(entry.kind, None);
        assert!(!entry.result.is_valid);
        assert!(entry.result.message.contains("vat"));
        assert!(entry.result.message.starts_with("지원하지 않는 번호 종류입니다"));
    }

    #[test]
    fn test_empty_batch() {
        let report = BatchReport::build(&[]);
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.valid_ratio(), 0.0);
    }

    #[test]
    fn test_load_csv_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "kind,value").unwrap();
        writeln!(file, "brn,123-45-67891").unwrap();
        writeln!(file, "RRN,\"900101 1234568\"").unwrap();
        file.flush().unwrap();

        let records = load_csv(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind, "RRN");

        let report = BatchReport::build(&records);
        assert_eq!(report.summary.valid, 2);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/nonexistent/batch.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }

    #[test]
    fn test_load_csv_missing_column() {
        let err = load_csv_from_reader("kind\nbrn\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_write_csv_masks_values() {
        let entries = validate_batch(&sample_records());
        let mut out = Vec::new();
        write_csv(&mut out, &entries).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("line,kind,value,is_valid,message"));
        assert!(lines.next().unwrap().starts_with("1,brn,123-45-*****,true,"));
        assert!(!text.contains("67891"));
    }

    #[test]
    fn test_report_serializes() {
        let report = BatchReport::build(&sample_records()[..1]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["summary"]["valid"], 1);
        assert_eq!(json["entries"][0]["kind"], "brn");
        assert_eq!(json["entries"][0]["result"]["isValid"], true);
    }
}
