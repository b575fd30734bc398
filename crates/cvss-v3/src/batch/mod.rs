//! Scores many vector strings at once from a CSV export.

mod parser;

use crate::scoring::{compute_all, CalculationReport, CvssError, Selections, Severity};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read vector file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vector CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} could not be scored: {reason}")]
    RejectedRow { row: usize, reason: String },
}

/// Fails on the first row that could not be scored.
pub fn ensure_all_scored(rows: &[BatchRow]) -> Result<(), BatchImportError> {
    match rows.iter().find(|row| !row.is_scored()) {
        Some(failed) => Err(BatchImportError::RejectedRow {
            row: failed.row,
            reason: failed.error.clone().unwrap_or_default(),
        }),
        None => Ok(()),
    }
}

/// Outcome for one CSV row; rows that fail to score carry the error instead of scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    /// 1-based data row number, excluding the header.
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub vector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<CalculationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchRow {
    pub fn overall_score(&self) -> Option<f64> {
        self.report.as_ref().map(|report| report.overall_score)
    }

    pub fn severity(&self) -> Option<Severity> {
        self.report.as_ref().map(|report| report.overall_severity)
    }

    pub fn is_scored(&self) -> bool {
        self.report.is_some()
    }
}

pub struct BatchScorer;

impl BatchScorer {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<BatchRow>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<BatchRow>, BatchImportError> {
        let records = parser::parse_records(reader)?;
        let mut rows = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;
            let outcome = score_vector(&record.vector);
            if let Err(err) = &outcome {
                warn!(row, vector = %record.vector, error = %err, "vector rejected");
            }

            let (report, error) = match outcome {
                Ok(report) => (Some(report), None),
                Err(err) => (None, Some(err.to_string())),
            };

            rows.push(BatchRow {
                row,
                id: record.id,
                vector: record.vector,
                report,
                error,
            });
        }

        let scored = rows.iter().filter(|row| row.is_scored()).count();
        info!(total = rows.len(), scored, "batch scoring finished");
        Ok(rows)
    }
}

fn score_vector(vector: &str) -> Result<CalculationReport, CvssError> {
    let selections = Selections::from_vector(vector)?;
    compute_all(&selections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn scores_rows_and_keeps_going_after_bad_vectors() {
        let csv = "id,vector\n\
CVE-1,AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H\n\
CVE-2,AV:N/AC:L/PR:N/UI:N/S:U\n\
CVE-3,AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H/E:U/RL:O/RC:U\n";
        let rows = BatchScorer::from_reader(Cursor::new(csv)).expect("csv parses");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].overall_score(), Some(9.8));
        assert_eq!(rows[0].severity(), Some(Severity::Critical));
        assert!(!rows[1].is_scored());
        assert!(rows[1]
            .error
            .as_deref()
            .is_some_and(|message| message.contains("malformed vector")));
        assert_eq!(rows[2].overall_score(), Some(7.8));
        assert_eq!(rows[2].id.as_deref(), Some("CVE-3"));
    }

    #[test]
    fn first_rejected_row_fails_the_whole_batch() {
        let csv = "vector\n\
AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H\n\
AV:Q/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H\n\
AV:N/AC:L\n";
        let rows = BatchScorer::from_reader(Cursor::new(csv)).expect("csv parses");

        match ensure_all_scored(&rows).expect_err("row 2 is rejected") {
            BatchImportError::RejectedRow { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("AV:Q"));
            }
            other => panic!("expected rejected row, got {other:?}"),
        }
        assert!(ensure_all_scored(&rows[..1]).is_ok());
    }

    #[test]
    fn id_column_is_optional() {
        let csv = "vector\nAV:P/AC:H/PR:H/UI:R/S:U/C:L/I:N/A:N\n";
        let rows = BatchScorer::from_reader(Cursor::new(csv)).expect("csv parses");
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].overall_score(), Some(1.6));
        assert_eq!(rows[0].severity(), Some(Severity::Low));
    }

    #[test]
    fn missing_vector_column_is_a_csv_error() {
        let csv = "id,score\nCVE-1,9.8\n";
        let err = BatchScorer::from_reader(Cursor::new(csv)).expect_err("no vector column");
        assert!(matches!(err, BatchImportError::Csv(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let err = BatchScorer::from_path("./does-not-exist.csv").expect_err("expected io error");
        match err {
            BatchImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
