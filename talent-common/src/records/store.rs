//! Spreadsheet-backed candidate table
//!
//! Reads go through `calamine`; writes build a complete workbook with
//! `rust_xlsxwriter` and swap it in with a rename, so a failed save leaves
//! the previous file intact.
//!
//! No locking is done here. Callers that load, mutate and save must
//! serialise that sequence themselves.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::SubsecRound;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::ops::new_record_id;
use super::schema::{
    canonical_name, canonical_order, DATE_FORMAT, INITIAL_SCREENING_FIELD,
    LEGACY_INITIAL_REMARKS_FIELD, RECORD_ID_FIELD, SEED_HEADERS,
};
use super::seed::seed_records;
use super::value::{format_number, CandidateRecord, FieldValue};
use crate::{Error, Result};

/// Handle on the candidate spreadsheet
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    sheet_name: String,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the spreadsheet with canonical headers and demo records
    ///
    /// Returns `true` when a file was created.
    pub fn create_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        self.write_table(&canonical_order(&SEED_HEADERS), &seed_records())?;
        info!("Created sample spreadsheet: {}", self.path.display());
        Ok(true)
    }

    /// Header row as stored, legacy names unresolved
    pub fn headers(&self) -> Result<Vec<String>> {
        let (headers, _) = self.read_table()?;
        Ok(headers)
    }

    /// Load every candidate record, in row order
    ///
    /// Each record carries every header of the sheet; empty cells are empty
    /// text. `Initial Remarks` values surface as `Initial Screening`.
    pub fn load_all(&self) -> Result<Vec<CandidateRecord>> {
        self.create_if_missing()?;

        let (headers, rows) = self.read_table()?;
        let records: Vec<CandidateRecord> = rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|row| row_to_record(&headers, row))
            .collect();

        debug!(count = records.len(), "Loaded candidate records");
        Ok(records)
    }

    /// Overwrite the table with `records`, in the order given
    ///
    /// The header row is re-derived from the current headers on every call,
    /// so legacy or reordered files come back in canonical shape.
    pub fn save_all(&self, records: &[CandidateRecord]) -> Result<()> {
        let existing = if self.path.exists() {
            self.headers()?
        } else {
            SEED_HEADERS.iter().map(|h| h.to_string()).collect()
        };
        let ordered = canonical_order(&existing);

        self.write_table(&ordered, records)?;
        info!(count = records.len(), "Saved candidate records to {}", self.path.display());
        Ok(())
    }

    /// Read header row and cell text of every data row
    fn read_table(&self) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;

        let sheet = if workbook.sheet_names().iter().any(|s| s == &self.sheet_name) {
            self.sheet_name.clone()
        } else {
            let first = workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| Error::Internal(format!("No worksheets in {}", self.path.display())))?;
            warn!(
                "Worksheet '{}' not found in {}, reading '{}'",
                self.sheet_name,
                self.path.display(),
                first
            );
            first
        };

        let range = workbook.worksheet_range(&sheet)?;
        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(row) => row.iter().map(|cell| cell_text(cell).trim().to_string()).collect(),
            None => return Ok((Vec::new(), Vec::new())),
        };
        let data: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        Ok((headers, data))
    }

    /// Write a fresh workbook and atomically replace the target file
    fn write_table(&self, headers: &[String], records: &[CandidateRecord]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, column_index(col)?, header)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = u32::try_from(idx + 1)
                .map_err(|_| Error::Internal("Too many records for one worksheet".to_string()))?;

            for (col, header) in headers.iter().enumerate() {
                let col = column_index(col)?;
                match cell_value(record, header) {
                    FieldValue::Text(s) if s.is_empty() => {}
                    FieldValue::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    FieldValue::Integer(i) => {
                        worksheet.write_number(row, col, i as f64)?;
                    }
                    FieldValue::Number(n) => {
                        worksheet.write_number(row, col, n)?;
                    }
                }
            }
        }

        let buffer = workbook.save_to_buffer()?;
        self.replace_file(&buffer)
    }

    fn replace_file(&self, contents: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Internal("Too many columns for one worksheet".to_string()))
}

/// Value written under `header` for `record`
fn cell_value(record: &CandidateRecord, header: &str) -> FieldValue {
    let value = record.get(header).cloned().unwrap_or_default();

    if header == INITIAL_SCREENING_FIELD && value.is_empty() {
        return record
            .get(LEGACY_INITIAL_REMARKS_FIELD)
            .cloned()
            .unwrap_or_default();
    }
    if header == RECORD_ID_FIELD && value.is_empty() {
        return FieldValue::Text(new_record_id());
    }
    value
}

/// Build a record from one data row
fn row_to_record(headers: &[String], row: &[String]) -> CandidateRecord {
    let mut record = CandidateRecord::new();
    let mut legacy_remarks: Option<String> = None;

    for (idx, header) in headers.iter().enumerate() {
        if header.is_empty() {
            continue;
        }
        let value = row.get(idx).cloned().unwrap_or_default();

        if header == LEGACY_INITIAL_REMARKS_FIELD {
            legacy_remarks = Some(value);
            continue;
        }

        let name = canonical_name(header).to_string();
        match record.get(&name) {
            Some(existing) if !existing.is_empty() => {}
            _ => {
                record.insert(name, FieldValue::Text(value));
            }
        }
    }

    if let Some(legacy) = legacy_remarks {
        let screening_empty = record
            .get(INITIAL_SCREENING_FIELD)
            .map_or(true, FieldValue::is_empty);
        if screening_empty {
            record.insert(INITIAL_SCREENING_FIELD.to_string(), FieldValue::Text(legacy));
        }
    }

    record
}

/// Cell text as surfaced to clients
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.round_subsecs(0).format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| format_number(dt.as_f64())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_row_to_record_pads_short_rows() {
        let record = row_to_record(&headers(&["Date", "Name", "Email ID"]), &row(&["d", "Ann"]));

        assert_eq!(record["Name"], FieldValue::from("Ann"));
        assert_eq!(record["Email ID"], FieldValue::empty());
    }

    #[test]
    fn test_row_to_record_migrates_legacy_remarks() {
        let record = row_to_record(&headers(&["Date", "Initial Remarks"]), &row(&["d", "X"]));

        assert_eq!(record[INITIAL_SCREENING_FIELD], FieldValue::from("X"));
        assert!(!record.contains_key(LEGACY_INITIAL_REMARKS_FIELD));
    }

    #[test]
    fn test_row_to_record_prefers_current_screening_value() {
        let hdrs = headers(&["Initial Remarks", "Initial Screening"]);

        let both = row_to_record(&hdrs, &row(&["old", "new"]));
        assert_eq!(both[INITIAL_SCREENING_FIELD], FieldValue::from("new"));

        let legacy_only = row_to_record(&hdrs, &row(&["old", ""]));
        assert_eq!(legacy_only[INITIAL_SCREENING_FIELD], FieldValue::from("old"));
    }

    #[test]
    fn test_cell_value_falls_back_to_legacy_remarks() {
        let mut record = CandidateRecord::new();
        record.insert(LEGACY_INITIAL_REMARKS_FIELD.into(), "legacy".into());

        assert_eq!(cell_value(&record, INITIAL_SCREENING_FIELD), FieldValue::from("legacy"));
        assert_eq!(cell_value(&record, "Name"), FieldValue::empty());
    }

    #[test]
    fn test_cell_value_assigns_missing_record_id() {
        let record = CandidateRecord::new();
        assert!(!cell_value(&record, RECORD_ID_FIELD).is_empty());
    }

    #[test]
    fn test_cell_text_conversions() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(120000.0)), "120000");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Bool(true)), "True");
        assert_eq!(cell_text(&Data::String("x".into())), "x");
    }
}
