//! Record store tests against temporary spreadsheet files
//!
//! Covers first-run seeding, canonical header order on save, the
//! "Initial Remarks" migration, preservation of unknown columns, numeric
//! cells for coerced CTC values, date cells and positional deletes.

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;
use tempfile::TempDir;
use talent_common::records::schema::{
    DATE_FIELD, INITIAL_SCREENING_FIELD, LEGACY_INITIAL_REMARKS_FIELD, RECORD_ID_FIELD,
};
use talent_common::records::{merge_fields, CandidateRecord, FieldValue, RecordStore, DESIRED_FIELDS};

const SHEET: &str = "Candidates";

fn setup_store() -> (TempDir, RecordStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("data.xlsx"), SHEET);
    (temp_dir, store)
}

/// Write a raw sheet (header row + text rows) the way an older deployment might have
fn write_raw_sheet(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET).unwrap();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Raw cells of the sheet, for assertions below the record level
fn read_raw_sheet(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(SHEET).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

fn text(record: &CandidateRecord, field: &str) -> String {
    record.get(field).map(FieldValue::to_text).unwrap_or_default()
}

#[test]
fn test_create_if_missing_seeds_demo_records() {
    let (_dir, store) = setup_store();

    assert!(store.create_if_missing().unwrap());
    assert!(!store.create_if_missing().unwrap());

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(text(&records[0], "Name"), "John Doe");
    assert_eq!(text(&records[1], "Name"), "Jane Smith");
    // Third seed record carries no name
    assert_eq!(text(&records[2], "Name"), "");
    assert_eq!(text(&records[2], "Email ID"), "sam.wilson@example.com");

    for record in &records {
        assert!(!text(record, RECORD_ID_FIELD).is_empty());
        assert!(!text(record, DATE_FIELD).is_empty());
    }
}

#[test]
fn test_date_cells_load_as_text_and_survive_save() {
    let (_dir, store) = setup_store();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET).unwrap();
    worksheet.write_string(0, 0, "Date").unwrap();
    worksheet.write_string(0, 1, "Name").unwrap();
    let format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let when = ExcelDateTime::from_ymd(2024, 1, 2)
        .unwrap()
        .and_hms(3, 4, 5)
        .unwrap();
    worksheet
        .write_datetime_with_format(1, 0, &when, &format)
        .unwrap();
    worksheet.write_string(1, 1, "Ann").unwrap();
    workbook.save(store.path()).unwrap();

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(text(&records[0], DATE_FIELD), "2024-01-02 03:04:05");

    store.save_all(&records).unwrap();
    let reloaded = store.load_all().unwrap();
    assert_eq!(text(&reloaded[0], DATE_FIELD), "2024-01-02 03:04:05");
    assert_eq!(text(&reloaded[0], "Name"), "Ann");
}

#[test]
fn test_load_all_creates_missing_file() {
    let (_dir, store) = setup_store();

    let records = store.load_all().unwrap();

    assert!(store.path().exists());
    assert_eq!(records.len(), 3);
}

#[test]
fn test_save_load_is_fixed_point() {
    let (_dir, store) = setup_store();
    store.create_if_missing().unwrap();

    store.save_all(&store.load_all().unwrap()).unwrap();
    let headers_once = store.headers().unwrap();
    let records_once = store.load_all().unwrap();

    store.save_all(&records_once).unwrap();
    let headers_twice = store.headers().unwrap();
    let records_twice = store.load_all().unwrap();

    assert_eq!(headers_once, headers_twice);
    assert_eq!(records_once, records_twice);
}

#[test]
fn test_saved_headers_contain_desired_fields_with_date_first() {
    let (_dir, store) = setup_store();

    let mut record = CandidateRecord::new();
    record.insert("Name".into(), "Solo".into());
    store.save_all(&[record]).unwrap();

    let headers = store.headers().unwrap();
    assert_eq!(headers[0], DATE_FIELD);
    for field in DESIRED_FIELDS {
        assert!(headers.iter().any(|h| h == field), "missing column {}", field);
    }
    assert!(headers.iter().any(|h| h == "Reference"));
}

#[test]
fn test_reordered_headers_are_canonicalized_on_save() {
    let (_dir, store) = setup_store();
    write_raw_sheet(
        store.path(),
        &[
            &["Name", "Reference", "Date", "Email ID"],
            &["Ann", "Ref", "2024-01-01 00:00:00", "ann@example.com"],
        ],
    );

    let records = store.load_all().unwrap();
    store.save_all(&records).unwrap();

    let headers = store.headers().unwrap();
    assert_eq!(&headers[..3], &["Date", "Name", "Email ID"]);

    let reloaded = store.load_all().unwrap();
    assert_eq!(text(&reloaded[0], "Name"), "Ann");
    assert_eq!(text(&reloaded[0], "Reference"), "Ref");
    assert_eq!(text(&reloaded[0], "Email ID"), "ann@example.com");
    assert_eq!(text(&reloaded[0], "Date"), "2024-01-01 00:00:00");
}

#[test]
fn test_legacy_initial_remarks_migrates() {
    let (_dir, store) = setup_store();
    write_raw_sheet(
        store.path(),
        &[
            &["Date", "Name", "Initial Remarks"],
            &["2024-01-01 00:00:00", "Ann", "X"],
        ],
    );

    let records = store.load_all().unwrap();
    assert_eq!(text(&records[0], INITIAL_SCREENING_FIELD), "X");
    assert!(!records[0].contains_key(LEGACY_INITIAL_REMARKS_FIELD));

    store.save_all(&records).unwrap();

    let headers = store.headers().unwrap();
    assert!(!headers.iter().any(|h| h == LEGACY_INITIAL_REMARKS_FIELD));

    let reloaded = store.load_all().unwrap();
    assert_eq!(text(&reloaded[0], INITIAL_SCREENING_FIELD), "X");
    assert!(!reloaded[0].contains_key(LEGACY_INITIAL_REMARKS_FIELD));
}

#[test]
fn test_legacy_remarks_key_in_record_fills_screening_column() {
    let (_dir, store) = setup_store();

    let mut record = CandidateRecord::new();
    record.insert(LEGACY_INITIAL_REMARKS_FIELD.into(), "from client".into());
    store.save_all(&[record]).unwrap();

    let reloaded = store.load_all().unwrap();
    assert_eq!(text(&reloaded[0], INITIAL_SCREENING_FIELD), "from client");
}

#[test]
fn test_unknown_columns_preserved() {
    let (_dir, store) = setup_store();
    write_raw_sheet(
        store.path(),
        &[&["Date", "Name", "Hobby"], &["", "Ann", "Chess"]],
    );

    let records = store.load_all().unwrap();
    store.save_all(&records).unwrap();

    assert!(store.headers().unwrap().iter().any(|h| h == "Hobby"));
    assert_eq!(text(&store.load_all().unwrap()[0], "Hobby"), "Chess");
}

#[test]
fn test_coerced_ctc_written_as_number() {
    let (_dir, store) = setup_store();
    let mut records = store.load_all().unwrap();

    let mut update = CandidateRecord::new();
    update.insert("Current CTC per Annum".into(), "120000".into());
    merge_fields(&mut records[0], update);
    assert_eq!(records[0]["Current CTC per Annum"], FieldValue::Integer(120000));

    store.save_all(&records).unwrap();

    let raw = read_raw_sheet(store.path());
    let col = raw[0]
        .iter()
        .position(|h| matches!(h, Data::String(s) if s == "Current CTC per Annum"))
        .unwrap();
    assert!(matches!(
        raw[1][col],
        Data::Float(f) if f == 120000.0
    ) || matches!(raw[1][col], Data::Int(120000)));

    assert_eq!(text(&store.load_all().unwrap()[0], "Current CTC per Annum"), "120000");
}

#[test]
fn test_uncoercible_ctc_kept_as_text() {
    let (_dir, store) = setup_store();
    let mut records = store.load_all().unwrap();

    let mut update = CandidateRecord::new();
    update.insert("Current CTC per Annum".into(), "abc".into());
    merge_fields(&mut records[0], update);
    store.save_all(&records).unwrap();

    assert_eq!(text(&store.load_all().unwrap()[0], "Current CTC per Annum"), "abc");
}

#[test]
fn test_delete_shifts_positions() {
    let (_dir, store) = setup_store();
    let mut records = store.load_all().unwrap();

    records.remove(0);
    store.save_all(&records).unwrap();

    let reloaded = store.load_all().unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(text(&reloaded[0], "Name"), "Jane Smith");
}

#[test]
fn test_record_ids_assigned_once_and_stable() {
    let (_dir, store) = setup_store();
    write_raw_sheet(store.path(), &[&["Date", "Name"], &["", "Ann"], &["", "Bob"]]);

    store.save_all(&store.load_all().unwrap()).unwrap();
    let first: Vec<String> = store
        .load_all()
        .unwrap()
        .iter()
        .map(|r| text(r, RECORD_ID_FIELD))
        .collect();

    store.save_all(&store.load_all().unwrap()).unwrap();
    let second: Vec<String> = store
        .load_all()
        .unwrap()
        .iter()
        .map(|r| text(r, RECORD_ID_FIELD))
        .collect();

    assert!(first.iter().all(|id| !id.is_empty()));
    assert_ne!(first[0], first[1]);
    assert_eq!(first, second);
}

#[test]
fn test_records_saved_in_given_order() {
    let (_dir, store) = setup_store();
    let mut records = store.load_all().unwrap();

    records.reverse();
    store.save_all(&records).unwrap();

    let names: Vec<String> = store
        .load_all()
        .unwrap()
        .iter()
        .map(|r| text(r, "Email ID"))
        .collect();
    assert_eq!(
        names,
        vec![
            "sam.wilson@example.com",
            "jane.smith@example.com",
            "john.doe@example.com"
        ]
    );
}
