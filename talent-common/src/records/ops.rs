//! In-memory record mutations applied between load and save

use super::schema::{is_ctc_field, RECORD_ID_FIELD};
use super::value::{CandidateRecord, FieldValue};
use uuid::Uuid;

/// Fresh surrogate key
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Give `record` a record id unless it already has a non-empty one
pub fn ensure_record_id(record: &mut CandidateRecord) -> String {
    match record.get(RECORD_ID_FIELD) {
        Some(id) if !id.is_empty() => id.to_text(),
        _ => {
            let id = new_record_id();
            record.insert(RECORD_ID_FIELD.to_string(), FieldValue::Text(id.clone()));
            id
        }
    }
}

/// Prepare a client-supplied record for appending to `existing`
///
/// A missing id, or one already taken, is replaced with a fresh one.
pub fn assign_unique_record_id(record: &mut CandidateRecord, existing: &[CandidateRecord]) -> String {
    let taken = record
        .get(RECORD_ID_FIELD)
        .map(FieldValue::to_text)
        .filter(|id| !id.is_empty())
        .is_some_and(|id| find_by_record_id(existing, &id).is_some());
    if taken {
        record.remove(RECORD_ID_FIELD);
    }
    ensure_record_id(record)
}

/// Position of the record carrying `record_id`
pub fn find_by_record_id(records: &[CandidateRecord], record_id: &str) -> Option<usize> {
    records.iter().position(|r| {
        r.get(RECORD_ID_FIELD)
            .is_some_and(|id| id.to_text() == record_id)
    })
}

/// Merge `fields` into `record`
///
/// CTC fields are coerced to integers where they parse; values that do not
/// parse are stored unchanged. The record id is never overwritten.
pub fn merge_fields(record: &mut CandidateRecord, fields: CandidateRecord) {
    for (key, value) in fields {
        if key == RECORD_ID_FIELD {
            continue;
        }
        let value = if is_ctc_field(&key) {
            value.coerce_integer()
        } else {
            value
        };
        record.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> CandidateRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_merge_coerces_ctc_fields() {
        let mut target = record(&[("Name", "Jane"), ("Current CTC per Annum", "100")]);
        merge_fields(
            &mut target,
            record(&[("Current CTC per Annum", "120000"), ("Offered CTC", "abc")]),
        );

        assert_eq!(target["Current CTC per Annum"], FieldValue::Integer(120000));
        assert_eq!(target["Offered CTC"], FieldValue::from("abc"));
        assert_eq!(target["Name"], FieldValue::from("Jane"));
    }

    #[test]
    fn test_merge_leaves_non_ctc_numeric_text_alone() {
        let mut target = CandidateRecord::new();
        merge_fields(&mut target, record(&[("Contact Number", "9876543210")]));

        assert_eq!(target["Contact Number"], FieldValue::from("9876543210"));
    }

    #[test]
    fn test_merge_never_changes_record_id() {
        let mut target = record(&[("Record ID", "keep-me")]);
        merge_fields(&mut target, record(&[("Record ID", "other")]));

        assert_eq!(target["Record ID"], FieldValue::from("keep-me"));
    }

    #[test]
    fn test_ensure_record_id() {
        let mut with_id = record(&[("Record ID", "abc")]);
        assert_eq!(ensure_record_id(&mut with_id), "abc");

        let mut blank = record(&[("Record ID", "")]);
        let id = ensure_record_id(&mut blank);
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(blank["Record ID"].to_text(), id);
    }

    #[test]
    fn test_assign_unique_replaces_taken_id() {
        let existing = vec![record(&[("Record ID", "dup")])];

        let mut incoming = record(&[("Record ID", "dup")]);
        let id = assign_unique_record_id(&mut incoming, &existing);
        assert_ne!(id, "dup");

        let mut fresh = record(&[("Record ID", "unique")]);
        assert_eq!(assign_unique_record_id(&mut fresh, &existing), "unique");
    }

    #[test]
    fn test_find_by_record_id() {
        let records = vec![record(&[("Record ID", "a")]), record(&[("Record ID", "b")])];

        assert_eq!(find_by_record_id(&records, "b"), Some(1));
        assert_eq!(find_by_record_id(&records, "c"), None);
    }
}
