//! Column schema of the candidate spreadsheet
//!
//! The header row is derived on every save, never taken from the client:
//!
//! 1. `Date`
//! 2. Desired fields already present in the file, in desired order
//! 3. Every other existing header, in file order
//! 4. Desired fields still missing (created empty)
//! 5. `Reference`, then `Record ID`, if still missing
//!
//! The legacy `Initial Remarks` header is folded into `Initial Screening`
//! and never written back.

pub const DATE_FIELD: &str = "Date";
pub const INITIAL_SCREENING_FIELD: &str = "Initial Screening";
pub const LEGACY_INITIAL_REMARKS_FIELD: &str = "Initial Remarks";
pub const REFERENCE_FIELD: &str = "Reference";

/// Durable surrogate key assigned to every record
pub const RECORD_ID_FIELD: &str = "Record ID";

/// Textual format of temporal cells
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compensation fields: numeric semantics, coerced to integers on update
pub const CTC_FIELDS: [&str; 3] = [
    "Current CTC per Annum",
    "Expected CTC per Annum",
    "Offered CTC",
];

/// Fixed column sequence following `Date`
pub const DESIRED_FIELDS: [&str; 30] = [
    "Name",
    "Email ID",
    "Contact Number",
    "Interested Position",
    "Current Role",
    "Current Organization",
    "Current Location",
    "Current CTC per Annum",
    "Expected CTC per Annum",
    "Total Years of Experience",
    "Notice Period",
    "Interview Status",
    "Application Status",
    "Referred By",
    "Comments",
    "In Notice",
    "Immediate Joiner",
    "Offers in Hand",
    "Offered CTC",
    "Location Preference",
    "Certifications",
    "Resume",
    "LinkedIn Profile",
    // Stage-specific remarks
    "Initial Screening",
    "Round 1 Remarks",
    "Round 2 Remarks",
    // General remarks
    "Remarks",
    "Reject Mail Sent",
    "Final Remarks",
    "Month Count",
];

/// Header row of a freshly created spreadsheet
pub const SEED_HEADERS: [&str; 33] = [
    "Date",
    "Name",
    "Email ID",
    "Contact Number",
    "Interested Position",
    "Current Role",
    "Current Organization",
    "Current Location",
    "Current CTC per Annum",
    "Expected CTC per Annum",
    "Total Years of Experience",
    "Notice Period",
    "In Notice",
    "Immediate Joiner",
    "Offers in Hand",
    "Offered CTC",
    "Location Preference",
    "Certifications",
    "Resume",
    "LinkedIn Profile",
    "Comments",
    "Referred By",
    "Interview Status",
    "Application Status",
    "Initial Screening",
    "Round 1 Remarks",
    "Round 2 Remarks",
    "Remarks",
    "Reject Mail Sent",
    "Final Remarks",
    "Month Count",
    "Reference",
    "Record ID",
];

/// Canonical header name (legacy aliases resolved)
pub fn canonical_name(header: &str) -> &str {
    if header == LEGACY_INITIAL_REMARKS_FIELD {
        INITIAL_SCREENING_FIELD
    } else {
        header
    }
}

pub fn is_ctc_field(field: &str) -> bool {
    CTC_FIELDS.contains(&field)
}

/// Derive the canonical column order from the headers currently in the file
pub fn canonical_order<S: AsRef<str>>(existing_headers: &[S]) -> Vec<String> {
    let existing: Vec<&str> = existing_headers
        .iter()
        .map(|h| h.as_ref().trim())
        .filter(|h| !h.is_empty())
        .map(canonical_name)
        .collect();

    fn push(ordered: &mut Vec<String>, header: &str) {
        if !ordered.iter().any(|h| h == header) {
            ordered.push(header.to_string());
        }
    }

    let mut ordered: Vec<String> = Vec::with_capacity(existing.len() + DESIRED_FIELDS.len() + 3);

    push(&mut ordered, DATE_FIELD);

    for field in DESIRED_FIELDS {
        if existing.contains(&field) {
            push(&mut ordered, field);
        }
    }

    // Headers outside the desired sequence are preserved, never dropped
    for header in &existing {
        push(&mut ordered, header);
    }

    for field in DESIRED_FIELDS {
        push(&mut ordered, field);
    }

    push(&mut ordered, REFERENCE_FIELD);
    push(&mut ordered, RECORD_ID_FIELD);

    ordered
}
