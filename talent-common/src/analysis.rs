//! Aggregation engine over string-typed numeric fields
//!
//! Cells are text, so every statistic first filters to values that look like
//! a non-negative decimal numeral: ASCII digits with at most one `.`.
//! Anything else (empty, negative, exponent, currency symbols) is skipped.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::records::CandidateRecord;
use crate::{Error, Result};

/// Group key for records lacking the group field
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Statistics of one numeric field
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Average and count of one numeric field within a group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStat {
    pub field: String,
    pub avg: f64,
    pub count: usize,
}

/// One group produced by [`group_by`]
///
/// Serialises flat: `{<group field>: key, "<f>_avg": .., "<f>_count": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group_field: String,
    pub key: String,
    pub stats: Vec<GroupStat>,
}

impl Serialize for GroupSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.stats.len() * 2))?;
        map.serialize_entry(&self.group_field, &self.key)?;
        for stat in &self.stats {
            let avg_key = format!("{}_avg", stat.field);
            // Empty groups report integral zero
            if stat.count == 0 {
                map.serialize_entry(&avg_key, &0)?;
            } else {
                map.serialize_entry(&avg_key, &stat.avg)?;
            }
            map.serialize_entry(&format!("{}_count", stat.field), &stat.count)?;
        }
        map.end()
    }
}

/// Parse a non-negative decimal numeral
///
/// # Examples
///
/// ```
/// use talent_common::analysis::parse_numeric;
///
/// assert_eq!(parse_numeric("100"), Some(100.0));
/// assert_eq!(parse_numeric("1.5"), Some(1.5));
/// assert_eq!(parse_numeric("abc"), None);
/// assert_eq!(parse_numeric("-1"), None);
/// ```
pub fn parse_numeric(value: &str) -> Option<f64> {
    let mut seen_dot = false;
    let mut digits = 0usize;

    for c in value.chars() {
        match c {
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => digits += 1,
            _ => return None,
        }
    }

    if digits == 0 {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Parseable values of `field` across `records`
fn numeric_values<'a>(
    records: impl IntoIterator<Item = &'a CandidateRecord>,
    field: &str,
) -> Vec<f64> {
    records
        .into_iter()
        .filter_map(|r| r.get(field))
        .filter_map(|v| parse_numeric(&v.to_text()))
        .collect()
}

/// Mean, min, max and count per field
///
/// Fields without a single parseable value are omitted.
pub fn summarize(records: &[CandidateRecord], fields: &[&str]) -> BTreeMap<String, FieldSummary> {
    let mut summary = BTreeMap::new();

    for field in fields {
        let values = numeric_values(records, field);
        if values.is_empty() {
            continue;
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        summary.insert(
            field.to_string(),
            FieldSummary {
                mean: sum / count as f64,
                min,
                max,
                count,
            },
        );
    }

    summary
}

/// Per-group averages of `fields`, grouped by the text of `group_field`
///
/// Groups appear in first-occurrence order. The schema is inferred from the
/// first record: if it lacks `group_field` the call fails with
/// `ColumnNotFound`, even when later records have it.
pub fn group_by(
    records: &[CandidateRecord],
    group_field: &str,
    fields: &[&str],
) -> Result<Vec<GroupSummary>> {
    let first = records.first().ok_or(Error::MissingData)?;
    if !first.contains_key(group_field) {
        return Err(Error::ColumnNotFound(group_field.to_string()));
    }

    let mut keys: Vec<String> = Vec::new();
    let mut members: Vec<Vec<&CandidateRecord>> = Vec::new();

    for record in records {
        let key = record
            .get(group_field)
            .map(|v| v.to_text())
            .unwrap_or_else(|| UNKNOWN_GROUP.to_string());

        match keys.iter().position(|k| k == &key) {
            Some(idx) => members[idx].push(record),
            None => {
                keys.push(key);
                members.push(vec![record]);
            }
        }
    }

    Ok(keys
        .into_iter()
        .zip(members)
        .map(|(key, group)| {
            let stats = fields
                .iter()
                .map(|field| {
                    let values = numeric_values(group.iter().copied(), field);
                    let count = values.len();
                    let avg = if count == 0 {
                        0.0
                    } else {
                        values.iter().sum::<f64>() / count as f64
                    };
                    GroupStat {
                        field: field.to_string(),
                        avg,
                        count,
                    }
                })
                .collect();

            GroupSummary {
                group_field: group_field.to_string(),
                key,
                stats,
            }
        })
        .collect())
}
