//! Record store: candidate records persisted in a spreadsheet
//!
//! The whole table is loaded, mutated in memory and written back on every
//! change. Position in the loaded sequence addresses a record; the
//! `Record ID` column is a durable alternative that survives deletes.

pub mod ops;
pub mod schema;
mod seed;
pub mod store;
pub mod value;

pub use ops::{assign_unique_record_id, ensure_record_id, find_by_record_id, merge_fields};
pub use schema::{canonical_order, CTC_FIELDS, DESIRED_FIELDS};
pub use seed::seed_records;
pub use store::RecordStore;
pub use value::{CandidateRecord, FieldValue};
