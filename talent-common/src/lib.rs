//! # Talent Common Library
//!
//! Core of the candidate tracker, shared by the HTTP server and its tests:
//! - Credential store (SQLite users table) and password hashing
//! - Record store (candidate spreadsheet) with column canonicalization
//! - Aggregation engine over CTC fields
//! - Configuration loading and error types

pub mod analysis;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod records;

pub use error::{Error, Result};
pub use records::{CandidateRecord, FieldValue, RecordStore};
