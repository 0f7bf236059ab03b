//! Candidate record endpoints
//!
//! Records are addressed by position (`/api/data/:index`) or by their
//! `Record ID` (`/api/records/:record_id`). Every mutation reloads the full
//! table, changes it in memory and writes it back.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use talent_common::records::{assign_unique_record_id, find_by_record_id, merge_fields};
use talent_common::{CandidateRecord, Error};
use tracing::info;

use crate::error::ApiResult;
use crate::session::CurrentUser;
use crate::AppState;

/// GET /api/data response
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Vec<CandidateRecord>,
    pub is_admin: bool,
}

/// Plain mutation acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusResponse {
    fn success(message: &'static str) -> Json<Self> {
        Json(Self {
            status: "success",
            message,
        })
    }
}

/// POST /api/data response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub record_id: String,
}

fn no_record_at(index: usize) -> Error {
    Error::NotFound(format!("No record found at index {}", index))
}

fn no_record_with_id(record_id: &str) -> Error {
    Error::NotFound(format!("No record found with id {}", record_id))
}

/// GET /api/data
pub async fn list_records(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<DataResponse>> {
    let data = state.load_records().await?;

    Ok(Json(DataResponse {
        data,
        is_admin: user.is_admin,
    }))
}

/// POST /api/data
///
/// Appends the record as submitted; a fresh `Record ID` is assigned unless
/// the body carries one not already in use.
pub async fn add_record(
    State(state): State<AppState>,
    payload: Result<Json<CandidateRecord>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(mut record) = payload?;

    let record_id = state
        .modify_records(move |records| {
            let record_id = assign_unique_record_id(&mut record, records);
            records.push(record);
            Ok(record_id)
        })
        .await?;

    info!(record_id = %record_id, "Record added");
    Ok(Json(CreatedResponse {
        status: "success",
        message: "Data added successfully",
        record_id,
    }))
}

/// PUT /api/data/:index
///
/// Merges the submitted fields into the record at `index`. CTC fields that
/// look like integers are stored as numbers.
pub async fn update_record(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
    payload: Result<Json<CandidateRecord>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(index) = index?;
    let Json(fields) = payload?;

    state
        .modify_records(move |records| {
            let record = records.get_mut(index).ok_or_else(|| no_record_at(index))?;
            merge_fields(record, fields);
            Ok(())
        })
        .await?;

    info!(index, "Record updated");
    Ok(StatusResponse::success("Data updated successfully"))
}

/// DELETE /api/data/:index
///
/// Later records shift down by one position.
pub async fn delete_record(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(index) = index?;

    state
        .modify_records(move |records| {
            if index >= records.len() {
                return Err(no_record_at(index));
            }
            records.remove(index);
            Ok(())
        })
        .await?;

    info!(index, "Record deleted");
    Ok(StatusResponse::success("Data deleted successfully"))
}

/// PUT /api/records/:record_id
pub async fn update_record_by_id(
    State(state): State<AppState>,
    record_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<CandidateRecord>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(record_id) = record_id?;
    let Json(fields) = payload?;

    let id = record_id.clone();
    state
        .modify_records(move |records| {
            let index = find_by_record_id(records, &id).ok_or_else(|| no_record_with_id(&id))?;
            merge_fields(&mut records[index], fields);
            Ok(())
        })
        .await?;

    info!(record_id = %record_id, "Record updated");
    Ok(StatusResponse::success("Data updated successfully"))
}

/// DELETE /api/records/:record_id
pub async fn delete_record_by_id(
    State(state): State<AppState>,
    record_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(record_id) = record_id?;

    let id = record_id.clone();
    state
        .modify_records(move |records| {
            let index = find_by_record_id(records, &id).ok_or_else(|| no_record_with_id(&id))?;
            records.remove(index);
            Ok(())
        })
        .await?;

    info!(record_id = %record_id, "Record deleted");
    Ok(StatusResponse::success("Data deleted successfully"))
}
