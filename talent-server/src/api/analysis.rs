//! Aggregate statistics over the CTC fields

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::collections::BTreeMap;
use talent_common::analysis::{group_by, summarize, FieldSummary, GroupSummary};
use talent_common::records::CTC_FIELDS;
use talent_common::Error;

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/analysis/summary
///
/// Mean, min, max and count per CTC field. Fields with no numeric values
/// are left out.
pub async fn get_summary(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<String, FieldSummary>>> {
    let records = state.load_records().await?;
    if records.is_empty() {
        return Err(Error::MissingData.into());
    }

    Ok(Json(summarize(&records, &CTC_FIELDS)))
}

/// GET /api/analysis/group/:column
pub async fn get_group_analysis(
    State(state): State<AppState>,
    column: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<GroupSummary>>> {
    let Path(column) = column?;
    let records = state.load_records().await?;

    Ok(Json(group_by(&records, &column, &CTC_FIELDS)?))
}
