//! Health check: credential database and spreadsheet status

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the credential database does not answer
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub database: bool,
    /// Whether the candidate spreadsheet exists on disk
    pub spreadsheet: bool,
}

/// GET /health, no session required
///
/// 503 when the credential database cannot be queried. A missing spreadsheet
/// is reported but is not a failure, since the next access recreates it.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check: credential database unavailable: {}", e);
            false
        }
    };
    let spreadsheet = state.records.path().is_file();

    let (code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            module: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
            spreadsheet,
        }),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
