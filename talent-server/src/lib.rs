//! talent-server library - HTTP API for the candidate tracker
//!
//! Public routes: health, login, logout. Everything under `/api` requires a
//! session; user management additionally requires an admin session.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use talent_common::config::AppConfig;
use talent_common::{CandidateRecord, RecordStore};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod session;

pub use error::{ApiError, ApiResult};
pub use session::{AdminUser, CurrentUser, SessionStore};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential database pool
    pub db: SqlitePool,
    /// Candidate spreadsheet
    pub records: RecordStore,
    /// Active login sessions
    pub sessions: SessionStore,
    /// Serialises load-mutate-save cycles on the spreadsheet
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: SqlitePool, records: RecordStore, session_ttl: Duration) -> Self {
        Self {
            db,
            records,
            sessions: SessionStore::new(session_ttl),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// State for the files and session lifetime named by `config`
    pub fn from_config(db: SqlitePool, config: &AppConfig) -> Self {
        let records = RecordStore::new(&config.data_file, &config.sheet_name);
        Self::new(db, records, config.session_ttl)
    }

    /// Load every record on the blocking pool
    ///
    /// Takes the write lock, since loading recreates a missing spreadsheet.
    pub async fn load_records(&self) -> ApiResult<Vec<CandidateRecord>> {
        let _guard = self.write_lock.lock().await;
        let store = self.records.clone();
        let records = tokio::task::spawn_blocking(move || store.load_all()).await??;
        Ok(records)
    }

    /// Load, apply `mutate`, and save, holding the write lock throughout
    ///
    /// Nothing is written when `mutate` fails.
    pub async fn modify_records<T, F>(&self, mutate: F) -> ApiResult<T>
    where
        F: FnOnce(&mut Vec<CandidateRecord>) -> talent_common::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let store = self.records.clone();

        let value = tokio::task::spawn_blocking(move || {
            let mut records = store.load_all()?;
            let value = mutate(&mut records)?;
            store.save_all(&records)?;
            Ok::<_, talent_common::Error>(value)
        })
        .await??;

        Ok(value)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, put};

    // Protected routes (require a session)
    let protected = Router::new()
        .route("/api/session", get(api::current_session))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/data", get(api::list_records).post(api::add_record))
        .route(
            "/api/data/:index",
            put(api::update_record).delete(api::delete_record),
        )
        .route(
            "/api/records/:record_id",
            put(api::update_record_by_id).delete(api::delete_record_by_id),
        )
        .route("/api/analysis/summary", get(api::get_summary))
        .route("/api/analysis/group/:column", get(api::get_group_analysis))
        .route("/api/dropdown-options", get(api::get_dropdown_options))
        .route("/api/users", get(api::list_users).post(api::create_user))
        .route("/api/users/:id", delete(api::delete_user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_session,
        ));

    // Public routes (no session)
    let public = Router::new()
        .route("/login", axum::routing::post(api::login))
        .route("/logout", get(api::logout))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
