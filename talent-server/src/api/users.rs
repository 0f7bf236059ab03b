//! Admin-only user management

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use talent_common::db::{self, UserSummary};
use tracing::debug;

use crate::error::ApiResult;
use crate::session::AdminUser;
use crate::AppState;

/// POST /api/users body
#[derive(Debug, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Mutation acknowledgement
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(db::list_users(&state.db).await?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(new_user) = payload?;

    let id = db::create_user(&state.db, &new_user.username, &new_user.password, new_user.is_admin).await?;
    debug!(id, created_by = %admin.username, "User created via API");

    Ok(Json(UserResponse {
        status: "success",
        message: "User added successfully",
    }))
}

/// DELETE /api/users/:id
///
/// An account never deletes itself, and the last admin is never deleted.
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Path(id) = id?;

    db::delete_user(&state.db, id, admin.user_id).await?;
    debug!(id, deleted_by = %admin.username, "User deleted via API");
    Ok(Json(UserResponse {
        status: "success",
        message: "User deleted successfully",
    }))
}
