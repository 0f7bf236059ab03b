//! Login, logout and the session gate for `/api` routes

use axum::{
    extract::{rejection::FormRejection, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use talent_common::db;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::session::{expired_session_cookie, session_cookie, session_id_from_headers, CurrentUser};
use crate::AppState;

/// Login form data
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub username: String,
    pub is_admin: bool,
}

/// POST /login
///
/// Form-encoded `username` and `password`. On success the session cookie is
/// set; wrong username and wrong password fail identically.
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Response> {
    let Form(form) = form?;

    let user = db::authenticate(&state.db, &form.username, &form.password).await?;
    let session_id = state.sessions.create(&user).await;
    info!(username = %user.username, is_admin = user.is_admin, "User logged in");

    let cookie = session_cookie(session_id, state.sessions.ttl());
    let body = Json(LoginResponse {
        status: "success",
        username: user.username,
        is_admin: user.is_admin,
    });

    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

/// GET /logout
///
/// Always succeeds; an unknown or missing session is simply cleared.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id_from_headers(&headers) {
        if state.sessions.remove(id).await {
            debug!(session = %id, "Session closed");
        }
    }

    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(json!({"status": "success", "message": "Logged out"})),
    )
        .into_response()
}

/// GET /api/session
pub async fn current_session(user: CurrentUser) -> Json<CurrentUser> {
    Json(user)
}

/// Session middleware for protected routes
///
/// Resolves the session cookie and makes the caller available to handlers
/// as a `CurrentUser` request extension. Returns 401 if there is no live
/// session.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = session_id_from_headers(request.headers()).ok_or(ApiError::Unauthenticated)?;
    let user = state
        .sessions
        .resolve(session_id)
        .await
        .ok_or(ApiError::Unauthenticated)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
