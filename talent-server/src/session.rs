//! Server-side login sessions
//!
//! A session is created on login and keyed by a random UUID carried in the
//! `talent_session` cookie. Sessions expire once idle for longer than the
//! configured lifetime and are purged on lookup.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use talent_common::db::AuthenticatedUser;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "talent_session";

/// One authenticated client
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
    pub last_seen: Instant,
}

/// Identity of the caller, resolved from its session
///
/// Extracting it fails with 401 unless the request passed the session
/// middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    #[serde(skip)]
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// A `CurrentUser` with the admin flag set; 403 otherwise
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

/// In-memory session table
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Idle lifetime of a session
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for `user`, returning its id
    pub async fn create(&self, user: &AuthenticatedUser) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            user_id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
            last_seen: Instant::now(),
        };

        self.sessions.write().await.insert(id, session);
        id
    }

    /// Look up a live session and mark it as seen
    pub async fn resolve(&self, id: Uuid) -> Option<CurrentUser> {
        let mut sessions = self.sessions.write().await;

        let expired = match sessions.get(&id) {
            Some(session) => session.last_seen.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            sessions.remove(&id);
            debug!(session = %id, "Session expired");
            return None;
        }

        let session = sessions.get_mut(&id)?;
        session.last_seen = Instant::now();
        Some(CurrentUser {
            user_id: session.user_id,
            username: session.username.clone(),
            is_admin: session.is_admin,
        })
    }

    /// End a session; returns whether it existed
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_seen.elapsed() < self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// `Set-Cookie` value carrying a new session id
pub fn session_cookie(id: Uuid, ttl: Duration) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME,
        id,
        ttl.as_secs()
    )
}

/// `Set-Cookie` value that clears the session cookie
pub fn expired_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE_NAME
    )
}

/// Session id from the `Cookie` header(s), if present and well-formed
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| {
            cookie
                .trim()
                .strip_prefix(SESSION_COOKIE_NAME)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .find_map(|value| Uuid::parse_str(value.trim()).ok())
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(talent_common::Error::Forbidden.into());
        }
        Ok(AdminUser(user))
    }
}
