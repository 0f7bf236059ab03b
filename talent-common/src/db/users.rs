//! User accounts: lookup, authentication, listing, creation and deletion
//!
//! Two invariants are enforced at delete time: an account never deletes
//! itself, and the last remaining admin account is never deleted.

use crate::auth::{generate_salt, hash_password, verify_password};
use crate::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::init::create_users_table;

/// Stored credentials for one account
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub id: i64,
    pub password_hash: String,
    pub password_salt: String,
    pub is_admin: bool,
}

/// Identity established by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// Account listing entry (no credential material)
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub created_at: String,
}

/// Ensure the users table exists and seed the admin account if it is missing
///
/// Idempotent: an existing account named `admin_username` is left untouched,
/// including its password.
pub async fn initialize(pool: &SqlitePool, admin_username: &str, admin_password: &str) -> Result<()> {
    create_users_table(pool).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(admin_username)
        .fetch_one(pool)
        .await?;

    if existing == 0 {
        let salt = generate_salt();
        sqlx::query(
            "INSERT INTO users (username, password_hash, password_salt, is_admin) VALUES (?, ?, ?, 1)",
        )
        .bind(admin_username)
        .bind(hash_password(admin_password, &salt))
        .bind(&salt)
        .execute(pool)
        .await?;
        info!(username = %admin_username, "Seeded default admin account");
    }

    Ok(())
}

/// Look up stored credentials by username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<StoredCredentials>> {
    let row: Option<(i64, String, String, i64)> = sqlx::query_as(
        "SELECT id, password_hash, password_salt, COALESCE(is_admin, 0) FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, password_hash, password_salt, is_admin)| StoredCredentials {
        id,
        password_hash,
        password_salt,
        is_admin: is_admin != 0,
    }))
}

/// Validate a username/password pair
///
/// Unknown usernames and wrong passwords fail identically.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<AuthenticatedUser> {
    match find_by_username(pool, username).await? {
        Some(creds) if verify_password(password, &creds.password_salt, &creds.password_hash) => {
            Ok(AuthenticatedUser {
                id: creds.id,
                username: username.to_string(),
                is_admin: creds.is_admin,
            })
        }
        _ => {
            warn!(username = %username, "Failed login attempt");
            Err(Error::InvalidCredentials)
        }
    }
}

/// All accounts, newest first
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<UserSummary>> {
    let rows: Vec<(i64, String, i64, Option<String>)> = sqlx::query_as(
        r#"
        SELECT id, username, COALESCE(is_admin, 0), CAST(created_at AS TEXT)
        FROM users
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, username, is_admin, created_at)| UserSummary {
            id,
            username,
            is_admin: is_admin != 0,
            created_at: created_at.unwrap_or_default(),
        })
        .collect())
}

/// Create an account, returning its id
pub async fn create_user(pool: &SqlitePool, username: &str, password: &str, is_admin: bool) -> Result<i64> {
    if username.is_empty() || password.is_empty() {
        return Err(Error::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Err(Error::DuplicateUsername(username.to_string()));
    }

    let salt = generate_salt();
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, password_salt, is_admin) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(hash_password(password, &salt))
    .bind(&salt)
    .bind(if is_admin { 1i64 } else { 0i64 })
    .execute(pool)
    .await
    .map_err(|e| match e {
        // Lost a race with a concurrent insert of the same name
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            Error::DuplicateUsername(username.to_string())
        }
        other => Error::Database(other),
    })?;

    let id = result.last_insert_rowid();
    info!(username = %username, id, is_admin, "Created user");
    Ok(id)
}

/// Delete an account on behalf of `requesting_user_id`
pub async fn delete_user(pool: &SqlitePool, id: i64, requesting_user_id: i64) -> Result<()> {
    if id == requesting_user_id {
        warn!(id, "Rejected self-deletion");
        return Err(Error::SelfDeletion);
    }

    let mut tx = pool.begin().await?;

    let target: Option<(String, i64)> =
        sqlx::query_as("SELECT username, COALESCE(is_admin, 0) FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

    let (username, is_admin) = target.ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if is_admin != 0 {
        let other_admins: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE COALESCE(is_admin, 0) != 0 AND id != ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if other_admins == 0 {
            warn!(id, username = %username, "Rejected deletion of last admin");
            return Err(Error::LastAdminProtected);
        }
    }

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(id, username = %username, "Deleted user");
    Ok(())
}
