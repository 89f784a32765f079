pub mod credentials;
pub mod password;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::{DatabaseError, User};
use crate::error::ApiError;

pub use credentials::{extract_basic, extract_bearer, BasicCredentials};
pub use password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    MissingCredentials(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Bearer token handed out by `GET /token`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub token: String,
    pub token_expiration: DateTime<Utc>,
}

/// A stored token is reused only while it outlives `now + margin`
pub fn token_is_fresh(expiration: Option<DateTime<Utc>>, now: DateTime<Utc>, margin: Duration) -> bool {
    matches!(expiration, Some(exp) if exp > now + margin)
}

fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validate username/password and return a bearer token for that user.
/// An unexpired token is returned as-is; otherwise a new one replaces it.
pub async fn issue_token(
    pool: &SqlitePool,
    security: &SecurityConfig,
    credentials: &BasicCredentials,
) -> Result<TokenGrant, AuthError> {
    let user = User::find_by_username(pool, &credentials.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&credentials.password, &user.password) {
        tracing::warn!("Token request with bad password for '{}'", credentials.username);
        return Err(AuthError::InvalidCredentials);
    }

    let now = Utc::now();
    let margin = Duration::seconds(security.token_refresh_margin_secs);
    if let Some(grant) = current_grant(&user, now, margin) {
        return Ok(grant);
    }

    let grant = TokenGrant {
        token: generate_token(),
        token_expiration: now + Duration::minutes(security.token_ttl_minutes),
    };
    let replaced = User::replace_token(
        pool,
        user.id,
        user.auth_token.as_deref(),
        &grant.token,
        grant.token_expiration,
    )
    .await?;

    if replaced {
        tracing::info!("Issued token for user {} ({})", user.username, user.id);
        return Ok(grant);
    }

    // Lost the rotation to a concurrent request; hand out the token it stored
    tracing::debug!("Token for user {} rotated concurrently, reusing it", user.id);
    let user = User::find_by_username(pool, &credentials.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    current_grant(&user, now, Duration::zero()).ok_or(AuthError::InvalidToken)
}

/// The stored token, if it stays valid past `now + margin`
fn current_grant(user: &User, now: DateTime<Utc>, margin: Duration) -> Option<TokenGrant> {
    match (&user.auth_token, user.token_expiration) {
        (Some(token), Some(expiration)) if token_is_fresh(Some(expiration), now, margin) => Some(TokenGrant {
            token: token.clone(),
            token_expiration: expiration,
        }),
        _ => None,
    }
}

/// Look up the user owning a non-expired token
pub async fn resolve_current_actor(pool: &SqlitePool, token: &str) -> Result<User, AuthError> {
    let user = User::find_by_token(pool, token)
        .await?
        .ok_or(AuthError::InvalidToken)?;

    match user.token_expiration {
        Some(expiration) if expiration > Utc::now() => Ok(user),
        _ => Err(AuthError::InvalidToken),
    }
}

/// Expire the actor's token immediately
pub async fn revoke_token(pool: &SqlitePool, actor: &User) -> Result<(), AuthError> {
    User::expire_token(pool, actor.id, Utc::now() - Duration::seconds(1)).await?;
    tracing::info!("Revoked token for user {} ({})", actor.username, actor.id);
    Ok(())
}

/// Fail with `Forbidden` unless the actor is the owner
pub fn ensure_owner(actor: &User, owner_id: i64, message: &str) -> Result<(), ApiError> {
    if actor.id == owner_id {
        return Ok(());
    }
    tracing::warn!("User {} denied access to resource owned by {}", actor.id, owner_id);
    Err(ApiError::forbidden(message))
}
