use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::Record;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    /// argon2 PHC string
    pub password: String,
    pub auth_token: Option<String>,
    pub token_expiration: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    const TABLE: &'static str = "users";
}

/// Column values for a new user; `password` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

impl User {
    pub async fn insert(pool: &SqlitePool, new_user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, username, email, password, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.password)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::classify)
    }

    pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
            .map_err(DatabaseError::classify)
    }

    pub async fn find_by_token(pool: &SqlitePool, token: &str) -> Result<Option<User>, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE auth_token = ?")
            .bind(token)
            .fetch_optional(pool)
            .await
            .map_err(DatabaseError::classify)
    }

    /// Users other than `exclude_id` already holding `username` or `email`
    pub async fn find_conflicting(
        pool: &SqlitePool,
        username: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<Vec<User>, DatabaseError> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users
             WHERE (username = ? OR email = ?)
             AND (? IS NULL OR id <> ?)",
        )
        .bind(username)
        .bind(email)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Users referenced by the given ids, in id order
    pub async fn select_many(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<User>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT * FROM users WHERE id IN ({}) ORDER BY id", placeholders);
        let mut query = sqlx::query_as::<_, User>(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        query.fetch_all(pool).await.map_err(DatabaseError::classify)
    }

    pub async fn update(pool: &SqlitePool, id: i64, changes: UserChanges) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                username = COALESCE(?, username),
                email = COALESCE(?, email),
                password = COALESCE(?, password)
             WHERE id = ?
             RETURNING *",
        )
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.password)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Swap in a new token only if the row still holds `expected`. Returns
    /// false when a concurrent request rotated the token first.
    pub async fn replace_token(
        pool: &SqlitePool,
        id: i64,
        expected: Option<&str>,
        token: &str,
        expiration: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET auth_token = ?, token_expiration = ?
             WHERE id = ? AND auth_token IS ?",
        )
        .bind(token)
        .bind(expiration)
        .bind(id)
        .bind(expected)
        .execute(pool)
        .await
        .map_err(DatabaseError::classify)?;
        Ok(result.rows_affected() == 1)
    }

    /// Token stays on the row but stops resolving from now on
    pub async fn expire_token(pool: &SqlitePool, id: i64, now: DateTime<Utc>) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET token_expiration = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(pool)
            .await
            .map_err(DatabaseError::classify)?;
        Ok(())
    }
}
