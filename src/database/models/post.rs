use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::Record;

#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Owner
    pub user_id: i64,
}

impl Record for Post {
    const TABLE: &'static str = "posts";
}

#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Post {
    pub async fn insert(pool: &SqlitePool, title: &str, body: &str, user_id: i64) -> Result<Post, DatabaseError> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, body, created_at, user_id)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(title)
        .bind(body)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::classify)
    }

    pub async fn update(pool: &SqlitePool, id: i64, changes: PostChanges) -> Result<Post, DatabaseError> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET
                title = COALESCE(?, title),
                body = COALESCE(?, body)
             WHERE id = ?
             RETURNING *",
        )
        .bind(changes.title)
        .bind(changes.body)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::classify)
    }
}
