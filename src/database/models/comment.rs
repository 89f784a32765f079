use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::Record;

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Author
    pub user_id: i64,
    pub post_id: i64,
}

impl Record for Comment {
    const TABLE: &'static str = "comments";
}

impl Comment {
    pub async fn insert(pool: &SqlitePool, body: &str, user_id: i64, post_id: i64) -> Result<Comment, DatabaseError> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (body, created_at, user_id, post_id)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(body)
        .bind(Utc::now())
        .bind(user_id)
        .bind(post_id)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::classify)
    }

    pub async fn update_body(pool: &SqlitePool, id: i64, body: &str) -> Result<Comment, DatabaseError> {
        sqlx::query_as::<_, Comment>("UPDATE comments SET body = ? WHERE id = ? RETURNING *")
            .bind(body)
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::classify)
    }

    /// Comment `id` only if it hangs off `post_id`
    pub async fn find_on_post(pool: &SqlitePool, post_id: i64, id: i64) -> Result<Option<Comment>, DatabaseError> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ? AND post_id = ?")
            .bind(id)
            .bind(post_id)
            .fetch_optional(pool)
            .await
            .map_err(DatabaseError::classify)
    }

    pub async fn list_for_post(pool: &SqlitePool, post_id: i64) -> Result<Vec<Comment>, DatabaseError> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE post_id = ? ORDER BY id")
            .bind(post_id)
            .fetch_all(pool)
            .await
            .map_err(DatabaseError::classify)
    }
}
