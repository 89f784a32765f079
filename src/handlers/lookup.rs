// Row lookups shared by public and protected handlers. Each returns the
// 404 body the route contract promises when the row is absent.

use sqlx::SqlitePool;

use crate::database::{Comment, Post, Repository, User};
use crate::error::ApiError;

pub async fn find_user(pool: &SqlitePool, user_id: i64) -> Result<User, ApiError> {
    Repository::<User>::new(pool)
        .select_one(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User with id {} not found", user_id)))
}

pub async fn find_post(pool: &SqlitePool, post_id: i64) -> Result<Post, ApiError> {
    Repository::<Post>::new(pool)
        .select_one(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post with an ID of {} does not exist", post_id)))
}

/// Comment `comment_id`, provided it belongs to `post_id`
pub async fn find_comment(pool: &SqlitePool, post_id: i64, comment_id: i64) -> Result<Comment, ApiError> {
    Comment::find_on_post(pool, post_id, comment_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "Comment with an ID of {} does not exist on post {}",
                comment_id, post_id
            ))
        })
}

/// Owner of a post or comment. Foreign keys guarantee it exists.
pub async fn find_author(pool: &SqlitePool, user_id: i64) -> Result<User, ApiError> {
    Repository::<User>::new(pool)
        .select_one(user_id)
        .await?
        .ok_or_else(|| {
            tracing::error!("Dangling owner reference to user {}", user_id);
            ApiError::internal_server_error("An error occurred while processing your request")
        })
}
