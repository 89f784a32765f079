use axum::extract::State;

use crate::api::format::{owner_ids, with_authors};
use crate::api::{CommentView, IdPath};
use crate::database::{Comment, User};
use crate::handlers::lookup::{find_author, find_comment, find_post};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /posts/:post_id/comments
pub async fn list(State(state): State<AppState>, IdPath(post_id): IdPath<i64>) -> ApiResult<Vec<CommentView>> {
    let post = find_post(&state.pool, post_id).await?;
    let comments = Comment::list_for_post(&state.pool, post.id).await?;
    let authors = User::select_many(&state.pool, &owner_ids(comments.iter().map(|c| c.user_id))).await?;

    Ok(ApiResponse::success(with_authors(&comments, |c| c.user_id, &authors, CommentView::new)))
}

/// GET /posts/:post_id/comments/:comment_id
pub async fn get(
    State(state): State<AppState>,
    IdPath((post_id, comment_id)): IdPath<(i64, i64)>,
) -> ApiResult<CommentView> {
    let post = find_post(&state.pool, post_id).await?;
    let comment = find_comment(&state.pool, post.id, comment_id).await?;
    let author = find_author(&state.pool, comment.user_id).await?;
    Ok(ApiResponse::success(CommentView::new(&comment, &author)))
}
