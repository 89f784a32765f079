use axum::extract::State;

use crate::api::format::{owner_ids, with_authors};
use crate::api::{IdPath, PostView};
use crate::database::{Post, Repository, User};
use crate::handlers::lookup::{find_author, find_post};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /posts - Every post, oldest first, each with its author
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PostView>> {
    let posts = Repository::<Post>::new(&state.pool).select_all().await?;
    let authors = User::select_many(&state.pool, &owner_ids(posts.iter().map(|p| p.user_id))).await?;

    Ok(ApiResponse::success(with_authors(&posts, |p| p.user_id, &authors, PostView::new)))
}

/// GET /posts/:post_id
pub async fn get(State(state): State<AppState>, IdPath(post_id): IdPath<i64>) -> ApiResult<PostView> {
    let post = find_post(&state.pool, post_id).await?;
    let author = find_author(&state.pool, post.user_id).await?;
    Ok(ApiResponse::success(PostView::new(&post, &author)))
}
