use axum::extract::{Extension, State};
use serde_json::Value;

use crate::api::{into_object, optional_string, require_fields, required_string, CommentView, IdPath, JsonBody};
use crate::auth::ensure_owner;
use crate::database::{Comment, Repository};
use crate::handlers::lookup::{find_comment, find_post};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// POST /posts/:post_id/comments
///
/// Expected Input:
/// ```json
/// { "body": "string" }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    IdPath(post_id): IdPath<i64>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<CommentView> {
    let data = into_object(payload)?;
    let post = find_post(&state.pool, post_id).await?;
    require_fields(&data, &["body"])?;

    let body = required_string(&data, "body")?;
    let comment = Comment::insert(&state.pool, &body, actor.id, post.id).await?;

    tracing::info!("User {} commented on post {} ({})", actor.id, post.id, comment.id);
    Ok(ApiResponse::created(CommentView::new(&comment, &actor)))
}

/// PUT /posts/:post_id/comments/:comment_id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    IdPath((post_id, comment_id)): IdPath<(i64, i64)>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<CommentView> {
    let data = into_object(payload)?;
    let post = find_post(&state.pool, post_id).await?;
    let comment = find_comment(&state.pool, post.id, comment_id).await?;
    ensure_owner(&actor, comment.user_id, "You cannot edit what isn't yours")?;

    let comment = match optional_string(&data, "body")? {
        Some(body) => Comment::update_body(&state.pool, comment.id, &body).await?,
        None => comment,
    };

    Ok(ApiResponse::success(CommentView::new(&comment, &actor)))
}

/// DELETE /posts/:post_id/comments/:comment_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    IdPath((post_id, comment_id)): IdPath<(i64, i64)>,
) -> ApiResult<Value> {
    let post = find_post(&state.pool, post_id).await?;
    let comment = find_comment(&state.pool, post.id, comment_id).await?;
    ensure_owner(&actor, comment.user_id, "You cannot delete what isn't yours")?;

    Repository::<Comment>::new(&state.pool).delete(comment.id).await?;

    tracing::info!("User {} deleted comment {} on post {}", actor.id, comment.id, post.id);
    Ok(ApiResponse::message("comment deleted!"))
}
