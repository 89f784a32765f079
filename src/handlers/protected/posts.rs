use axum::extract::{Extension, State};
use serde_json::Value;

use crate::api::{into_object, optional_string, require_fields, required_string, IdPath, JsonBody, PostView};
use crate::auth::ensure_owner;
use crate::database::{Post, PostChanges, Repository};
use crate::handlers::lookup::find_post;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// POST /posts
///
/// Expected Input:
/// ```json
/// { "title": "string", "body": "string" }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<PostView> {
    let data = into_object(payload)?;
    require_fields(&data, &["title", "body"])?;

    let title = required_string(&data, "title")?;
    let body = required_string(&data, "body")?;
    let post = Post::insert(&state.pool, &title, &body, actor.id).await?;

    tracing::info!("User {} created post {}", actor.id, post.id);
    Ok(ApiResponse::created(PostView::new(&post, &actor)))
}

/// PUT /posts/:post_id - Change `title` and/or `body` of the caller's post
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    IdPath(post_id): IdPath<i64>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<PostView> {
    let data = into_object(payload)?;
    let post = find_post(&state.pool, post_id).await?;
    ensure_owner(&actor, post.user_id, "This is not your post")?;

    let changes = PostChanges {
        title: optional_string(&data, "title")?,
        body: optional_string(&data, "body")?,
    };
    let post = Post::update(&state.pool, post.id, changes).await?;

    Ok(ApiResponse::success(PostView::new(&post, &actor)))
}

/// DELETE /posts/:post_id - Comments on the post are removed with it
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    IdPath(post_id): IdPath<i64>,
) -> ApiResult<Value> {
    let post = find_post(&state.pool, post_id).await?;
    ensure_owner(&actor, post.user_id, "You cannot delete a post that is not yours")?;

    Repository::<Post>::new(&state.pool).delete(post.id).await?;

    tracing::info!("User {} deleted post {}", actor.id, post.id);
    Ok(ApiResponse::message(format!("{} has been deleted!", post.title)))
}
