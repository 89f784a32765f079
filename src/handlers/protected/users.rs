use axum::extract::{Extension, State};
use serde_json::Value;

use crate::api::{into_object, optional_string, IdPath, JsonBody, UserView};
use crate::auth::{ensure_owner, hash_password};
use crate::database::{Repository, User, UserChanges};
use crate::error::ApiError;
use crate::handlers::lookup::find_user;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// PUT /users/:user_id - Change any subset of the caller's own profile
///
/// Accepts `firstName`, `lastName`, `username`, `email` and `password`.
/// Unknown fields are ignored.
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    IdPath(user_id): IdPath<i64>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<UserView> {
    let data = into_object(payload)?;
    let user = find_user(&state.pool, user_id).await?;
    ensure_owner(&actor, user.id, "You cannot change this user as you are not them!")?;

    let mut changes = UserChanges {
        first_name: optional_string(&data, "firstName")?,
        last_name: optional_string(&data, "lastName")?,
        username: optional_string(&data, "username")?,
        email: optional_string(&data, "email")?,
        password: None,
    };
    if let Some(password) = optional_string(&data, "password")? {
        changes.password = Some(hash_password(&password)?);
    }

    if changes.username.is_some() || changes.email.is_some() {
        let taken = User::find_conflicting(
            &state.pool,
            changes.username.as_deref(),
            changes.email.as_deref(),
            Some(user.id),
        )
        .await?;
        if !taken.is_empty() {
            return Err(ApiError::bad_request(
                "A user with that username and/or email already exists",
            ));
        }
    }

    if changes.is_empty() {
        return Ok(ApiResponse::success(UserView::from(&user)));
    }

    let updated = User::update(&state.pool, user.id, changes).await?;
    tracing::info!("Updated user {} ({})", updated.username, updated.id);
    Ok(ApiResponse::success(UserView::from(&updated)))
}

/// DELETE /users/:user_id - Remove the caller along with their posts and comments
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    IdPath(user_id): IdPath<i64>,
) -> ApiResult<Value> {
    let user = find_user(&state.pool, user_id).await?;
    ensure_owner(&actor, user.id, "You can only delete yourself")?;

    Repository::<User>::new(&state.pool).delete(user.id).await?;

    tracing::info!("Deleted user {} ({})", user.username, user.id);
    Ok(ApiResponse::message(format!("{} has been deleted!", user.username)))
}
