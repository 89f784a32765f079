use axum::extract::State;
use serde_json::Value;

use crate::api::{into_object, require_fields, required_string, IdPath, JsonBody, UserView};
use crate::auth::hash_password;
use crate::database::{NewUser, User};
use crate::error::ApiError;
use crate::handlers::lookup::find_user;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const REQUIRED_FIELDS: &[&str] = &["firstName", "lastName", "username", "email", "password"];

/// POST /users - Sign up
///
/// Expected Input:
/// ```json
/// {
///   "firstName": "string",
///   "lastName": "string",
///   "username": "string",    // unique
///   "email": "string",       // unique
///   "password": "string"
/// }
/// ```
pub async fn create(State(state): State<AppState>, JsonBody(payload): JsonBody<Value>) -> ApiResult<UserView> {
    let data = into_object(payload)?;
    require_fields(&data, REQUIRED_FIELDS)?;

    let username = required_string(&data, "username")?;
    let email = required_string(&data, "email")?;

    let existing = User::find_conflicting(&state.pool, Some(&username), Some(&email), None).await?;
    if !existing.is_empty() {
        tracing::info!("Signup rejected, username '{}' or email already taken", username);
        return Err(ApiError::bad_request(
            "A user with that username and/or email already exists",
        ));
    }

    let new_user = NewUser {
        first_name: required_string(&data, "firstName")?,
        last_name: required_string(&data, "lastName")?,
        username,
        email,
        password: hash_password(&required_string(&data, "password")?)?,
    };
    let user = User::insert(&state.pool, new_user).await?;

    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok(ApiResponse::created(UserView::from(&user)))
}

/// GET /users/:user_id
pub async fn get(State(state): State<AppState>, IdPath(user_id): IdPath<i64>) -> ApiResult<UserView> {
    let user = find_user(&state.pool, user_id).await?;
    Ok(ApiResponse::success(UserView::from(&user)))
}
