use axum::extract::{Extension, State};
use serde_json::Value;

use crate::auth;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// DELETE /token - Expire the caller's bearer token
pub async fn revoke(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> ApiResult<Value> {
    auth::revoke_token(&state.pool, &actor).await?;
    Ok(ApiResponse::message("token revoked"))
}
