use axum::{extract::State, http::HeaderMap};

use crate::auth::{self, extract_basic, TokenGrant};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /token - Exchange HTTP Basic credentials for a bearer token
///
/// Returns `{"token": "...", "tokenExpiration": "..."}`. A still-valid token
/// is handed back unchanged; otherwise a new one is issued.
pub async fn issue(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<TokenGrant> {
    let credentials = extract_basic(&headers)?;
    let grant = auth::issue_token(&state.pool, &state.config.security, &credentials).await?;
    Ok(ApiResponse::success(grant))
}
