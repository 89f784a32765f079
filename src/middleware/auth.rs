use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{extract_bearer, resolve_current_actor};
use crate::database::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The actor resolved from the bearer token of the current request
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Bearer token authentication. Resolves the actor and injects `CurrentUser`
/// before any handler extractor runs, so unauthenticated calls are always 401.
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers()).map_err(|e| {
        tracing::debug!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        ApiError::from(e)
    })?;

    let actor = resolve_current_actor(&state.pool, &token).await.map_err(|e| {
        tracing::warn!("Token authentication failed for {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    tracing::debug!("Authenticated user {} ({})", actor.username, actor.id);
    request.extensions_mut().insert(CurrentUser(actor));

    Ok(next.run(request).await)
}
