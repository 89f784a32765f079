use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::state::AppState;

/// GET / - Service name, version and route overview
pub async fn index() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Blog API",
        "version": version,
        "endpoints": {
            "token": "GET /token (basic auth), DELETE /token (bearer)",
            "users": "POST /users, GET|PUT|DELETE /users/:id",
            "posts": "GET|POST /posts, GET|PUT|DELETE /posts/:id",
            "comments": "GET|POST /posts/:id/comments, GET|PUT|DELETE /posts/:id/comments/:comment_id",
        }
    }))
}

/// GET /health - Liveness plus a database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable"
                })),
            )
        }
    }
}
