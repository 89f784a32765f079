use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::token_auth_middleware;
use crate::state::AppState;

/// The complete HTTP surface. Public and protected routes share paths; axum
/// merges their method routers, so e.g. `GET /posts/:id` stays anonymous while
/// `PUT /posts/:id` goes through the token middleware.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()));

    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{comments, posts, status, token, users};

    Router::new()
        .route("/", get(status::index))
        .route("/health", get(status::health))
        .route("/token", get(token::issue))
        .route("/users", post(users::create))
        .route("/users/:user_id", get(users::get))
        .route("/posts", get(posts::list))
        .route("/posts/:post_id", get(posts::get))
        .route("/posts/:post_id/comments", get(comments::list))
        .route("/posts/:post_id/comments/:comment_id", get(comments::get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use axum::routing::{delete, put};
    use protected::{comments, posts, token, users};

    Router::new()
        .route("/token", delete(token::revoke))
        .route("/users/:user_id", put(users::update).delete(users::delete))
        .route("/posts", post(posts::create))
        .route("/posts/:post_id", put(posts::update).delete(posts::delete))
        .route("/posts/:post_id/comments", post(comments::create))
        .route(
            "/posts/:post_id/comments/:comment_id",
            put(comments::update).delete(comments::delete),
        )
        .route_layer(from_fn_with_state(state, token_auth_middleware))
}
