use crate::server::blog;
use crate::server::state::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Every endpoint lives under `/v1` so breaking changes can move to a new namespace.
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/ping", get(blog::ping))
        .route("/blog/newest", get(blog::newest))
        .route("/blog/entry/{id}", get(blog::blog_entry));

    Router::new()
        .nest("/v1", v1)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
