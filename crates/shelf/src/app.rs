use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{any, get},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::{healthz, livez},
        records,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let collection_path = state.routes.collection_path();
    let item_path = state.routes.item_path();

    // Record routes accept any method: the dispatcher owns method rejection,
    // so an off-table method gets the uniform 400 policy instead of a 405.
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .route(&collection_path, any(records::collection))
        .route(&item_path, any(records::item))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
