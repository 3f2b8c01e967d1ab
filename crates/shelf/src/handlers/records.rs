//! Record route handlers.
//!
//! Thin adapters: each handler rebuilds the request descriptor the
//! dispatcher expects (method, route template, path parameters, body) and
//! writes the response descriptor back out as HTTP. All routing, error and
//! header policy lives in the dispatcher.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::dispatcher::{dispatch, ApiRequest, ApiResponse};
use crate::state::AppState;

/// ANY /{collection}
pub async fn collection(State(state): State<AppState>, method: Method, body: String) -> Response {
    let request = ApiRequest {
        method: method.to_string(),
        resource_path: state.routes.collection_path(),
        path_parameters: HashMap::new(),
        body: (!body.is_empty()).then_some(body),
    };

    run(&state, &request).await
}

/// ANY /{collection}/{id}
pub async fn item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    body: String,
) -> Response {
    let request = ApiRequest {
        method: method.to_string(),
        resource_path: state.routes.item_path(),
        path_parameters: HashMap::from([("id".to_string(), id)]),
        body: (!body.is_empty()).then_some(body),
    };

    run(&state, &request).await
}

async fn run(state: &AppState, request: &ApiRequest) -> Response {
    let response = dispatch(
        state.store.as_ref(),
        &state.routes,
        &state.allowed_origin,
        request,
    )
    .await;

    into_http(response)
}

/// Render a response descriptor as an HTTP response.
fn into_http(response: ApiResponse) -> Response {
    let mut builder = Response::builder().status(response.status_code);
    for (name, value) in &response.headers {
        builder = builder.header(*name, value.as_str());
    }

    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
