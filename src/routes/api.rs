use crate::{
    handlers::{diagnostics, health_check, ready_check, run},
    routes::auth_middleware::auth_middleware,
    state::AppState,
    websocket::{websocket_handler, websocket_session_handler},
};
use axum::{routing::{get, post}, Router, middleware};
use std::sync::Arc;

/// Create API routes
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    let protected = Router::<Arc<AppState>>::new()
        .route("/v1/diagnostics", get(diagnostics))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)); // Applies to all routes added above

    Router::<Arc<AppState>>::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/run", post(run))
        .merge(protected)
        .with_state(state)
}

/// Create the WebSocket relay routes
pub fn create_ws_routes(state: Arc<AppState>) -> Router {
    Router::<Arc<AppState>>::new()
        .route("/ws", get(websocket_handler))
        .route("/ws/:session_id", get(websocket_session_handler))
        .with_state(state)
}
