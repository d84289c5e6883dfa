use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::models::{ErrorResponse, RunErrorResponse, RunRequest};
use crate::services::execution_service::{run_code, RunError};
use crate::state::AppState;

/// Execute code through Piston and return its response verbatim
pub async fn run(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RunRequest>,
) -> Result<Json<Value>, Response> {
    match run_code(&state.piston, &request).await {
        Ok(output) => Ok(Json(output)),
        Err(e @ RunError::EmptyCode) => {
            Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, e.to_string()).into_response())
        }
        Err(e @ RunError::NoRuntime) => {
            Err(ErrorResponse::reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response())
        }
        // Piston's own error body goes back to the client as-is
        Err(RunError::Upstream(body)) => {
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            Err((
                status,
                Json(RunErrorResponse {
                    code: status.as_u16(),
                    status: status.to_string(),
                    error: body,
                }),
            )
                .into_response())
        }
    }
}
