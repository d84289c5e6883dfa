use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::services::auth_service::{authenticate, get_auth_token, AuthError};
use crate::state::AppState;

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Get the auth token from the request
    let token = match get_auth_token(&req) {
        Ok(token) => token,
        Err(_) => return Err(StatusCode::UNAUTHORIZED),
    };

    // Validate token
    let identity = match authenticate(&token, state.config.auth_jwt_secret.as_deref()) {
        Ok(identity) => identity,
        Err(AuthError::MissingSecret) => {
            error!("Auth JWT secret not configured");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Err(e) => {
            error!("JWT validation failed: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };
    info!("Request authenticated for user {} ({})", identity.user_id, identity.role);

    // Hand the identity to downstream handlers
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
