use axum::http::{self, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::auth::{Identity, Role};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no auth token presented")]
    MissingToken,
    #[error("no JWT secret configured")]
    MissingSecret,
    #[error("token invalid: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by tokens issued at login
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub role: String,
    pub exp: usize,
}

/// Find a bearer token in the Authorization header or the `auth_token` cookie
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(http::header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().ok()?;
        let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
        return (!token.is_empty()).then(|| token.to_string());
    }

    let cookie_header = headers.get(http::header::COOKIE)?.to_str().ok()?;
    cookie::Cookie::split_parse(cookie_header)
        .flatten()
        .find(|c| c.name() == "auth_token")
        .map(|c| c.value().to_string())
}

// Get the auth token from a request
pub fn get_auth_token<B>(req: &http::Request<B>) -> Result<String, AuthError> {
    token_from_headers(req.headers()).ok_or(AuthError::MissingToken)
}

// Validate a JWT token and return the caller identity
pub fn validate_jwt(token: &str, secret: &str) -> Result<Identity, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    debug!("JWT token validated for user: {}", token_data.claims.id);
    Ok(Identity {
        user_id: token_data.claims.id,
        role: Role::from_claim(&token_data.claims.role),
    })
}

/// Validate against an optional secret, as read from configuration
pub fn authenticate(token: &str, secret: Option<&str>) -> Result<Identity, AuthError> {
    let secret = secret.ok_or(AuthError::MissingSecret)?;
    validate_jwt(token, secret)
}
