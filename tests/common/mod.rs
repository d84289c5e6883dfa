#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use syncode_relay::config::Config;
use syncode_relay::routes::create_app;
use syncode_relay::services::auth_service::Claims;
use syncode_relay::state::AppState;
use tokio::net::TcpListener;

pub const SECRET: &str = "test-secret";

pub fn config() -> Config {
    Config {
        auth_jwt_secret: Some(SECRET.to_string()),
        ..Config::default()
    }
}

pub fn token(user_id: &str, role: &str) -> String {
    let claims = Claims {
        id: user_id.to_string(),
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

/// Serve the full application on an ephemeral port
pub async fn spawn_app(config: Config) -> (SocketAddr, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}
