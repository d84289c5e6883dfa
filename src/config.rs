use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins, comma separated
    pub cors_origins: Option<String>,

    /// HS256 secret used to verify bearer tokens
    pub auth_jwt_secret: Option<String>,

    /// Admit WebSocket connections that present no token
    #[serde(default = "default_ws_allow_anonymous")]
    pub ws_allow_anonymous: bool,

    /// Frames buffered per socket before further events to it are dropped
    #[serde(default = "default_ws_outbound_buffer")]
    pub ws_outbound_buffer: usize,

    /// Base URL of the Piston execution API
    #[serde(default = "default_piston_url")]
    pub piston_url: String,

    #[serde(default = "default_piston_timeout_secs")]
    pub piston_timeout_secs: u64,

    /// How long the Piston runtime list is reused before refetching
    #[serde(default = "default_piston_runtime_cache_ttl_secs")]
    pub piston_runtime_cache_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        match envy::from_env::<Config>() {
            Ok(config) => {
                info!("✅ Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                error!("❌ Failed to load configuration: {}", e);
                Err(ConfigError::EnvError(e))
            }
        }
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed list of allowed CORS origins
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn piston_timeout(&self) -> Duration {
        Duration::from_secs(self.piston_timeout_secs)
    }

    pub fn piston_runtime_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.piston_runtime_cache_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: None,
            auth_jwt_secret: None,
            ws_allow_anonymous: default_ws_allow_anonymous(),
            ws_outbound_buffer: default_ws_outbound_buffer(),
            piston_url: default_piston_url(),
            piston_timeout_secs: default_piston_timeout_secs(),
            piston_runtime_cache_ttl_secs: default_piston_runtime_cache_ttl_secs(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_ws_allow_anonymous() -> bool {
    true
}

fn default_ws_outbound_buffer() -> usize {
    100
}

fn default_piston_url() -> String {
    "https://emkc.org/api/v2/piston".to_string()
}

fn default_piston_timeout_secs() -> u64 {
    10
}

fn default_piston_runtime_cache_ttl_secs() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.ws_allow_anonymous);
        assert_eq!(config.ws_outbound_buffer, 100);
        assert_eq!(config.environment, "development");
        assert_eq!(config.piston_url, "https://emkc.org/api/v2/piston");
        assert!(config.auth_jwt_secret.is_none());
    }

    #[test]
    fn values_from_env() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("WS_ALLOW_ANONYMOUS".to_string(), "false".to_string()),
            ("AUTH_JWT_SECRET".to_string(), "s3cret".to_string()),
            ("CORS_ORIGINS".to_string(), "http://localhost:3000, https://syncode.dev,".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert!(!config.ws_allow_anonymous);
        assert_eq!(config.auth_jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(
            config.cors_origin_list(),
            vec!["http://localhost:3000", "https://syncode.dev"]
        );
    }
}
