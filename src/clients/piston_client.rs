use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PistonError {
    #[error("request to Piston failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no runtime found for language: {0}")]
    UnknownLanguage(String),
    #[error("Piston returned {status}: {body}")]
    Upstream { status: u16, body: Value },
}

/// One entry of Piston's `/runtimes` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Runtime {
    pub fn matches(&self, language: &str) -> bool {
        self.language == language || self.aliases.iter().any(|a| a == language)
    }
}

#[derive(Debug, Serialize)]
struct SourceFile<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<SourceFile<'a>>,
}

/// Client for the Piston code execution API.
///
/// Resolved runtime versions are cached per language so a run costs one
/// upstream call once the language has been seen.
#[derive(Clone)]
pub struct PistonClient {
    client: Client,
    base_url: String,
    versions: Cache<String, String>,
}

impl PistonClient {
    pub fn new(base_url: &str, timeout: Duration, cache_ttl: Duration) -> Result<Self, PistonError> {
        let client = Client::builder().timeout(timeout).build()?;
        let versions = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            versions,
        })
    }

    pub async fn runtimes(&self) -> Result<Vec<Runtime>, PistonError> {
        let url = format!("{}/runtimes", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Version of the first runtime matching `language` by name or alias
    pub async fn resolve_version(&self, language: &str) -> Result<String, Arc<PistonError>> {
        self.versions
            .try_get_with(language.to_string(), async {
                info!("Runtime cache miss for language {}. Fetching from Piston.", language);
                let runtimes = self.runtimes().await?;
                runtimes
                    .into_iter()
                    .find(|r| r.matches(language))
                    .map(|r| r.version)
                    .ok_or_else(|| PistonError::UnknownLanguage(language.to_string()))
            })
            .await
    }

    pub async fn execute(&self, language: &str, version: &str, code: &str) -> Result<Value, PistonError> {
        let url = format!("{}/execute", self.base_url);
        let body = ExecuteRequest {
            language,
            version,
            files: vec![SourceFile { content: code }],
        };
        debug!("Executing {} {} ({} bytes)", language, version, code.len());

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(PistonError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    pub fn cached_runtimes(&self) -> u64 {
        self.versions.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_matches_name_or_alias() {
        let rt: Runtime = serde_json::from_str(
            r#"{"language":"c++","version":"10.2.0","aliases":["cpp","g++"]}"#,
        )
        .unwrap();
        assert!(rt.matches("c++"));
        assert!(rt.matches("cpp"));
        assert!(!rt.matches("c"));

        let bare: Runtime = serde_json::from_str(r#"{"language":"python","version":"3.10.0"}"#).unwrap();
        assert!(bare.aliases.is_empty());
        assert!(bare.matches("python"));
    }

    #[test]
    fn execute_body_shape() {
        let body = ExecuteRequest {
            language: "python",
            version: "3.10.0",
            files: vec![SourceFile { content: "print(1)" }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "language": "python",
                "version": "3.10.0",
                "files": [{"content": "print(1)"}]
            })
        );
    }
}
