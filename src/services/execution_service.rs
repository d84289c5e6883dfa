use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::clients::{PistonClient, PistonError};
use crate::models::RunRequest;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Code cannot be empty")]
    EmptyCode,
    #[error("Could not find valid runtime version")]
    NoRuntime,
    /// Piston's error body, or the transport error message when there is none
    #[error("{0}")]
    Upstream(Value),
}

/// Resolve the runtime for the requested language and pass the code to Piston.
/// Piston's response body is returned untouched.
pub async fn run_code(piston: &PistonClient, request: &RunRequest) -> Result<Value, RunError> {
    if request.code.trim().is_empty() {
        return Err(RunError::EmptyCode);
    }

    let version = match piston.resolve_version(&request.language).await {
        Ok(version) => version,
        Err(e) => {
            error!("Error fetching runtime version for {}: {}", request.language, e);
            return Err(RunError::NoRuntime);
        }
    };

    info!("Running {} code on runtime {}", request.language, version);
    piston
        .execute(&request.language, &version, &request.code)
        .await
        .map_err(|e| {
            error!("Piston API error: {}", e);
            match e {
                PistonError::Upstream { body, .. } => RunError::Upstream(body),
                other => RunError::Upstream(Value::String(other.to_string())),
            }
        })
}
