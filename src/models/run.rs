use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Request to execute a piece of code
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct RunRequest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
}

/// Execution failure carrying the upstream error body
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct RunErrorResponse {
    pub code: u16,
    pub status: String,
    #[schema(value_type = Object)]
    pub error: Value,
}
