use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Plain `{ message }` envelope for operations with no resource payload
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Require a body field to be present and non-blank, yielding its value.
/// Missing required input is answered with 401 rather than 400.
pub fn require_field(value: Option<String>, message: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::InvalidRequest(message.to_string())),
    }
}

/// Require a message body. Absent or empty input answers "Invalid request";
/// whitespace-only input is called out with the given prompt.
pub fn require_message(value: Option<String>, blank_message: &str) -> AppResult<String> {
    let message = match value {
        Some(m) if !m.is_empty() => m,
        _ => return Err(AppError::InvalidRequest("Invalid request".to_string())),
    };
    if message.trim().is_empty() {
        return Err(AppError::InvalidRequest(blank_message.to_string()));
    }
    Ok(message)
}
