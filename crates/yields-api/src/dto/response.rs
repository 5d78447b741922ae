use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every API response: `{ "data": ... }` or `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub const fn error(msg: String) -> Self {
        Self {
            data: None,
            error: Some(msg),
        }
    }
}
