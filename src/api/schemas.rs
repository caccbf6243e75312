//! Envelope shapes for the OpenAPI document. Handlers build the same JSON
//! through `shared::api::ApiResponse`; these types only describe it.

use serde::Serialize;
use utoipa::ToSchema;

/// `{ "success": true, "data": ... }`
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// `{ "success": false, "error": { "code", "message" } }`
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable, upper snake case; clients branch on this
    #[schema(example = "POST_NOT_FOUND")]
    pub code: String,

    /// Human-readable, may change between releases
    #[schema(example = "Post not found")]
    pub message: String,
}
