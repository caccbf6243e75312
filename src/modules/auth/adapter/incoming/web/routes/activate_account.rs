use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::activate_account::{
    ActivateAccountError, ActivationOutcome,
};
use crate::shared::api::{ApiResponse, MessageBody};
use crate::AppState;

#[derive(Deserialize, IntoParams)]
pub struct ActivationPath {
    /// Username the token was issued to
    pub username: String,
    /// Token value from the activation email
    pub token: String,
}

/// Activate an account
///
/// Opened from the link in the activation email. Tokens are valid for 24
/// hours; an expired one can be replaced via `/api/accounts/reactivate`.
#[utoipa::path(
    get,
    path = "/api/accounts/activate/{username}/{token}",
    tag = "accounts",
    params(ActivationPath),
    responses(
        (status = 200, description = "Activated, or already active", body = MessageBody),
        (status = 404, description = "Unknown user or token", body = ErrorResponse),
        (
            status = 410,
            description = "Token expired",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "TOKEN_EXPIRED", "message": "Token expired" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/accounts/activate/{username}/{token}")]
pub async fn activate_account_handler(
    path: web::Path<ActivationPath>,
    data: web::Data<AppState>,
) -> impl Responder {
    let ActivationPath { username, token } = path.into_inner();

    match data.accounts.activate.execute(&username, &token).await {
        Ok(ActivationOutcome::Activated) => {
            info!(username = %username, "Activation complete");
            ApiResponse::message("Activation complete")
        }
        Ok(ActivationOutcome::AlreadyActive) => {
            ApiResponse::message("User is already activated")
        }
        Err(ActivateAccountError::UserNotFound) => {
            warn!(username = %username, "Activation for unknown user");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(ActivateAccountError::TokenNotFound) => {
            warn!(username = %username, "Activation with unknown token");
            ApiResponse::not_found("TOKEN_NOT_FOUND", "Activation token not found")
        }
        Err(ActivateAccountError::TokenExpired) => {
            warn!(username = %username, "Activation with expired token");
            ApiResponse::gone("TOKEN_EXPIRED", "Token expired")
        }
        Err(ActivateAccountError::RepositoryError(e)) => {
            error!(username = %username, error = %e, "Activation failed");
            ApiResponse::internal_error()
        }
    }
}
