use actix_web::{post, web, Responder};
use tracing::{error, info, warn};

use super::request_reactivation::EmailRequest;
use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::request_password_reset::RequestPasswordResetError;
use crate::shared::api::{ApiResponse, MessageBody};
use crate::AppState;

/// Request a password reset link
///
/// Only activated accounts can reset their password.
#[utoipa::path(
    post,
    path = "/api/accounts/password-reset",
    tag = "accounts",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Reset token sent", body = MessageBody),
        (status = 400, description = "Email not registered or account not activated", body = ErrorResponse),
        (status = 409, description = "Concurrent request for the same account", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/accounts/password-reset")]
pub async fn request_password_reset_handler(
    req: web::Json<EmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(email = %req.email, "Password reset requested");

    match data.accounts.request_password_reset.execute(&req.email).await {
        Ok(()) => ApiResponse::message(
            "Password reset token has been sent. Please check your email inbox.",
        ),
        Err(RequestPasswordResetError::EmailNotRegistered) => {
            warn!(email = %req.email, "Password reset for unknown email");
            ApiResponse::bad_request(
                "EMAIL_NOT_REGISTERED",
                "User with this email doesn't exist",
            )
        }
        Err(RequestPasswordResetError::AccountNotActive) => {
            warn!(email = %req.email, "Password reset for inactive account");
            ApiResponse::bad_request("ACCOUNT_NOT_ACTIVE", "This account is not activated.")
        }
        Err(RequestPasswordResetError::TokenConflict) => ApiResponse::conflict(
            "TOKEN_CONFLICT",
            "A password reset token is already being issued for this account",
        ),
        Err(e) => {
            error!(email = %req.email, error = %e, "Password reset request failed");
            ApiResponse::internal_error()
        }
    }
}
