use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::reset_password::{ResetPasswordError, ResetPasswordInput};
use crate::shared::api::{ApiResponse, MessageBody};
use crate::AppState;

#[derive(Deserialize, IntoParams)]
pub struct ResetPath {
    /// Username the token was issued to
    pub username: String,
    /// Token value from the reset email
    pub token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct NewPasswordRequest {
    #[schema(example = "brandnew99")]
    pub new_password1: String,

    /// Must repeat `new_password1`
    #[schema(example = "brandnew99")]
    pub new_password2: String,
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/api/accounts/password-reset/{username}/{token}",
    tag = "accounts",
    params(ResetPath),
    request_body = NewPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageBody),
        (status = 400, description = "Passwords differ or violate the policy", body = ErrorResponse),
        (status = 404, description = "Unknown user or token", body = ErrorResponse),
        (status = 410, description = "Token expired", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/accounts/password-reset/{username}/{token}")]
pub async fn reset_password_handler(
    path: web::Path<ResetPath>,
    req: web::Json<NewPasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let ResetPath { username, token } = path.into_inner();
    let NewPasswordRequest {
        new_password1,
        new_password2,
    } = req.into_inner();

    let input = ResetPasswordInput {
        username: username.clone(),
        token,
        new_password1,
        new_password2,
    };

    match data.accounts.reset_password.execute(input).await {
        Ok(()) => {
            info!(username = %username, "Password reset completed");
            ApiResponse::message("Your password has been updated.")
        }
        Err(e) => map_reset_error(e, &username),
    }
}

fn map_reset_error(err: ResetPasswordError, username: &str) -> HttpResponse {
    match err {
        ResetPasswordError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        ResetPasswordError::TokenNotFound => {
            warn!(username = %username, "Password reset with unknown token");
            ApiResponse::not_found("TOKEN_NOT_FOUND", "Password reset token not found")
        }
        ResetPasswordError::TokenExpired => ApiResponse::gone("TOKEN_EXPIRED", "Token expired"),
        ResetPasswordError::PasswordMismatch => {
            ApiResponse::bad_request("PASSWORD_MISMATCH", &err.to_string())
        }
        ResetPasswordError::InvalidPassword(msg) => {
            ApiResponse::bad_request("INVALID_PASSWORD", &msg)
        }
        ResetPasswordError::HashingFailed(ref e) | ResetPasswordError::RepositoryError(ref e) => {
            error!(username = %username, error = %e, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}
