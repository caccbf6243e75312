use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::request_reactivation::{
    ReactivationOutcome, RequestReactivationError,
};
use crate::shared::api::{ApiResponse, MessageBody};
use crate::AppState;

/// Body of the reactivation and password-reset requests.
#[derive(Deserialize, ToSchema)]
pub struct EmailRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Request a new activation link
///
/// Replaces any earlier activation token of the account, so only the newest
/// emailed link works.
#[utoipa::path(
    post,
    path = "/api/accounts/reactivate",
    tag = "accounts",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Token sent, or account already active", body = MessageBody),
        (
            status = 400,
            description = "Email not registered",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_NOT_REGISTERED",
                    "message": "User with this email doesn't exist"
                }
            })
        ),
        (status = 409, description = "Concurrent request for the same account", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/accounts/reactivate")]
pub async fn request_reactivation_handler(
    req: web::Json<EmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(email = %req.email, "Reactivation requested");

    match data.accounts.request_reactivation.execute(&req.email).await {
        Ok(ReactivationOutcome::TokenSent) => {
            ApiResponse::message("Reactivation token has been sent. Please check your email inbox.")
        }
        Ok(ReactivationOutcome::AlreadyActive) => {
            ApiResponse::message("This account is already activated.")
        }
        Err(e) => map_reactivation_error(e, &req.email),
    }
}

fn map_reactivation_error(err: RequestReactivationError, email: &str) -> HttpResponse {
    match err {
        RequestReactivationError::EmailNotRegistered => {
            warn!(email = %email, "Reactivation for unknown email");
            ApiResponse::bad_request("EMAIL_NOT_REGISTERED", &err.to_string())
        }
        RequestReactivationError::TokenConflict => {
            warn!(email = %email, "Concurrent reactivation request");
            ApiResponse::conflict("TOKEN_CONFLICT", &err.to_string())
        }
        RequestReactivationError::EmailSendingFailed(ref e)
        | RequestReactivationError::RepositoryError(ref e) => {
            error!(email = %email, error = %e, "Reactivation failed");
            ApiResponse::internal_error()
        }
    }
}
