use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::modules::auth::application::use_cases::logout_user::LogoutError;
use crate::shared::api::{ApiResponse, MessageBody};
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::{error, info, warn};

/// Log out
///
/// Revokes the presented access token until it would have expired.
#[utoipa::path(
    post,
    path = "/api/accounts/logout",
    tag = "accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token revoked", body = MessageBody),
        (status = 401, description = "Missing, invalid or already revoked token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/accounts/logout")]
pub async fn logout_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(user_id = %user.user_id, "User logout attempt");

    match data.accounts.logout.execute(&user.token).await {
        Ok(()) => ApiResponse::message("Logged out successfully"),

        Err(LogoutError::InvalidToken(ref e)) => {
            warn!(user_id = %user.user_id, error = %e, "Logout with unusable token");
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token")
        }

        Err(LogoutError::TokenRevocationFailed(ref e)) => {
            error!(user_id = %user.user_id, error = %e, "Token revocation failed during logout");
            ApiResponse::internal_error()
        }
    }
}
