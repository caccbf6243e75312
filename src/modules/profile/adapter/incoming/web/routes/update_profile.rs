use actix_web::{put, web, HttpResponse, Responder};
use tracing::{error, info, warn};

use super::profile_request::{map_validation_error, ProfileRequest};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::profile::application::domain::entities::Profile;
use crate::profile::application::ports::incoming::use_cases::UpdateProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Update a profile
///
/// Only the owner may edit. A missing avatar is re-derived from Gravatar.
#[utoipa::path(
    put,
    path = "/api/profiles/{username}",
    tag = "profiles",
    params(("username" = String, Path, description = "Account username")),
    request_body = ProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = inline(SuccessResponse<Profile>)),
        (status = 400, description = "Invalid birth date, info or avatar", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the profile owner", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/profiles/{username}")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
    payload: web::Json<ProfileRequest>,
) -> impl Responder {
    let username = path.into_inner();

    match data
        .profile
        .update
        .execute(user.user_id, &username, payload.into_inner().into())
        .await
    {
        Ok(profile) => {
            info!(user_id = %user.user_id, username = %username, "Profile updated");
            ApiResponse::success(profile)
        }
        Err(e) => map_update_profile_error(e, &username),
    }
}

fn map_update_profile_error(err: UpdateProfileError, username: &str) -> HttpResponse {
    match err {
        UpdateProfileError::NotFound => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        UpdateProfileError::PermissionDenied => {
            warn!(username = %username, "Profile edit denied");
            ApiResponse::forbidden(
                "PERMISSION_DENIED",
                "You don't have permission to edit this profile",
            )
        }
        UpdateProfileError::Validation(v) => map_validation_error(v),
        UpdateProfileError::RepositoryError(e) => {
            error!(username = %username, error = %e, "Profile update failed");
            ApiResponse::internal_error()
        }
    }
}
