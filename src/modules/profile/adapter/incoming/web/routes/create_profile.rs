use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, info, warn};

use super::profile_request::{map_validation_error, ProfileRequest};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::profile::application::domain::entities::Profile;
use crate::profile::application::ports::incoming::use_cases::CreateProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Create your profile
///
/// Each account can have exactly one profile.
#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "profiles",
    request_body = ProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Profile created", body = inline(SuccessResponse<Profile>)),
        (status = 400, description = "Invalid birth date, info or avatar", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Profile already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/profiles")]
pub async fn create_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<ProfileRequest>,
) -> impl Responder {
    info!(user_id = %user.user_id, "Profile create request");

    match data
        .profile
        .create
        .execute(user.user_id, payload.into_inner().into())
        .await
    {
        Ok(profile) => ApiResponse::created(profile),
        Err(e) => map_create_profile_error(e, &user),
    }
}

fn map_create_profile_error(err: CreateProfileError, user: &AuthenticatedUser) -> HttpResponse {
    match err {
        CreateProfileError::ProfileAlreadyExists => {
            warn!(user_id = %user.user_id, "Profile already exists");
            ApiResponse::conflict("PROFILE_ALREADY_EXISTS", "You already have a profile")
        }
        CreateProfileError::Validation(v) => map_validation_error(v),
        CreateProfileError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        CreateProfileError::RepositoryError(e) => {
            error!(user_id = %user.user_id, error = %e, "Profile create failed");
            ApiResponse::internal_error()
        }
    }
}
