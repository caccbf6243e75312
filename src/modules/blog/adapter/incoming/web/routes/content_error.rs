use actix_web::HttpResponse;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::domain::entities::{Actor, ContentValidationError};
use crate::shared::api::ApiResponse;

pub(super) fn map_content_error(err: ContentValidationError) -> HttpResponse {
    let code = match err {
        ContentValidationError::InvalidCategoryName => "INVALID_CATEGORY_NAME",
        ContentValidationError::InvalidSlug => "INVALID_SLUG",
        ContentValidationError::InvalidTitle => "INVALID_TITLE",
        ContentValidationError::EmptyBody => "EMPTY_BODY",
        ContentValidationError::ImageUrlTooLong => "IMAGE_URL_TOO_LONG",
        ContentValidationError::InvalidComment => "INVALID_COMMENT",
    };
    ApiResponse::bad_request(code, &err.to_string())
}

impl From<&AuthenticatedUser> for Actor {
    fn from(user: &AuthenticatedUser) -> Self {
        Actor {
            user_id: user.user_id,
            is_superuser: user.is_superuser,
        }
    }
}
