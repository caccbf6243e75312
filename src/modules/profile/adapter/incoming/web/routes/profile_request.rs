use actix_web::HttpResponse;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::profile::application::domain::entities::{Gender, ProfileFields, ProfileValidationError};
use crate::shared::api::ApiResponse;

/// Body shared by profile create and update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileRequest {
    #[schema(example = "female")]
    pub gender: Gender,

    #[schema(example = "1990-05-17", value_type = String, format = Date)]
    pub date_of_birth: NaiveDate,

    #[serde(default)]
    pub bio: String,

    /// At most 250 characters
    #[serde(default)]
    pub info: String,

    /// Omit to use the Gravatar identicon for the account email
    #[schema(example = "https://cdn.example.com/me.png")]
    pub avatar: Option<String>,
}

impl From<ProfileRequest> for ProfileFields {
    fn from(req: ProfileRequest) -> Self {
        ProfileFields {
            gender: req.gender,
            date_of_birth: req.date_of_birth,
            bio: req.bio,
            info: req.info,
            avatar: req.avatar,
        }
    }
}

pub(super) fn map_validation_error(err: ProfileValidationError) -> HttpResponse {
    let code = match err {
        ProfileValidationError::BirthYearTooEarly | ProfileValidationError::TooYoung => {
            "INVALID_BIRTH_DATE"
        }
        ProfileValidationError::InfoTooLong => "INFO_TOO_LONG",
        ProfileValidationError::AvatarTooLong => "AVATAR_TOO_LONG",
    };
    ApiResponse::bad_request(code, &err.to_string())
}
