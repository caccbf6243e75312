use actix_web::{get, web, Responder};
use tracing::{error, info};

use crate::api::schemas::ErrorResponse;
use crate::profile::application::ports::incoming::use_cases::GetProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Public profile page
///
/// Returns the profile, the owner's names and up to four of their latest
/// published posts.
#[utoipa::path(
    get,
    path = "/api/profiles/{username}",
    tag = "profiles",
    params(("username" = String, Path, description = "Account username")),
    responses(
        (status = 200, description = "Profile with recent posts"),
        (status = 404, description = "No profile for this username", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/profiles/{username}")]
pub async fn get_profile_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let username = path.into_inner();

    match data.profile.get.execute(&username).await {
        Ok(detail) => {
            info!(username = %username, posts = detail.posts.len(), "Profile fetched");
            ApiResponse::success(detail)
        }
        Err(GetProfileError::NotFound) => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        Err(GetProfileError::QueryFailed(e)) => {
            error!(username = %username, error = %e, "Profile fetch failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::application::domain::entities::{Gender, Profile};
    use crate::profile::application::ports::incoming::use_cases::{
        GetProfileUseCase, ProfileDetail,
    };
    use crate::profile::application::ports::outgoing::{ProfileView, RecentPost};
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    struct MockGetProfile;

    #[async_trait]
    impl GetProfileUseCase for MockGetProfile {
        async fn execute(&self, username: &str) -> Result<ProfileDetail, GetProfileError> {
            match username {
                "erin" => Ok(ProfileDetail {
                    profile: ProfileView {
                        profile: Profile {
                            id: Uuid::new_v4(),
                            user_id: Uuid::new_v4(),
                            gender: Gender::Female,
                            date_of_birth: NaiveDate::from_ymd_opt(1992, 7, 7).unwrap(),
                            bio: "bio".to_string(),
                            info: "info".to_string(),
                            avatar: "https://cdn.example.com/e.png".to_string(),
                            created_at: Utc::now(),
                            updated_at: Utc::now(),
                        },
                        username: "erin".to_string(),
                        first_name: "Erin".to_string(),
                        last_name: "Vale".to_string(),
                        email: "erin@example.com".to_string(),
                    },
                    posts: vec![RecentPost {
                        id: Uuid::new_v4(),
                        title: "Hello".to_string(),
                        slug: "hello".to_string(),
                        image_url: String::new(),
                        publish: Utc::now(),
                    }],
                }),
                "broken" => Err(GetProfileError::QueryFailed("timeout".to_string())),
                _ => Err(GetProfileError::NotFound),
            }
        }
    }

    async fn get(uri: &str) -> actix_web::dev::ServiceResponse {
        let state = TestAppStateBuilder::default()
            .with_get_profile(MockGetProfile)
            .build();
        let app =
            test::init_service(App::new().app_data(state).service(get_profile_handler)).await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
    }

    #[actix_web::test]
    async fn get_profile_returns_profile_and_posts() {
        let resp = get("/api/profiles/erin").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["profile"]["username"], "erin");
        assert_eq!(json["data"]["profile"]["first_name"], "Erin");
        assert!(json["data"]["profile"].get("email").is_none());
        assert_eq!(json["data"]["posts"][0]["slug"], "hello");
    }

    #[actix_web::test]
    async fn get_profile_missing_is_not_found() {
        let resp = get("/api/profiles/ghost").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["code"], "PROFILE_NOT_FOUND");
    }

    #[actix_web::test]
    async fn get_profile_query_failure_is_internal() {
        let resp = get("/api/profiles/broken").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
