use actix_web::{get, web, Responder};
use chrono::NaiveDate;
use tracing::{debug, error};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::ports::incoming::use_cases::{GetPostError, PostDetail};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Read a published post
///
/// Includes active comments and reaction counts. With a bearer token the
/// caller's own reaction is filled in.
#[utoipa::path(
    get,
    path = "/api/posts/{year}/{month}/{day}/{slug}",
    tag = "posts",
    params(
        ("year" = i32, Path, description = "Publish year"),
        ("month" = u32, Path, description = "Publish month"),
        ("day" = u32, Path, description = "Publish day"),
        ("slug" = String, Path, description = "Post slug"),
    ),
    responses(
        (status = 200, description = "Post detail", body = inline(SuccessResponse<PostDetail>)),
        (status = 404, description = "No published post at this address", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts/{year}/{month}/{day}/{slug}")]
pub async fn get_post_handler(
    user: Option<AuthenticatedUser>,
    path: web::Path<(i32, u32, u32, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (year, month, day, slug) = path.into_inner();

    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        debug!(year, month, day, "Impossible publish date in URL");
        return ApiResponse::not_found("POST_NOT_FOUND", "Post not found");
    };

    match data
        .blog
        .get_post
        .execute(date, &slug, user.map(|u| u.user_id))
        .await
    {
        Ok(detail) => ApiResponse::success(detail),
        Err(GetPostError::NotFound) => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),
        Err(GetPostError::QueryFailed(e)) => {
            error!(slug = %slug, error = %e, "Post fetch failed");
            ApiResponse::internal_error()
        }
    }
}
