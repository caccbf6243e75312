use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::content_error::map_content_error;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::domain::entities::Category;
use crate::blog::application::ports::incoming::use_cases::CreateCategoryError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Web Development")]
    pub name: String,

    /// Derived from the name when omitted
    #[schema(example = "web-development")]
    pub slug: Option<String>,
}

/// List categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories by name", body = inline(SuccessResponse<Vec<Category>>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/categories")]
pub async fn list_categories_handler(data: web::Data<AppState>) -> impl Responder {
    match data.blog.list_categories.execute().await {
        Ok(categories) => ApiResponse::success(categories),
        Err(e) => {
            error!(error = %e, "Category listing failed");
            ApiResponse::internal_error()
        }
    }
}

/// Create a category
///
/// Superusers only.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = inline(SuccessResponse<Category>)),
        (status = 400, description = "Invalid name or slug", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not a superuser", body = ErrorResponse),
        (status = 409, description = "Name or slug already used", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/categories")]
pub async fn create_category_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<CreateCategoryRequest>,
) -> impl Responder {
    let CreateCategoryRequest { name, slug } = payload.into_inner();

    match data
        .blog
        .create_category
        .execute((&user).into(), name, slug)
        .await
    {
        Ok(category) => {
            info!(user_id = %user.user_id, slug = %category.slug, "Category created");
            ApiResponse::created(category)
        }
        Err(e) => map_create_category_error(e, &user),
    }
}

fn map_create_category_error(err: CreateCategoryError, user: &AuthenticatedUser) -> HttpResponse {
    match err {
        CreateCategoryError::PermissionDenied => {
            warn!(user_id = %user.user_id, "Category create denied");
            ApiResponse::forbidden(
                "PERMISSION_DENIED",
                "Only superusers can create categories",
            )
        }
        CreateCategoryError::Validation(v) => map_content_error(v),
        CreateCategoryError::AlreadyExists => {
            ApiResponse::conflict("CATEGORY_ALREADY_EXISTS", "Category already exists")
        }
        CreateCategoryError::RepositoryError(e) => {
            error!(user_id = %user.user_id, error = %e, "Category create failed");
            ApiResponse::internal_error()
        }
    }
}
