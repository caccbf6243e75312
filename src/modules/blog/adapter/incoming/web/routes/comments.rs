use actix_web::{delete, post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use super::content_error::map_content_error;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::domain::entities::Comment;
use crate::blog::application::ports::incoming::use_cases::{AddCommentError, ModerateCommentError};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    /// 1 to 255 characters
    #[schema(example = "Great read, thanks!")]
    pub body: String,
}

fn map_moderation_error(err: ModerateCommentError, user: &AuthenticatedUser, comment_id: Uuid) -> HttpResponse {
    match err {
        ModerateCommentError::NotFound => {
            ApiResponse::not_found("COMMENT_NOT_FOUND", "Comment not found")
        }
        ModerateCommentError::PermissionDenied => {
            warn!(user_id = %user.user_id, comment_id = %comment_id, "Comment moderation denied");
            ApiResponse::forbidden(
                "PERMISSION_DENIED",
                "You don't have permission to change this comment",
            )
        }
        ModerateCommentError::RepositoryError(e) => {
            error!(comment_id = %comment_id, error = %e, "Comment moderation failed");
            ApiResponse::internal_error()
        }
    }
}

/// Comment on a post
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = CommentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Comment added", body = inline(SuccessResponse<Comment>)),
        (status = 400, description = "Empty or too long", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No published post with this id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/posts/{id}/comments")]
pub async fn add_comment_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
    payload: web::Json<CommentRequest>,
) -> impl Responder {
    let post_id = path.into_inner();

    match data
        .blog
        .add_comment
        .execute(user.user_id, post_id, payload.into_inner().body)
        .await
    {
        Ok(comment) => {
            info!(user_id = %user.user_id, post_id = %post_id, comment_id = %comment.id, "Comment added");
            ApiResponse::created(comment)
        }
        Err(AddCommentError::PostNotFound) => {
            ApiResponse::not_found("POST_NOT_FOUND", "Post not found")
        }
        Err(AddCommentError::Validation(v)) => map_content_error(v),
        Err(AddCommentError::RepositoryError(e)) => {
            error!(post_id = %post_id, error = %e, "Comment create failed");
            ApiResponse::internal_error()
        }
    }
}

/// Delete a comment
///
/// The comment author or a superuser.
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Neither author nor superuser", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/comments/{id}")]
pub async fn delete_comment_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let comment_id = path.into_inner();

    match data.blog.delete_comment.execute((&user).into(), comment_id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => map_moderation_error(e, &user, comment_id),
    }
}

/// Hide or show a comment
///
/// Superusers only. Flips the active flag and returns the comment.
#[utoipa::path(
    post,
    path = "/api/comments/{id}/toggle-active",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment with its new flag", body = inline(SuccessResponse<Comment>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not a superuser", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/comments/{id}/toggle-active")]
pub async fn toggle_comment_active_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let comment_id = path.into_inner();

    match data.blog.toggle_comment.execute((&user).into(), comment_id).await {
        Ok(comment) => {
            info!(user_id = %user.user_id, comment_id = %comment_id, active = comment.active, "Comment toggled");
            ApiResponse::success(comment)
        }
        Err(e) => map_moderation_error(e, &user, comment_id),
    }
}
