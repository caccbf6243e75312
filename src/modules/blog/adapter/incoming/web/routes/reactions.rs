use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::domain::reaction::{Reaction, ReactionSummary};
use crate::blog::application::ports::incoming::use_cases::{ReactionError, ReactionUseCase};
use crate::shared::api::ApiResponse;
use crate::AppState;

fn reaction_response(
    result: Result<ReactionSummary, ReactionError>,
    kind: &str,
    target_id: Uuid,
) -> HttpResponse {
    match result {
        Ok(summary) => ApiResponse::success(summary),
        Err(ReactionError::TargetNotFound) => {
            ApiResponse::not_found("NOT_FOUND", &format!("The {kind} does not exist"))
        }
        Err(ReactionError::RepositoryError(e)) => {
            error!(kind, target_id = %target_id, error = %e, "Reaction failed");
            ApiResponse::internal_error()
        }
    }
}

async fn toggle(
    reactions: &(dyn ReactionUseCase + Send + Sync),
    kind: &str,
    user: &AuthenticatedUser,
    target_id: Uuid,
    pressed: Reaction,
) -> HttpResponse {
    let result = reactions.toggle(user.user_id, target_id, pressed).await;
    if result.is_ok() {
        info!(kind, user_id = %user.user_id, target_id = %target_id, ?pressed, "Reaction toggled");
    }
    reaction_response(result, kind, target_id)
}

/// Like a post, or take the like back
#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "reactions",
    params(("id" = Uuid, Path, description = "Post id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts after the toggle", body = inline(SuccessResponse<ReactionSummary>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No published post with this id", body = ErrorResponse),
    )
)]
#[post("/api/posts/{id}/like")]
pub async fn like_post_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    toggle(&*data.blog.post_reactions, "post", &user, path.into_inner(), Reaction::Like).await
}

/// Dislike a post, or take the dislike back
#[utoipa::path(
    post,
    path = "/api/posts/{id}/dislike",
    tag = "reactions",
    params(("id" = Uuid, Path, description = "Post id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts after the toggle", body = inline(SuccessResponse<ReactionSummary>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No published post with this id", body = ErrorResponse),
    )
)]
#[post("/api/posts/{id}/dislike")]
pub async fn dislike_post_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    toggle(&*data.blog.post_reactions, "post", &user, path.into_inner(), Reaction::Dislike).await
}

/// Reaction counts for a post
#[utoipa::path(
    get,
    path = "/api/posts/{id}/reactions",
    tag = "reactions",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Counts and the caller's reaction", body = inline(SuccessResponse<ReactionSummary>)),
        (status = 404, description = "No published post with this id", body = ErrorResponse),
    )
)]
#[get("/api/posts/{id}/reactions")]
pub async fn post_reactions_handler(
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let post_id = path.into_inner();
    let result = data
        .blog
        .post_reactions
        .summary(post_id, user.map(|u| u.user_id))
        .await;
    reaction_response(result, "post", post_id)
}

/// Like a comment, or take the like back
#[utoipa::path(
    post,
    path = "/api/comments/{id}/like",
    tag = "reactions",
    params(("id" = Uuid, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts after the toggle", body = inline(SuccessResponse<ReactionSummary>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No active comment with this id", body = ErrorResponse),
    )
)]
#[post("/api/comments/{id}/like")]
pub async fn like_comment_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    toggle(&*data.blog.comment_reactions, "comment", &user, path.into_inner(), Reaction::Like).await
}

/// Dislike a comment, or take the dislike back
#[utoipa::path(
    post,
    path = "/api/comments/{id}/dislike",
    tag = "reactions",
    params(("id" = Uuid, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts after the toggle", body = inline(SuccessResponse<ReactionSummary>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No active comment with this id", body = ErrorResponse),
    )
)]
#[post("/api/comments/{id}/dislike")]
pub async fn dislike_comment_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    toggle(
        &*data.blog.comment_reactions,
        "comment",
        &user,
        path.into_inner(),
        Reaction::Dislike,
    )
    .await
}

/// Reaction counts for a comment
#[utoipa::path(
    get,
    path = "/api/comments/{id}/reactions",
    tag = "reactions",
    params(("id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Counts and the caller's reaction", body = inline(SuccessResponse<ReactionSummary>)),
        (status = 404, description = "No active comment with this id", body = ErrorResponse),
    )
)]
#[get("/api/comments/{id}/reactions")]
pub async fn comment_reactions_handler(
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let comment_id = path.into_inner();
    let result = data
        .blog
        .comment_reactions
        .summary(comment_id, user.map(|u| u.user_id))
        .await;
    reaction_response(result, "comment", comment_id)
}
