use actix_web::{delete, post, put, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use super::content_error::map_content_error;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::blog::application::domain::entities::{Post, PostDraft, PostStatus};
use crate::blog::application::ports::incoming::use_cases::{
    CreatePostError, DeletePostError, UpdatePostError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Body shared by post create and update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostRequest {
    #[schema(example = "Hello, Rust World!")]
    pub title: String,

    /// Derived from the title when omitted
    #[schema(example = "hello-rust-world")]
    pub slug: Option<String>,

    pub body: String,

    #[serde(default)]
    pub image_url: String,

    pub category_id: Uuid,

    #[serde(default)]
    pub status: PostStatus,

    /// Defaults to now on create and to the current value on update
    #[schema(value_type = Option<String>, format = DateTime)]
    pub publish: Option<DateTime<Utc>>,
}

impl From<PostRequest> for PostDraft {
    fn from(req: PostRequest) -> Self {
        PostDraft {
            title: req.title,
            slug: req.slug,
            body: req.body,
            image_url: req.image_url,
            category_id: req.category_id,
            status: req.status,
            publish: req.publish,
        }
    }
}

fn category_missing() -> HttpResponse {
    ApiResponse::bad_request("CATEGORY_NOT_FOUND", "Category does not exist")
}

fn slug_taken() -> HttpResponse {
    ApiResponse::conflict(
        "SLUG_TAKEN",
        "A post with this slug is already published on that date",
    )
}

/// Write a post
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = PostRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post created", body = inline(SuccessResponse<Post>)),
        (status = 400, description = "Invalid fields or unknown category", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Slug already used on that date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/posts")]
pub async fn create_post_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<PostRequest>,
) -> impl Responder {
    match data
        .blog
        .create_post
        .execute(user.user_id, payload.into_inner().into())
        .await
    {
        Ok(post) => {
            info!(user_id = %user.user_id, post_id = %post.id, "Post created");
            ApiResponse::created(post)
        }
        Err(CreatePostError::Validation(v)) => map_content_error(v),
        Err(CreatePostError::CategoryNotFound) => category_missing(),
        Err(CreatePostError::SlugTaken) => slug_taken(),
        Err(CreatePostError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Post create failed");
            ApiResponse::internal_error()
        }
    }
}

/// Edit a post
///
/// Only the author may edit.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = PostRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Post updated", body = inline(SuccessResponse<Post>)),
        (status = 400, description = "Invalid fields or unknown category", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 409, description = "Slug already used on that date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/posts/{id}")]
pub async fn update_post_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
    payload: web::Json<PostRequest>,
) -> impl Responder {
    let post_id = path.into_inner();

    match data
        .blog
        .update_post
        .execute(user.user_id, post_id, payload.into_inner().into())
        .await
    {
        Ok(post) => ApiResponse::success(post),
        Err(UpdatePostError::NotFound) => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),
        Err(UpdatePostError::PermissionDenied) => {
            warn!(user_id = %user.user_id, post_id = %post_id, "Post edit denied");
            ApiResponse::forbidden("PERMISSION_DENIED", "Only the author can edit this post")
        }
        Err(UpdatePostError::Validation(v)) => map_content_error(v),
        Err(UpdatePostError::CategoryNotFound) => category_missing(),
        Err(UpdatePostError::SlugTaken) => slug_taken(),
        Err(UpdatePostError::RepositoryError(e)) => {
            error!(post_id = %post_id, error = %e, "Post update failed");
            ApiResponse::internal_error()
        }
    }
}

/// Delete a post
///
/// Only the author may delete. Comments and reactions go with it.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/posts/{id}")]
pub async fn delete_post_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let post_id = path.into_inner();

    match data.blog.delete_post.execute(user.user_id, post_id).await {
        Ok(()) => {
            info!(user_id = %user.user_id, post_id = %post_id, "Post deleted");
            ApiResponse::no_content()
        }
        Err(DeletePostError::NotFound) => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),
        Err(DeletePostError::PermissionDenied) => {
            warn!(user_id = %user.user_id, post_id = %post_id, "Post delete denied");
            ApiResponse::forbidden("PERMISSION_DENIED", "Only the author can delete this post")
        }
        Err(DeletePostError::RepositoryError(e)) => {
            error!(post_id = %post_id, error = %e, "Post delete failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::application::services::{
        CreatePostService, DeletePostService, UpdatePostService,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{auth_app_data, bearer_for};
    use crate::tests::support::blog_fakes::InMemoryBlog;
    use actix_web::{http::StatusCode, test, App};

    async fn send(
        blog: &InMemoryBlog,
        req: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let state = TestAppStateBuilder::default()
            .with_create_post(CreatePostService::new(blog.clone(), blog.clone(), blog.clone()))
            .with_update_post(UpdatePostService::new(blog.clone(), blog.clone(), blog.clone()))
            .with_delete_post(DeletePostService::new(blog.clone(), blog.clone()))
            .build();
        let (provider, blacklist) = auth_app_data();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(provider)
                .app_data(blacklist)
                .app_data(crate::shared::api::custom_json_config())
                .service(create_post_handler)
                .service(update_post_handler)
                .service(delete_post_handler),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    fn body(category_id: Uuid, title: &str) -> serde_json::Value {
        serde_json::json!({
            "title": title,
            "body": "Once upon a time",
            "category_id": category_id,
            "status": "published",
            "publish": "2024-09-01T10:00:00Z"
        })
    }

    #[actix_web::test]
    async fn create_post_returns_created() {
        let blog = InMemoryBlog::default();
        let author = blog.add_user("uma");
        let cat = blog.add_category("Fiction");

        let resp = send(
            &blog,
            test::TestRequest::post()
                .uri("/api/posts")
                .insert_header(("Authorization", bearer_for(author, false)))
                .set_json(body(cat.id, "A Short Tale")),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["slug"], "a-short-tale");
        assert_eq!(json["data"]["status"], "published");
    }

    #[actix_web::test]
    async fn create_post_requires_auth() {
        let blog = InMemoryBlog::default();
        let cat = blog.add_category("Fiction");

        let resp = send(
            &blog,
            test::TestRequest::post()
                .uri("/api/posts")
                .set_json(body(cat.id, "Anon")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_category_is_bad_request() {
        let blog = InMemoryBlog::default();
        let author = blog.add_user("uma");

        let resp = send(
            &blog,
            test::TestRequest::post()
                .uri("/api/posts")
                .insert_header(("Authorization", bearer_for(author, false)))
                .set_json(body(Uuid::new_v4(), "Lost")),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["code"], "CATEGORY_NOT_FOUND");
    }

    #[actix_web::test]
    async fn duplicate_slug_same_day_conflicts() {
        let blog = InMemoryBlog::default();
        let author = blog.add_user("uma");
        let cat = blog.add_category("Fiction");

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let resp = send(
                &blog,
                test::TestRequest::post()
                    .uri("/api/posts")
                    .insert_header(("Authorization", bearer_for(author, false)))
                    .set_json(body(cat.id, "Twice")),
            )
            .await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn only_author_updates_and_deletes() {
        let blog = InMemoryBlog::default();
        let author = blog.add_user("uma");
        let cat = blog.add_category("Fiction");
        let post = blog.add_post(author, cat.id, "Mine", PostStatus::Published, Utc::now());
        let uri = format!("/api/posts/{}", post.id);

        let resp = send(
            &blog,
            test::TestRequest::put()
                .uri(&uri)
                .insert_header(("Authorization", bearer_for(Uuid::new_v4(), true)))
                .set_json(body(cat.id, "Stolen")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = send(
            &blog,
            test::TestRequest::put()
                .uri(&uri)
                .insert_header(("Authorization", bearer_for(author, false)))
                .set_json(body(cat.id, "Still Mine")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(
            &blog,
            test::TestRequest::delete()
                .uri(&uri)
                .insert_header(("Authorization", bearer_for(author, false))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(blog.post(post.id).is_none());
    }

    #[actix_web::test]
    async fn delete_missing_post_is_not_found() {
        let resp = send(
            &InMemoryBlog::default(),
            test::TestRequest::delete()
                .uri(&format!("/api/posts/{}", Uuid::new_v4()))
                .insert_header(("Authorization", bearer_for(Uuid::new_v4(), false))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
