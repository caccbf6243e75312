use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{debug, error};
use utoipa::IntoParams;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::blog::application::domain::entities::PostView;
use crate::blog::application::domain::search::PostFilter;
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{PageQuery, PageRequest, PageResult};
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Exact author username
    pub author: Option<String>,
    /// Case-insensitive part of the title
    pub title: Option<String>,
    /// Case-insensitive part of the title or body
    pub q: Option<String>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; any non-word separator works
    pub date: Option<String>,
    /// Page number (1-based)
    pub page: Option<String>,
}

async fn page_of(data: &AppState, filter: PostFilter, page: PageRequest) -> HttpResponse {
    debug!(?filter, page = page.page, "Listing posts");

    match data.blog.list_posts.execute(filter, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => {
            error!(error = %e, "Post listing failed");
            ApiResponse::internal_error()
        }
    }
}

/// Published posts, newest first
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of posts", body = inline(SuccessResponse<PageResult<PostView>>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts")]
pub async fn list_posts_handler(
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    page_of(&data, PostFilter::default(), (&*query).into()).await
}

/// Search published posts
///
/// Every supplied parameter must match. A malformed date is rejected.
#[utoipa::path(
    get,
    path = "/api/posts/search",
    tag = "posts",
    params(SearchQuery),
    responses(
        (status = 200, description = "One page of matches", body = inline(SuccessResponse<PageResult<PostView>>)),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts/search")]
pub async fn search_posts_handler(
    data: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let filter = match PostFilter::search(
        query.author.as_deref(),
        query.title.as_deref(),
        query.q.as_deref(),
        query.date.as_deref(),
    ) {
        Ok(filter) => filter,
        Err(e) => return ApiResponse::bad_request("INVALID_DATE", &e.to_string()),
    };

    page_of(&data, filter, PageRequest::from_raw(query.page.as_deref())).await
}

/// Published posts in a category
#[utoipa::path(
    get,
    path = "/api/posts/category/{slug}",
    tag = "posts",
    params(("slug" = String, Path, description = "Category slug"), PageQuery),
    responses(
        (status = 200, description = "One page of posts", body = inline(SuccessResponse<PageResult<PostView>>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts/category/{slug}")]
pub async fn posts_by_category_handler(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    page_of(&data, PostFilter::by_category(&path), (&*query).into()).await
}

/// Published posts by an author
#[utoipa::path(
    get,
    path = "/api/posts/author/{username}",
    tag = "posts",
    params(("username" = String, Path, description = "Author username"), PageQuery),
    responses(
        (status = 200, description = "One page of posts", body = inline(SuccessResponse<PageResult<PostView>>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts/author/{username}")]
pub async fn posts_by_author_handler(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    page_of(&data, PostFilter::by_author(&path), (&*query).into()).await
}
