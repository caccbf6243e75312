use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    EmailRequest, LoginRequestDto, NewPasswordRequest, RegisterRequest, RegisterResponse,
    RegisteredUser,
};
use crate::auth::application::use_cases::login_user::{LoginUserResponse, UserInfo};
use crate::blog::adapter::incoming::web::routes::{
    CommentRequest, CreateCategoryRequest, PostRequest,
};
use crate::blog::application::domain::entities::{
    Category, Comment, CommentView, Post, PostStatus, PostView,
};
use crate::blog::application::domain::reaction::{Reaction, ReactionSummary};
use crate::blog::application::ports::incoming::use_cases::PostDetail;
use crate::profile::adapter::incoming::web::routes::ProfileRequest;
use crate::profile::application::domain::entities::{Gender, Profile};
use crate::profile::application::ports::outgoing::RecentPost;
use crate::shared::api::MessageBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Platform API",
        version = "1.0.0",
        description = "Accounts, author profiles, posts, comments and reactions",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Accounts
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::activate_account_handler,
        crate::auth::adapter::incoming::web::routes::request_reactivation_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::request_password_reset_handler,
        crate::auth::adapter::incoming::web::routes::reset_password_handler,

        // Profiles
        crate::profile::adapter::incoming::web::routes::create_profile_handler,
        crate::profile::adapter::incoming::web::routes::get_profile_handler,
        crate::profile::adapter::incoming::web::routes::update_profile_handler,

        // Categories
        crate::blog::adapter::incoming::web::routes::list_categories_handler,
        crate::blog::adapter::incoming::web::routes::create_category_handler,

        // Posts
        crate::blog::adapter::incoming::web::routes::list_posts_handler,
        crate::blog::adapter::incoming::web::routes::search_posts_handler,
        crate::blog::adapter::incoming::web::routes::posts_by_category_handler,
        crate::blog::adapter::incoming::web::routes::posts_by_author_handler,
        crate::blog::adapter::incoming::web::routes::get_post_handler,
        crate::blog::adapter::incoming::web::routes::create_post_handler,
        crate::blog::adapter::incoming::web::routes::update_post_handler,
        crate::blog::adapter::incoming::web::routes::delete_post_handler,

        // Comments
        crate::blog::adapter::incoming::web::routes::add_comment_handler,
        crate::blog::adapter::incoming::web::routes::delete_comment_handler,
        crate::blog::adapter::incoming::web::routes::toggle_comment_active_handler,

        // Reactions
        crate::blog::adapter::incoming::web::routes::like_post_handler,
        crate::blog::adapter::incoming::web::routes::dislike_post_handler,
        crate::blog::adapter::incoming::web::routes::post_reactions_handler,
        crate::blog::adapter::incoming::web::routes::like_comment_handler,
        crate::blog::adapter::incoming::web::routes::dislike_comment_handler,
        crate::blog::adapter::incoming::web::routes::comment_reactions_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,
            MessageBody,

            // Account DTOs
            RegisterRequest,
            RegisterResponse,
            RegisteredUser,
            EmailRequest,
            NewPasswordRequest,
            LoginRequestDto,
            LoginUserResponse,
            UserInfo,

            // Profiles
            ProfileRequest,
            Profile,
            Gender,
            RecentPost,

            // Blog
            CreateCategoryRequest,
            PostRequest,
            CommentRequest,
            Category,
            Post,
            PostStatus,
            PostView,
            PostDetail,
            Comment,
            CommentView,
            Reaction,
            ReactionSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "accounts", description = "Registration, activation, login and password reset"),
        (name = "profiles", description = "Author profiles"),
        (name = "categories", description = "Post categories"),
        (name = "posts", description = "Post publishing, listing and search"),
        (name = "comments", description = "Comments on posts"),
        (name = "reactions", description = "Likes and dislikes on posts and comments"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/accounts/login"))
                        .build(),
                ),
            )
        }
    }
}
