pub mod modules;
pub use modules::auth;
pub use modules::blog;
pub use modules::email;
pub use modules::profile;
pub mod api;
pub mod config;
pub mod health;
pub mod shared;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::incoming::web::extractors::auth::{
    SharedTokenBlacklist, SharedTokenProvider, SharedUserQuery,
};
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::security::random_token_generator::RandomTokenGenerator;
use crate::auth::adapter::outgoing::{
    AccountTokenRepositoryPostgres, RedisTokenBlacklist, UserQueryPostgres, UserRepositoryPostgres,
};
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::incoming::PasswordPolicy;
use crate::auth::application::ports::outgoing::PasswordHasher;
use crate::auth::application::services::password::BasicPasswordPolicy;
use crate::auth::application::services::TokenIssuer;
use crate::auth::application::use_cases::{
    activate_account::ActivateAccountUseCase,
    create_user::{CreateUserUseCase, ICreateUserUseCase},
    login_user::LoginUserUseCase,
    logout_user::LogoutUseCase,
    request_password_reset::RequestPasswordResetUseCase,
    request_reactivation::RequestReactivationUseCase,
    reset_password::ResetPasswordUseCase,
};
use crate::auth::application::AccountUseCases;
use crate::blog::adapter::outgoing::{
    CategoryRepositoryPostgres, CommentRepositoryPostgres, InteractionLedgerPostgres,
    PostQueryPostgres, PostRepositoryPostgres,
};
use crate::blog::application::domain::reaction::{CommentTarget, PostTarget};
use crate::blog::application::services::{
    AddCommentService, CreateCategoryService, CreatePostService, DeleteCommentService,
    DeletePostService, GetPostService, ListCategoriesService, ListPostsService, ReactionService,
    ToggleCommentActiveService, UpdatePostService,
};
use crate::blog::application::BlogUseCases;
use crate::config::{AppConfig, SmtpConfig};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::{AccountNotifier, EmailSender};
use crate::email::application::services::AccountEmailService;
use crate::profile::adapter::outgoing::{ProfileQueryPostgres, ProfileRepositoryPostgres};
use crate::profile::application::services::{
    CreateProfileService, GetProfileService, UpdateProfileService,
};
use crate::profile::application::ProfileUseCases;
use crate::shared::api::{custom_json_config, custom_query_config};

use actix_web::{web, App, HttpServer};
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountUseCases,
    pub profile: ProfileUseCases,
    pub blog: BlogUseCases,
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!(error = %e, "{context}");
    std::io::Error::other(format!("{context}: {e}"))
}

#[cfg(not(tarpaulin_include))]
fn build_accounts(
    db: &Arc<DatabaseConnection>,
    blacklist: SharedTokenBlacklist,
    token_provider: SharedTokenProvider,
    notifier: Arc<dyn AccountNotifier>,
) -> std::io::Result<AccountUseCases> {
    let user_query = UserQueryPostgres::new(Arc::clone(db));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(db));

    let hasher: Arc<dyn PasswordHasher> = Arc::new(
        Argon2Hasher::from_env().map_err(|e| startup_error("Invalid Argon2 parameters", e))?,
    );
    let policy: Arc<dyn PasswordPolicy> = Arc::new(BasicPasswordPolicy);

    let issuer = TokenIssuer::new(
        Arc::new(AccountTokenRepositoryPostgres::new(Arc::clone(db))),
        Arc::new(RandomTokenGenerator),
    );

    let create_user: Arc<dyn ICreateUserUseCase + Send + Sync> = Arc::new(CreateUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        Arc::clone(&hasher),
        Arc::clone(&policy),
    ));

    Ok(AccountUseCases {
        register: Arc::new(UserRegistrationOrchestrator::new(
            create_user,
            issuer.clone(),
            Arc::clone(&notifier),
        )),
        activate: Arc::new(ActivateAccountUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            issuer.clone(),
        )),
        request_reactivation: Arc::new(RequestReactivationUseCase::new(
            user_query.clone(),
            issuer.clone(),
            Arc::clone(&notifier),
        )),
        login: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            Arc::clone(&hasher),
            token_provider.clone(),
        )),
        logout: Arc::new(LogoutUseCase::new(blacklist, token_provider)),
        request_password_reset: Arc::new(RequestPasswordResetUseCase::new(
            user_query.clone(),
            issuer.clone(),
            notifier,
        )),
        reset_password: Arc::new(ResetPasswordUseCase::new(
            user_query, user_repo, issuer, hasher, policy,
        )),
    })
}

#[cfg(not(tarpaulin_include))]
fn build_profiles(db: &Arc<DatabaseConnection>) -> ProfileUseCases {
    let repository = ProfileRepositoryPostgres::new(Arc::clone(db));
    let query = ProfileQueryPostgres::new(Arc::clone(db));

    ProfileUseCases {
        create: Arc::new(CreateProfileService::new(
            repository.clone(),
            query.clone(),
            UserQueryPostgres::new(Arc::clone(db)),
        )),
        get: Arc::new(GetProfileService::new(query.clone())),
        update: Arc::new(UpdateProfileService::new(repository, query)),
    }
}

#[cfg(not(tarpaulin_include))]
fn build_blog(db: &Arc<DatabaseConnection>) -> BlogUseCases {
    let categories = CategoryRepositoryPostgres::new(Arc::clone(db));
    let post_query = PostQueryPostgres::new(Arc::clone(db));
    let post_repo = PostRepositoryPostgres::new(Arc::clone(db));
    let comments = CommentRepositoryPostgres::new(Arc::clone(db));
    let post_ledger = InteractionLedgerPostgres::<PostTarget>::new(Arc::clone(db));
    let comment_ledger = InteractionLedgerPostgres::<CommentTarget>::new(Arc::clone(db));

    BlogUseCases {
        list_categories: Arc::new(ListCategoriesService::new(categories.clone())),
        create_category: Arc::new(CreateCategoryService::new(categories.clone())),
        list_posts: Arc::new(ListPostsService::new(post_query.clone())),
        get_post: Arc::new(GetPostService::new(
            post_query.clone(),
            comments.clone(),
            post_ledger.clone(),
        )),
        create_post: Arc::new(CreatePostService::new(
            post_repo.clone(),
            post_query.clone(),
            categories.clone(),
        )),
        update_post: Arc::new(UpdatePostService::new(
            post_repo.clone(),
            post_query.clone(),
            categories,
        )),
        delete_post: Arc::new(DeletePostService::new(post_repo, post_query.clone())),
        add_comment: Arc::new(AddCommentService::new(comments.clone(), post_query)),
        delete_comment: Arc::new(DeleteCommentService::new(comments.clone())),
        toggle_comment: Arc::new(ToggleCommentActiveService::new(comments)),
        post_reactions: Arc::new(ReactionService::<PostTarget, _>::new(post_ledger)),
        comment_reactions: Arc::new(ReactionService::<CommentTarget, _>::new(comment_ledger)),
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Redis TLS needs a process-wide provider; a second install is harmless.
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let jwt_config = JwtConfig::from_env().map_err(|e| startup_error("Invalid JWT config", e))?;

    // SMTP
    let sender: Arc<dyn EmailSender> = match &config.smtp {
        SmtpConfig::Local { host, port } => {
            info!(host = %host, port, "Using local SMTP catcher");
            Arc::new(SmtpEmailSender::new_local(host, *port))
        }
        SmtpConfig::Relay {
            server,
            username,
            password,
        } => Arc::new(
            SmtpEmailSender::new(server, username, password)
                .map_err(|e| startup_error("Failed to build SMTP transport", e))?,
        ),
    };
    let notifier: Arc<dyn AccountNotifier> = Arc::new(AccountEmailService::new(
        sender,
        &config.site_url,
        &config.email_from,
    ));

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db_arc = Arc::new(
        Database::connect(opt)
            .await
            .map_err(|e| startup_error("Failed to connect to database", e))?,
    );

    // Redis connection
    let redis_arc = Arc::new(
        Config::from_url(&config.redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| startup_error("Failed to create Redis pool", e))?,
    );

    let token_provider: SharedTokenProvider = Arc::new(JwtTokenService::new(jwt_config));
    let blacklist: SharedTokenBlacklist =
        Arc::new(RedisTokenBlacklist::new(Arc::clone(&redis_arc)));

    let user_query: SharedUserQuery = Arc::new(UserQueryPostgres::new(Arc::clone(&db_arc)));

    let state = AppState {
        accounts: build_accounts(
            &db_arc,
            Arc::clone(&blacklist),
            Arc::clone(&token_provider),
            notifier,
        )?,
        profile: build_profiles(&db_arc),
        blog: build_blog(&db_arc),
    };

    let server_url = config.bind_address();
    info!(address = %server_url, "Server listening");

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&blacklist)))
            .app_data(web::Data::new(Arc::clone(&user_query)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes as accounts;
    use crate::blog::adapter::incoming::web::routes as blog;
    use crate::profile::adapter::incoming::web::routes as profiles;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Accounts
    cfg.service(accounts::register_user_handler);
    cfg.service(accounts::activate_account_handler);
    cfg.service(accounts::request_reactivation_handler);
    cfg.service(accounts::login_user_handler);
    cfg.service(accounts::logout_user_handler);
    cfg.service(accounts::request_password_reset_handler);
    cfg.service(accounts::reset_password_handler);
    // Profiles
    cfg.service(profiles::create_profile_handler);
    cfg.service(profiles::get_profile_handler);
    cfg.service(profiles::update_profile_handler);
    // Categories
    cfg.service(blog::list_categories_handler);
    cfg.service(blog::create_category_handler);
    // Posts: literal segments before `{id}`
    cfg.service(blog::list_posts_handler);
    cfg.service(blog::search_posts_handler);
    cfg.service(blog::posts_by_category_handler);
    cfg.service(blog::posts_by_author_handler);
    cfg.service(blog::get_post_handler);
    cfg.service(blog::create_post_handler);
    cfg.service(blog::update_post_handler);
    cfg.service(blog::delete_post_handler);
    // Comments
    cfg.service(blog::add_comment_handler);
    cfg.service(blog::delete_comment_handler);
    cfg.service(blog::toggle_comment_active_handler);
    // Reactions
    cfg.service(blog::like_post_handler);
    cfg.service(blog::dislike_post_handler);
    cfg.service(blog::post_reactions_handler);
    cfg.service(blog::like_comment_handler);
    cfg.service(blog::dislike_comment_handler);
    cfg.service(blog::comment_reactions_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
