use actix_web::web;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::incoming::web::extractors::auth::{SharedTokenBlacklist, SharedTokenProvider};
use crate::auth::application::ports::outgoing::token_provider::{SessionLifetime, TokenProvider};
use crate::tests::support::fakes::InMemoryBlacklist;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret_key: std::env::var("TEST_JWT_SECRET")
            .unwrap_or_else(|_| "FAKE_JWT_SECRET_DO_NOT_USE_0123456789".to_string()),
        issuer: "blog_platform_test".to_string(),
        access_token_expiry: 3600,
        remember_me_token_expiry: 604800,
    }
}

pub fn test_token_service() -> JwtTokenService {
    JwtTokenService::new(test_jwt_config())
}

/// `Authorization` header value for a freshly signed access token.
pub fn bearer_for(user_id: Uuid, is_superuser: bool) -> String {
    let issued = test_token_service()
        .generate_access_token(user_id, is_superuser, SessionLifetime::Standard)
        .expect("test token should sign");
    format!("Bearer {}", issued.token)
}

/// Token provider and an empty blacklist, ready for `App::app_data`.
pub fn auth_app_data() -> (
    web::Data<SharedTokenProvider>,
    web::Data<SharedTokenBlacklist>,
) {
    (
        web::Data::new(Arc::new(test_token_service()) as SharedTokenProvider),
        web::Data::new(Arc::new(InMemoryBlacklist::default()) as SharedTokenBlacklist),
    )
}
