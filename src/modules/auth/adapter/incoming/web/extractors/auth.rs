use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::{
    TokenBlacklistRepository, TokenProvider, UserQuery,
};
use crate::auth::application::services::hash::hash_token;
use crate::shared::api::ApiResponse;

/// Shapes registered with `App::app_data` for the extractor to find.
pub type SharedTokenProvider = Arc<dyn TokenProvider + Send + Sync>;
pub type SharedTokenBlacklist = Arc<dyn TokenBlacklistRepository + Send + Sync>;
/// Optional. When registered, a superuser claim is confirmed against the
/// stored account so a revoked flag takes effect before the token expires.
pub type SharedUserQuery = Arc<dyn UserQuery + Send + Sync>;

/// Caller identified by a valid, non-revoked bearer token.
///
/// Handlers that also serve anonymous callers take `Option<AuthenticatedUser>`;
/// any rejection then becomes `None`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub is_superuser: bool,
    /// The raw bearer token, kept for logout.
    pub token: String,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_provider = req.app_data::<web::Data<SharedTokenProvider>>().cloned();
        let blacklist = req.app_data::<web::Data<SharedTokenBlacklist>>().cloned();
        let user_query = req.app_data::<web::Data<SharedUserQuery>>().cloned();
        let token = extract_token_from_header(req);

        Box::pin(async move {
            let (Some(token_provider), Some(blacklist)) = (token_provider, blacklist) else {
                tracing::error!("Auth extractor used without token provider or blacklist");
                return Err(create_api_error(ApiResponse::internal_error()));
            };

            let token = token.ok_or_else(|| {
                create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))
            })?;

            let claims = token_provider.verify_token(&token).map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN",
                    "Invalid or expired token",
                ))
            })?;

            match blacklist.is_token_blacklisted(&hash_token(&token)).await {
                Ok(false) => {}
                Ok(true) => {
                    tracing::info!(user_id = %claims.sub, "Revoked token presented");
                    return Err(create_api_error(ApiResponse::unauthorized(
                        "TOKEN_REVOKED",
                        "Token has been revoked",
                    )));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Blacklist lookup failed");
                    return Err(create_api_error(ApiResponse::internal_error()));
                }
            }

            let is_superuser = match (claims.is_superuser, user_query) {
                (true, Some(query)) => match query.find_by_id(claims.sub).await {
                    Ok(user) => user.is_some_and(|u| u.is_active && u.is_superuser),
                    Err(e) => {
                        tracing::error!(error = %e, "Superuser lookup failed");
                        return Err(create_api_error(ApiResponse::internal_error()));
                    }
                },
                (claimed, _) => claimed,
            };

            Ok(AuthenticatedUser {
                user_id: claims.sub,
                is_superuser,
                token,
            })
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
