use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;
use tracing;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::token_provider::{
    IssuedToken, SessionLifetime, TokenClaims, TokenError, TokenProvider,
};

use super::jwt_config::JwtConfig;

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("config", &"JwtConfig")
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn expiry_for(&self, lifetime: SessionLifetime) -> i64 {
        match lifetime {
            SessionLifetime::Standard => self.config.access_token_expiry,
            SessionLifetime::Extended => self.config.remember_me_token_expiry,
        }
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(
        &self,
        user_id: Uuid,
        is_superuser: bool,
        lifetime: SessionLifetime,
    ) -> Result<IssuedToken, TokenError> {
        let expiry_seconds = self.expiry_for(lifetime);
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiry_seconds);

        let claims = TokenClaims {
            sub: user_id,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            is_superuser,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: expiry_seconds,
        })
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);

        let decoded =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Token verification failed: Unexpected issuer");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: Malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                        tracing::warn!("Token verification failed: Malformed token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: Unknown error");
                        TokenError::MalformedToken
                    }
                }
            })?;

        if decoded.claims.token_type != ACCESS_TOKEN_TYPE {
            tracing::warn!(
                token_type = %decoded.claims.token_type,
                "Token type mismatch"
            );
            return Err(TokenError::InvalidTokenType(ACCESS_TOKEN_TYPE.to_string()));
        }

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::load_test_env;

    fn config(access_token_expiry: i64) -> JwtConfig {
        JwtConfig {
            secret_key: std::env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "FAKE_JWT_SECRET_DO_NOT_USE_0123456789".to_string()),
            issuer: "test_issuer".to_string(),
            access_token_expiry,
            remember_me_token_expiry: 604800,
        }
    }

    fn create_test_jwt_service() -> JwtTokenService {
        JwtTokenService::new(config(3600))
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let service = create_test_jwt_service();
        let user_id = Uuid::new_v4();

        let issued = service
            .generate_access_token(user_id, true, SessionLifetime::Standard)
            .expect("Token should be generated");

        let claims = service.verify_token(&issued.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.iss, "test_issuer");
        assert!(claims.is_superuser);
        assert_eq!(issued.expires_in, 3600);
    }

    #[test]
    fn test_remember_me_uses_extended_expiry() {
        let service = create_test_jwt_service();

        let issued = service
            .generate_access_token(Uuid::new_v4(), false, SessionLifetime::Extended)
            .unwrap();
        let claims = service.verify_token(&issued.token).unwrap();

        assert_eq!(issued.expires_in, 604800);
        assert_eq!(claims.exp - claims.iat, 604800);
        assert!(!claims.is_superuser);
    }

    #[test]
    fn test_invalid_token_verification() {
        let service = create_test_jwt_service();

        let result = service.verify_token("invalid.jwt.token");
        assert!(matches!(result.unwrap_err(), TokenError::MalformedToken));
    }

    #[test]
    fn test_token_with_invalid_json() {
        use base64::{engine::general_purpose, Engine as _};
        let service = create_test_jwt_service();

        let header = general_purpose::STANDARD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = general_purpose::STANDARD.encode("not valid json");
        let invalid_token = format!("{}.{}.fakesignature", header, payload);

        assert!(service.verify_token(&invalid_token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // beyond the 30s leeway
        let service = JwtTokenService::new(config(-35));

        let issued = service
            .generate_access_token(Uuid::new_v4(), false, SessionLifetime::Standard)
            .unwrap();

        let result = service.verify_token(&issued.token);
        assert!(matches!(result.unwrap_err(), TokenError::TokenExpired));
    }

    #[test]
    fn test_invalid_signature() {
        load_test_env();
        let service = create_test_jwt_service();

        let issued = service
            .generate_access_token(Uuid::new_v4(), false, SessionLifetime::Standard)
            .unwrap();

        let mut other = config(3600);
        other.secret_key = format!("{}_DIFFERENT", other.secret_key);
        let result = JwtTokenService::new(other).verify_token(&issued.token);

        assert!(matches!(result.unwrap_err(), TokenError::InvalidSignature));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let service = create_test_jwt_service();
        let issued = service
            .generate_access_token(Uuid::new_v4(), false, SessionLifetime::Standard)
            .unwrap();

        let mut other = config(3600);
        other.issuer = "someone_else".to_string();
        let result = JwtTokenService::new(other).verify_token(&issued.token);

        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_token_fails() {
        let service = create_test_jwt_service();
        let mut token = service
            .generate_access_token(Uuid::new_v4(), false, SessionLifetime::Standard)
            .unwrap()
            .token;
        token.push('x');

        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let output = format!("{:?}", create_test_jwt_service());
        assert!(!output.contains("FAKE_JWT_SECRET"));
    }
}
