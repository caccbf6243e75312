use anyhow::{bail, Context};
use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64,      // Expiration in seconds
    pub remember_me_token_expiry: i64, // Expiration in seconds
}

pub const DEFAULT_ACCESS_EXPIRY: &str = "1800";
/// Seven days.
pub const DEFAULT_REMEMBER_ME_EXPIRY: &str = "604800";

impl JwtConfig {
    fn parse_expiry(key: &str, default: &str) -> anyhow::Result<i64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<i64>()
            .with_context(|| format!("Invalid {} value", key))
    }

    /// Load JWT configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let secret_key = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        // HS256 wants at least 32 bytes of key material
        if secret_key.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters long for HS256 algorithm");
        }

        let access_token_expiry = Self::parse_expiry("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_EXPIRY)?;
        let remember_me_token_expiry =
            Self::parse_expiry("JWT_REMEMBER_ME_EXPIRY", DEFAULT_REMEMBER_ME_EXPIRY)?;

        if access_token_expiry <= 0 || access_token_expiry > 86400 {
            bail!("JWT_ACCESS_EXPIRY must be between 1 and 86400 seconds (24 hours)");
        }

        if remember_me_token_expiry <= access_token_expiry {
            bail!("JWT_REMEMBER_ME_EXPIRY must be greater than JWT_ACCESS_EXPIRY");
        }

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "blog_platform".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
            remember_me_token_expiry,
        })
    }
}
