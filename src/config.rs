use anyhow::{bail, Context};

/// Where outgoing mail goes.
#[derive(Debug, Clone, PartialEq)]
pub enum SmtpConfig {
    /// Authenticated relay (production).
    Relay {
        server: String,
        username: String,
        password: String,
    },
    /// Unauthenticated local catcher such as Mailpit (`RUST_ENV=test`).
    Local { host: String, port: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    /// Base of the links put in activation and reset emails.
    pub site_url: String,
    pub email_from: String,
    pub smtp: SmtpConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let port = required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let rust_env = lookup("RUST_ENV").unwrap_or_else(|| "development".to_string());
        let smtp = if rust_env == "test" {
            SmtpConfig::Local {
                host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: lookup("SMTP_PORT")
                    .unwrap_or_else(|| "1025".to_string())
                    .parse()
                    .context("SMTP_PORT must be a valid port number")?,
            }
        } else {
            SmtpConfig::Relay {
                server: required("SMTP_SERVER")?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            }
        };

        let site_url = required("SITE_URL")?;
        if !site_url.starts_with("http://") && !site_url.starts_with("https://") {
            bail!("SITE_URL must start with http:// or https://");
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            host: required("HOST")?,
            port,
            site_url,
            email_from: required("EMAIL_FROM")?,
            smtp,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
