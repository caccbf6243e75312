use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Account tokens stay usable for this many hours after creation.
pub const ACCOUNT_TOKEN_VALIDITY_HOURS: i64 = 24;

/// Length of the random value handed out in activation / reset links.
pub const ACCOUNT_TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The two single-use token families. Each user holds at most one live token
/// of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Activation,
    PasswordReset,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Activation => "activation",
            TokenKind::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountToken {
    pub user_id: Uuid,
    pub kind: TokenKind,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

impl AccountToken {
    /// A token is valid strictly before the 24h mark.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at < Duration::hours(ACCOUNT_TOKEN_VALIDITY_HOURS)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::hours(ACCOUNT_TOKEN_VALIDITY_HOURS)
    }
}
