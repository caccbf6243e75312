//! In-memory implementations of the auth ports, shared by use-case tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::{AccountToken, TokenKind, User};
use crate::auth::application::ports::outgoing::token_provider::{
    IssuedToken, SessionLifetime, TokenClaims,
};
use crate::auth::application::ports::outgoing::user_repository::{CreateUserData, UserResult};
use crate::auth::application::ports::outgoing::{
    AccountTokenRepository, AccountTokenRepositoryError, HashError, PasswordHasher,
    TokenBlacklistError, TokenBlacklistRepository, TokenError, TokenGenerator, TokenProvider,
    UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};
use crate::auth::application::services::hash::hash_token;
use crate::email::application::ports::outgoing::{
    AccountNotificationError, AccountNotifier, AccountRecipient, EmailSendError,
};

// ============================================================================
// Users
// ============================================================================

pub fn sample_user(username: &str, email: &str, is_active: bool) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password_hash: "hashed:password123".to_string(),
        is_active,
        is_superuser: false,
        created_at: now,
        updated_at: now,
    }
}

/// Serves both `UserQuery` and `UserRepository`; clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn with_user(user: User) -> Self {
        let store = Self::default();
        store.users.lock().unwrap().insert(user.id, user);
        store
    }

    pub fn get(&self, user_id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }

    fn update<F: FnOnce(&mut User)>(&self, user_id: Uuid, f: F) -> Result<(), UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        f(user);
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl UserQuery for InMemoryUserStore {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create_user(&self, data: CreateUserData) -> Result<UserResult, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.username == data.username || u.email == data.email)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            password_hash: data.password_hash,
            is_active: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        };
        let result = UserResult {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: user.is_active,
        };
        users.insert(user.id, user);
        Ok(result)
    }

    async fn activate_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| u.is_active = true)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| u.password_hash = new_password_hash)
    }
}

/// "Hashes" by prefixing, so stored values stay readable in assertions.
#[derive(Clone, Default)]
pub struct FakePasswordHasher;

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{}", password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{}", password))
    }
}

// ============================================================================
// Account tokens
// ============================================================================

#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<HashMap<(&'static str, Uuid), AccountToken>>,
}

impl InMemoryTokenRepository {
    pub fn with_token(self, token: AccountToken) -> Self {
        self.tokens
            .lock()
            .unwrap()
            .insert((token.kind.as_str(), token.user_id), token);
        self
    }

    pub fn count(&self, kind: TokenKind, user_id: Uuid) -> usize {
        self.tokens
            .lock()
            .unwrap()
            .keys()
            .filter(|(k, id)| *k == kind.as_str() && *id == user_id)
            .count()
    }

    pub fn value_of(&self, kind: TokenKind, user_id: Uuid) -> Option<String> {
        self.tokens
            .lock()
            .unwrap()
            .get(&(kind.as_str(), user_id))
            .map(|t| t.value.clone())
    }
}

#[async_trait]
impl AccountTokenRepository for InMemoryTokenRepository {
    async fn replace(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<AccountToken, AccountTokenRepositoryError> {
        let token = AccountToken {
            user_id,
            kind,
            value: value.to_string(),
            created_at: Utc::now(),
        };
        self.tokens
            .lock()
            .unwrap()
            .insert((kind.as_str(), user_id), token.clone());
        Ok(token)
    }

    async fn find(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<Option<AccountToken>, AccountTokenRepositoryError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .get(&(kind.as_str(), user_id))
            .filter(|t| t.value == value)
            .cloned())
    }

    async fn delete(
        &self,
        kind: TokenKind,
        user_id: Uuid,
    ) -> Result<(), AccountTokenRepositoryError> {
        self.tokens
            .lock()
            .unwrap()
            .remove(&(kind.as_str(), user_id))
            .map(|_| ())
            .ok_or(AccountTokenRepositoryError::NotFound)
    }
}

/// Finds tokens like its inner store but every delete reports `NotFound`,
/// as when a concurrent request consumed the token first.
pub struct AlreadyConsumedTokenRepository {
    pub inner: InMemoryTokenRepository,
}

#[async_trait]
impl AccountTokenRepository for AlreadyConsumedTokenRepository {
    async fn replace(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<AccountToken, AccountTokenRepositoryError> {
        self.inner.replace(kind, user_id, value).await
    }

    async fn find(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<Option<AccountToken>, AccountTokenRepositoryError> {
        self.inner.find(kind, user_id, value).await
    }

    async fn delete(
        &self,
        _kind: TokenKind,
        _user_id: Uuid,
    ) -> Result<(), AccountTokenRepositoryError> {
        Err(AccountTokenRepositoryError::NotFound)
    }
}

/// Hands out the given values in order.
pub struct SequenceGenerator {
    values: Mutex<Vec<String>>,
}

impl SequenceGenerator {
    pub fn new(values: &[&str]) -> Self {
        let mut values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        values.reverse();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl TokenGenerator for SequenceGenerator {
    fn generate(&self) -> String {
        self.values
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| "exhausted".to_string())
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// Issues `token-<user_id>` strings; verification parses them back.
#[derive(Clone, Default)]
pub struct FakeTokenProvider;

impl FakeTokenProvider {
    pub const STANDARD_SECONDS: i64 = 1800;
    pub const EXTENDED_SECONDS: i64 = 604800;
}

impl TokenProvider for FakeTokenProvider {
    fn generate_access_token(
        &self,
        user_id: Uuid,
        _is_superuser: bool,
        lifetime: SessionLifetime,
    ) -> Result<IssuedToken, TokenError> {
        let expires_in = match lifetime {
            SessionLifetime::Standard => Self::STANDARD_SECONDS,
            SessionLifetime::Extended => Self::EXTENDED_SECONDS,
        };
        Ok(IssuedToken {
            token: format!("token-{}", user_id),
            expires_in,
        })
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let sub = token
            .strip_prefix("token-")
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or(TokenError::MalformedToken)?;
        let now = Utc::now().timestamp();
        Ok(TokenClaims {
            sub,
            exp: now + Self::STANDARD_SECONDS,
            iat: now,
            nbf: now,
            iss: "test".to_string(),
            token_type: "access".to_string(),
            is_superuser: false,
        })
    }
}

#[derive(Default)]
pub struct InMemoryBlacklist {
    hashes: Mutex<HashSet<String>>,
    fail: bool,
}

impl InMemoryBlacklist {
    pub fn failing() -> Self {
        Self {
            hashes: Mutex::new(HashSet::new()),
            fail: true,
        }
    }

    /// True if the raw token string was stored instead of its hash.
    pub fn contains_raw(&self, token: &str) -> bool {
        self.hashes.lock().unwrap().contains(token)
    }

    pub fn revoke(&self, token: &str) {
        self.hashes.lock().unwrap().insert(hash_token(token));
    }
}

#[async_trait]
impl TokenBlacklistRepository for InMemoryBlacklist {
    async fn blacklist_token(
        &self,
        token_hash: String,
        _user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError> {
        if self.fail {
            return Err(TokenBlacklistError::StorageError("redis down".to_string()));
        }
        if expires_at <= Utc::now() {
            return Err(TokenBlacklistError::AlreadyExpired);
        }
        self.hashes.lock().unwrap().insert(token_hash);
        Ok(())
    }

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenBlacklistError> {
        if self.fail {
            return Err(TokenBlacklistError::StorageError("redis down".to_string()));
        }
        Ok(self.hashes.lock().unwrap().contains(token_hash))
    }
}

// ============================================================================
// Email
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    activations: Mutex<Vec<(String, String)>>,
    resets: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// (username, token) per activation email sent.
    pub fn activations(&self) -> Vec<(String, String)> {
        self.activations.lock().unwrap().clone()
    }

    pub fn resets(&self) -> Vec<(String, String)> {
        self.resets.lock().unwrap().clone()
    }

    fn record(
        &self,
        log: &Mutex<Vec<(String, String)>>,
        recipient: &AccountRecipient,
        token: &str,
    ) -> Result<(), AccountNotificationError> {
        if self.fail {
            return Err(EmailSendError::Transport("smtp unreachable".to_string()).into());
        }
        log.lock()
            .unwrap()
            .push((recipient.username.clone(), token.to_string()));
        Ok(())
    }
}

#[async_trait]
impl AccountNotifier for RecordingNotifier {
    async fn send_activation_email(
        &self,
        recipient: &AccountRecipient,
        token: &str,
    ) -> Result<(), AccountNotificationError> {
        self.record(&self.activations, recipient, token)
    }

    async fn send_password_reset_email(
        &self,
        recipient: &AccountRecipient,
        token: &str,
    ) -> Result<(), AccountNotificationError> {
        self.record(&self.resets, recipient, token)
    }
}
