use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    user_repository::CreateUserData, PasswordHasher, UserQuery, UserRepository,
    UserRepositoryError,
};

pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 150;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

// ========================= Input / Output =========================

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserOutput {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

// ========================= Errors =========================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateUserError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("The two password fields didn't match")]
    PasswordMismatch,

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("A user with that username or email already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ========================= Validation =========================

/// Trimmed and lowercased. Every email lookup goes through this.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_username(username: &str) -> Result<String, CreateUserError> {
    let username = username.trim();

    if username.is_empty() {
        return Err(CreateUserError::InvalidUsername(
            "Username is required".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CreateUserError::InvalidUsername(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Err(CreateUserError::InvalidUsername(
            "Username may contain only letters, numbers, and @/./+/-/_ characters".to_string(),
        ));
    }

    Ok(username.to_string())
}

fn validate_email(email: &str) -> Result<String, CreateUserError> {
    let email = normalize_email(email);

    if email.is_empty() {
        return Err(CreateUserError::InvalidEmail("Email is required".to_string()));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(CreateUserError::InvalidEmail(format!(
            "Email must be at most {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if !EmailAddress::is_valid(&email) {
        return Err(CreateUserError::InvalidEmail("Invalid email format".to_string()));
    }

    Ok(email)
}

fn validate_name(field: &str, value: &str) -> Result<String, CreateUserError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(CreateUserError::InvalidName(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(CreateUserError::InvalidName(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }

    Ok(value.to_string())
}

// ========================= Use Case =========================

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError>;
}

#[derive(Clone)]
pub struct CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    password_policy: Arc<dyn PasswordPolicy>,
}

impl<Q, R> CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        password_policy: Arc<dyn PasswordPolicy>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            password_policy,
        }
    }
}

#[async_trait]
impl<Q, R> ICreateUserUseCase for CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError> {
        let username = validate_username(&input.username)?;
        let email = validate_email(&input.email)?;
        let first_name = validate_name("First name", &input.first_name)?;
        let last_name = validate_name("Last name", &input.last_name)?;

        if input.password1 != input.password2 {
            return Err(CreateUserError::PasswordMismatch);
        }
        self.password_policy
            .validate(&input.password1)
            .map_err(|e| CreateUserError::InvalidPassword(e.to_string()))?;

        // Early uniqueness check for a clean error; the unique constraints
        // still decide under concurrency.
        let username_taken = self
            .query
            .find_by_username(&username)
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?
            .is_some();
        let email_taken = self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?
            .is_some();

        if username_taken || email_taken {
            return Err(CreateUserError::UserAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(&input.password1)
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        let created = self
            .repository
            .create_user(CreateUserData {
                username,
                email,
                first_name,
                last_name,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => CreateUserError::UserAlreadyExists,
                other => CreateUserError::RepositoryError(other.to_string()),
            })?;

        Ok(CreateUserOutput {
            user_id: created.id,
            username: created.username,
            email: created.email,
            first_name: created.first_name,
            last_name: created.last_name,
        })
    }
}
