use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    #[error("Password verification failed")]
    VerifyFailed,

    /// The blocking hash task panicked or was cancelled.
    #[error("Hashing task failed")]
    TaskFailed,

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}

/// Stored credentials are only ever produced and checked through this port.
///
/// A wrong password is `Ok(false)`. `Err` means the stored hash is unreadable
/// or the hashing work itself failed.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, plain: &str) -> Result<String, HashError>;
    async fn verify_password(&self, plain: &str, stored_hash: &str) -> Result<bool, HashError>;
}
