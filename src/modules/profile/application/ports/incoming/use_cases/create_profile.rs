use async_trait::async_trait;
use uuid::Uuid;

use crate::profile::application::domain::entities::{
    Profile, ProfileFields, ProfileValidationError,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateProfileError {
    #[error("You already have a profile")]
    ProfileAlreadyExists,

    #[error("{0}")]
    Validation(#[from] ProfileValidationError),

    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, fields: ProfileFields)
        -> Result<Profile, CreateProfileError>;
}
