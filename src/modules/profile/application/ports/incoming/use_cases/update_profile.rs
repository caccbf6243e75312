use async_trait::async_trait;
use uuid::Uuid;

use crate::profile::application::domain::entities::{
    Profile, ProfileFields, ProfileValidationError,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("Profile not found")]
    NotFound,

    #[error("You don't have permission to edit this profile")]
    PermissionDenied,

    #[error("{0}")]
    Validation(#[from] ProfileValidationError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateProfileUseCase: Send + Sync {
    /// `actor` must own the profile behind `username`.
    async fn execute(
        &self,
        actor: Uuid,
        username: &str,
        fields: ProfileFields,
    ) -> Result<Profile, UpdateProfileError>;
}
