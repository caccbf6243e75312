//! Placeholder use cases for `TestAppStateBuilder` slots a test doesn't care about.

use async_trait::async_trait;
use uuid::Uuid;

use crate::profile::application::domain::entities::{Profile, ProfileFields};
use crate::profile::application::ports::incoming::use_cases::{
    CreateProfileError, CreateProfileUseCase, GetProfileError, GetProfileUseCase, ProfileDetail,
    UpdateProfileError, UpdateProfileUseCase,
};

#[derive(Clone)]
pub struct StubCreateProfileUseCase;

#[async_trait]
impl CreateProfileUseCase for StubCreateProfileUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        _fields: ProfileFields,
    ) -> Result<Profile, CreateProfileError> {
        Err(CreateProfileError::RepositoryError("stub".to_string()))
    }
}

/// Every profile is missing.
#[derive(Clone)]
pub struct StubGetProfileUseCase;

#[async_trait]
impl GetProfileUseCase for StubGetProfileUseCase {
    async fn execute(&self, _username: &str) -> Result<ProfileDetail, GetProfileError> {
        Err(GetProfileError::NotFound)
    }
}

#[derive(Clone)]
pub struct StubUpdateProfileUseCase;

#[async_trait]
impl UpdateProfileUseCase for StubUpdateProfileUseCase {
    async fn execute(
        &self,
        _actor: Uuid,
        _username: &str,
        _fields: ProfileFields,
    ) -> Result<Profile, UpdateProfileError> {
        Err(UpdateProfileError::NotFound)
    }
}
