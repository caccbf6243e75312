use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::profile::application::domain::entities::{Gender, Profile};

#[derive(Debug, Clone)]
pub struct CreateProfileData {
    pub user_id: Uuid,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub bio: String,
    pub info: String,
    pub avatar: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileData {
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub bio: String,
    pub info: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileRepositoryError {
    #[error("Profile already exists")]
    ProfileAlreadyExists,

    #[error("Profile not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// One profile per user; a second insert fails with `ProfileAlreadyExists`.
    async fn create_profile(&self, data: CreateProfileData)
        -> Result<Profile, ProfileRepositoryError>;

    async fn update_profile(
        &self,
        profile_id: Uuid,
        data: UpdateProfileData,
    ) -> Result<Profile, ProfileRepositoryError>;
}
