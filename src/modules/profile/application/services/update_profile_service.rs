use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::profile::application::domain::entities::{Profile, ProfileFields};
use crate::profile::application::ports::{
    incoming::use_cases::{UpdateProfileError, UpdateProfileUseCase},
    outgoing::{ProfileQuery, ProfileRepository, ProfileRepositoryError, UpdateProfileData},
};

pub struct UpdateProfileService<R, P>
where
    R: ProfileRepository,
    P: ProfileQuery,
{
    repository: R,
    query: P,
}

impl<R, P> UpdateProfileService<R, P>
where
    R: ProfileRepository,
    P: ProfileQuery,
{
    pub fn new(repository: R, query: P) -> Self {
        Self { repository, query }
    }
}

#[async_trait]
impl<R, P> UpdateProfileUseCase for UpdateProfileService<R, P>
where
    R: ProfileRepository + Send + Sync,
    P: ProfileQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Uuid,
        username: &str,
        fields: ProfileFields,
    ) -> Result<Profile, UpdateProfileError> {
        let view = self
            .query
            .find_by_username(username)
            .await
            .map_err(|e| UpdateProfileError::RepositoryError(e.to_string()))?
            .ok_or(UpdateProfileError::NotFound)?;

        if view.profile.user_id != actor {
            warn!(actor = %actor, owner = %view.profile.user_id, "Profile edit by non-owner");
            return Err(UpdateProfileError::PermissionDenied);
        }

        fields.validate(Utc::now().date_naive())?;

        let data = UpdateProfileData {
            gender: fields.gender,
            date_of_birth: fields.date_of_birth,
            avatar: fields.resolved_avatar(&view.email),
            bio: fields.bio,
            info: fields.info,
        };

        let profile = self
            .repository
            .update_profile(view.profile.id, data)
            .await
            .map_err(|e| match e {
                ProfileRepositoryError::NotFound => UpdateProfileError::NotFound,
                other => UpdateProfileError::RepositoryError(other.to_string()),
            })?;

        info!(profile_id = %profile.id, "Profile updated");
        Ok(profile)
    }
}
