use async_trait::async_trait;

use crate::profile::application::ports::{
    incoming::use_cases::{GetProfileError, GetProfileUseCase, ProfileDetail, PROFILE_RECENT_POSTS},
    outgoing::ProfileQuery,
};

pub struct GetProfileService<P>
where
    P: ProfileQuery,
{
    query: P,
}

impl<P> GetProfileService<P>
where
    P: ProfileQuery,
{
    pub fn new(query: P) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<P> GetProfileUseCase for GetProfileService<P>
where
    P: ProfileQuery + Send + Sync,
{
    async fn execute(&self, username: &str) -> Result<ProfileDetail, GetProfileError> {
        let profile = self
            .query
            .find_by_username(username)
            .await
            .map_err(|e| GetProfileError::QueryFailed(e.to_string()))?
            .ok_or(GetProfileError::NotFound)?;

        let posts = self
            .query
            .latest_published_posts(profile.profile.user_id, PROFILE_RECENT_POSTS)
            .await
            .map_err(|e| GetProfileError::QueryFailed(e.to_string()))?;

        Ok(ProfileDetail { profile, posts })
    }
}
