use async_trait::async_trait;
use serde::Serialize;

use crate::profile::application::ports::outgoing::{ProfileView, RecentPost};

/// How many published posts the profile page shows.
pub const PROFILE_RECENT_POSTS: u64 = 4;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetail {
    pub profile: ProfileView,
    pub posts: Vec<RecentPost>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetProfileError {
    #[error("Profile not found")]
    NotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetProfileUseCase: Send + Sync {
    async fn execute(&self, username: &str) -> Result<ProfileDetail, GetProfileError>;
}
