use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::profile::application::domain::entities::Profile;

/// A profile joined with its owner's public account fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Needed to re-derive the Gravatar avatar; never sent to clients.
    #[serde(skip_serializing)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub image_url: String,
    pub publish: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ProfileQuery: Send + Sync {
    async fn find_by_username(&self, username: &str)
        -> Result<Option<ProfileView>, ProfileQueryError>;

    /// "Does this user have a profile yet".
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileQueryError>;

    /// Newest published posts by the user, at most `limit`.
    async fn latest_published_posts(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<RecentPost>, ProfileQueryError>;
}
