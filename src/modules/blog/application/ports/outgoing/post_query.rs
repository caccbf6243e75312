use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::blog::application::domain::entities::{Post, PostView};
use crate::blog::application::domain::search::PostFilter;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PostQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side for posts. Everything except `find_by_id` and `slug_taken`
/// only ever sees published posts.
#[async_trait]
pub trait PostQuery: Send + Sync {
    async fn count_published(&self, filter: &PostFilter) -> Result<u64, PostQueryError>;

    /// Newest first (`publish`, then `created_at`, both descending).
    async fn list_published(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostView>, PostQueryError>;

    async fn find_published(
        &self,
        publish_date: NaiveDate,
        slug: &str,
    ) -> Result<Option<PostView>, PostQueryError>;

    /// Any status.
    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, PostQueryError>;

    /// Whether another post already uses `slug` on `publish_date`.
    async fn slug_taken(
        &self,
        slug: &str,
        publish_date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, PostQueryError>;
}
