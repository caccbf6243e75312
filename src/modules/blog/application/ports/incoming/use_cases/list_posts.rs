use async_trait::async_trait;

use crate::blog::application::domain::entities::PostView;
use crate::blog::application::domain::search::PostFilter;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListPostsError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// One use case serves the plain listing, category, author and search pages;
/// they differ only in the filter.
#[async_trait]
pub trait ListPostsUseCase: Send + Sync {
    /// `page` is clamped into the existing range before fetching.
    async fn execute(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<PageResult<PostView>, ListPostsError>;
}
