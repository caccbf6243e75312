use async_trait::async_trait;
use tracing::debug;

use crate::blog::application::domain::entities::PostView;
use crate::blog::application::domain::search::PostFilter;
use crate::blog::application::ports::{
    incoming::use_cases::{ListPostsError, ListPostsUseCase},
    outgoing::PostQuery,
};
use crate::shared::pagination::{PageRequest, PageResult};

pub struct ListPostsService<Q>
where
    Q: PostQuery,
{
    query: Q,
}

impl<Q> ListPostsService<Q>
where
    Q: PostQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListPostsUseCase for ListPostsService<Q>
where
    Q: PostQuery + Send + Sync,
{
    async fn execute(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<PageResult<PostView>, ListPostsError> {
        let total = self
            .query
            .count_published(&filter)
            .await
            .map_err(|e| ListPostsError::QueryFailed(e.to_string()))?;

        let resolved = page.resolve(total);
        debug!(requested = page.page, resolved = resolved.page, total, "Listing posts");

        let items = if total == 0 {
            Vec::new()
        } else {
            self.query
                .list_published(&filter, resolved.offset(), resolved.per_page)
                .await
                .map_err(|e| ListPostsError::QueryFailed(e.to_string()))?
        };

        Ok(PageResult::new(items, resolved, total))
    }
}
