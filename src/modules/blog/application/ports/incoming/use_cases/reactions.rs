use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::application::domain::reaction::{Reaction, ReactionSummary};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReactionError {
    #[error("Target not found")]
    TargetNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Like/dislike for one target kind; `AppState` holds one per kind.
#[async_trait]
pub trait ReactionUseCase: Send + Sync {
    /// Toggles and returns the fresh counts with the user's reaction.
    async fn toggle(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        pressed: Reaction,
    ) -> Result<ReactionSummary, ReactionError>;

    async fn summary(
        &self,
        target_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<ReactionSummary, ReactionError>;
}
