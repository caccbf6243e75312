use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::application::domain::reaction::{
    InteractionTarget, Reaction, ReactionState, ReactionSummary,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InteractionLedgerError {
    /// Missing, or not visible (unpublished post, inactive comment).
    #[error("Target not found")]
    TargetNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Like/dislike records for one kind of target.
#[async_trait]
pub trait InteractionLedger<T: InteractionTarget>: Send + Sync {
    /// Applies [`ReactionState::toggle`] atomically for the pair and returns
    /// the new state.
    async fn toggle(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        pressed: Reaction,
    ) -> Result<ReactionState, InteractionLedgerError>;

    async fn summary(
        &self,
        target_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<ReactionSummary, InteractionLedgerError>;
}
