use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::blog::application::domain::reaction::{InteractionTarget, Reaction, ReactionSummary};
use crate::blog::application::ports::{
    incoming::use_cases::{ReactionError, ReactionUseCase},
    outgoing::{InteractionLedger, InteractionLedgerError},
};

fn reaction_error(err: InteractionLedgerError) -> ReactionError {
    match err {
        InteractionLedgerError::TargetNotFound => ReactionError::TargetNotFound,
        other => ReactionError::RepositoryError(other.to_string()),
    }
}

/// Like/dislike for posts or comments, depending on `T`.
pub struct ReactionService<T, L>
where
    T: InteractionTarget,
    L: InteractionLedger<T>,
{
    ledger: L,
    _target: PhantomData<T>,
}

impl<T, L> ReactionService<T, L>
where
    T: InteractionTarget,
    L: InteractionLedger<T>,
{
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            _target: PhantomData,
        }
    }
}

#[async_trait]
impl<T, L> ReactionUseCase for ReactionService<T, L>
where
    T: InteractionTarget,
    L: InteractionLedger<T> + Send + Sync,
{
    async fn toggle(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        pressed: Reaction,
    ) -> Result<ReactionSummary, ReactionError> {
        let state = self
            .ledger
            .toggle(target_id, user_id, pressed)
            .await
            .map_err(reaction_error)?;

        debug!(
            kind = T::KIND,
            target_id = %target_id,
            user_id = %user_id,
            liked = state.liked,
            disliked = state.disliked,
            "Reaction toggled"
        );

        self.summary(target_id, Some(user_id)).await
    }

    async fn summary(
        &self,
        target_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<ReactionSummary, ReactionError> {
        self.ledger
            .summary(target_id, viewer)
            .await
            .map_err(reaction_error)
    }
}
