use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::blog::application::domain::entities::{validate_comment_body, Actor, Comment};
use crate::blog::application::ports::{
    incoming::use_cases::{
        AddCommentError, AddCommentUseCase, DeleteCommentUseCase, ModerateCommentError,
        ToggleCommentActiveUseCase,
    },
    outgoing::{CommentRepository, CommentRepositoryError, PostQuery},
};

fn moderation_error(err: CommentRepositoryError) -> ModerateCommentError {
    match err {
        CommentRepositoryError::NotFound => ModerateCommentError::NotFound,
        other => ModerateCommentError::RepositoryError(other.to_string()),
    }
}

pub struct AddCommentService<C, Q>
where
    C: CommentRepository,
    Q: PostQuery,
{
    comments: C,
    posts: Q,
}

impl<C, Q> AddCommentService<C, Q>
where
    C: CommentRepository,
    Q: PostQuery,
{
    pub fn new(comments: C, posts: Q) -> Self {
        Self { comments, posts }
    }
}

#[async_trait]
impl<C, Q> AddCommentUseCase for AddCommentService<C, Q>
where
    C: CommentRepository + Send + Sync,
    Q: PostQuery + Send + Sync,
{
    async fn execute(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        body: String,
    ) -> Result<Comment, AddCommentError> {
        validate_comment_body(&body)?;

        let post = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(|e| AddCommentError::RepositoryError(e.to_string()))?
            .filter(|p| p.is_published())
            .ok_or(AddCommentError::PostNotFound)?;

        let comment = self
            .comments
            .create_comment(post.id, author_id, body.trim().to_string())
            .await
            .map_err(|e| AddCommentError::RepositoryError(e.to_string()))?;

        info!(comment_id = %comment.id, post_id = %post.id, "Comment added");
        Ok(comment)
    }
}

pub struct DeleteCommentService<C: CommentRepository> {
    comments: C,
}

impl<C: CommentRepository> DeleteCommentService<C> {
    pub fn new(comments: C) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl<C> DeleteCommentUseCase for DeleteCommentService<C>
where
    C: CommentRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, comment_id: Uuid) -> Result<(), ModerateCommentError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await
            .map_err(moderation_error)?
            .ok_or(ModerateCommentError::NotFound)?;

        if comment.author_id != actor.user_id && !actor.is_superuser {
            warn!(actor = %actor.user_id, comment_id = %comment_id, "Comment delete denied");
            return Err(ModerateCommentError::PermissionDenied);
        }

        self.comments
            .delete_comment(comment_id)
            .await
            .map_err(moderation_error)?;

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}

pub struct ToggleCommentActiveService<C: CommentRepository> {
    comments: C,
}

impl<C: CommentRepository> ToggleCommentActiveService<C> {
    pub fn new(comments: C) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl<C> ToggleCommentActiveUseCase for ToggleCommentActiveService<C>
where
    C: CommentRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        comment_id: Uuid,
    ) -> Result<Comment, ModerateCommentError> {
        if !actor.is_superuser {
            warn!(actor = %actor.user_id, comment_id = %comment_id, "Comment moderation denied");
            return Err(ModerateCommentError::PermissionDenied);
        }

        let comment = self
            .comments
            .find_by_id(comment_id)
            .await
            .map_err(moderation_error)?
            .ok_or(ModerateCommentError::NotFound)?;

        let updated = self
            .comments
            .set_active(comment_id, !comment.active)
            .await
            .map_err(moderation_error)?;

        info!(comment_id = %comment_id, active = updated.active, "Comment visibility changed");
        Ok(updated)
    }
}
