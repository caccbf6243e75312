use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::user_repository_postgres::is_unique_violation;
use crate::blog::application::domain::entities::{NormalizedPost, Post};
use crate::blog::application::ports::outgoing::{PostRepository, PostRepositoryError};

use super::sea_orm_entity::posts::{
    ActiveModel as PostActiveModel, Entity as PostEntity, Model as PostModel,
};

fn is_foreign_key_violation(err: &DbErr) -> bool {
    let err_str = err.to_string().to_lowercase();
    err_str.contains("23503") || err_str.contains("foreign key constraint")
}

#[derive(Debug, Clone)]
pub struct PostRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_write_err(e: DbErr) -> PostRepositoryError {
        if is_unique_violation(&e) {
            return PostRepositoryError::SlugTaken;
        }
        if is_foreign_key_violation(&e) {
            return PostRepositoryError::CategoryNotFound;
        }
        tracing::error!(error = %e, "Failed to write post");
        PostRepositoryError::DatabaseError(e.to_string())
    }

    fn to_domain(model: PostModel) -> Result<Post, PostRepositoryError> {
        model.to_domain().map_err(PostRepositoryError::DatabaseError)
    }
}

#[async_trait]
impl PostRepository for PostRepositoryPostgres {
    async fn create_post(
        &self,
        author_id: Uuid,
        post: NormalizedPost,
    ) -> Result<Post, PostRepositoryError> {
        let active = PostActiveModel {
            id: Set(Uuid::new_v4()),
            author_id: Set(author_id),
            category_id: Set(post.category_id),
            title: Set(post.title),
            slug: Set(post.slug),
            body: Set(post.body),
            image_url: Set(post.image_url),
            status: Set(post.status.as_str().to_string()),
            publish: Set(post.publish.fixed_offset()),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(Self::map_write_err)?;
        Self::to_domain(inserted)
    }

    async fn update_post(
        &self,
        post_id: Uuid,
        post: NormalizedPost,
    ) -> Result<Post, PostRepositoryError> {
        let existing = PostEntity::find_by_id(post_id)
            .one(&*self.db)
            .await
            .map_err(|e| PostRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(PostRepositoryError::NotFound)?;

        let mut active: PostActiveModel = existing.into();
        active.category_id = Set(post.category_id);
        active.title = Set(post.title);
        active.slug = Set(post.slug);
        active.body = Set(post.body);
        active.image_url = Set(post.image_url);
        active.status = Set(post.status.as_str().to_string());
        active.publish = Set(post.publish.fixed_offset());

        let updated = active.update(&*self.db).await.map_err(Self::map_write_err)?;
        Self::to_domain(updated)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<(), PostRepositoryError> {
        let result = PostEntity::delete_by_id(post_id)
            .exec(&*self.db)
            .await
            .map_err(|e| PostRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(PostRepositoryError::NotFound);
        }
        Ok(())
    }
}
