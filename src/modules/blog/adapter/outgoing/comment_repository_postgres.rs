use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    Set, Statement,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::blog::application::domain::entities::{Comment, CommentView};
use crate::blog::application::ports::outgoing::{CommentRepository, CommentRepositoryError};

use super::sea_orm_entity::comments::{
    ActiveModel as CommentActiveModel, Entity as CommentEntity, Model as CommentModel,
};

#[derive(Debug, FromQueryResult)]
struct CommentViewRow {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    body: String,
    active: bool,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    author_username: String,
}

#[derive(Debug, Clone)]
pub struct CommentRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CommentRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> CommentRepositoryError {
        CommentRepositoryError::DatabaseError(e.to_string())
    }

    async fn find_model(&self, comment_id: Uuid) -> Result<CommentModel, CommentRepositoryError> {
        CommentEntity::find_by_id(comment_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(CommentRepositoryError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for CommentRepositoryPostgres {
    async fn list_active(&self, post_id: Uuid) -> Result<Vec<CommentView>, CommentRepositoryError> {
        let rows = CommentViewRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT c.id, c.post_id, c.author_id, c.body, c.active, c.created_at, c.updated_at,
                      u.username AS author_username
               FROM comments c
               JOIN users u ON u.id = c.author_id
               WHERE c.post_id = $1 AND c.active
               ORDER BY c.updated_at DESC, c.created_at DESC"#,
            [post_id.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(Self::map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| CommentView {
                comment: CommentModel {
                    id: r.id,
                    post_id: r.post_id,
                    author_id: r.author_id,
                    body: r.body,
                    active: r.active,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                }
                .into(),
                author_username: r.author_username,
            })
            .collect())
    }

    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(CommentEntity::find_by_id(comment_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(Comment::from))
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: String,
    ) -> Result<Comment, CommentRepositoryError> {
        let active = CommentActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(post_id),
            author_id: Set(author_id),
            body: Set(body),
            active: Set(true),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            tracing::error!(error = %e, post_id = %post_id, "Failed to insert comment");
            Self::map_db_err(e)
        })?;

        Ok(inserted.into())
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), CommentRepositoryError> {
        let result = CommentEntity::delete_by_id(comment_id)
            .exec(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        if result.rows_affected == 0 {
            return Err(CommentRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn set_active(
        &self,
        comment_id: Uuid,
        active: bool,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut model: CommentActiveModel = self.find_model(comment_id).await?.into();
        model.active = Set(active);

        let updated = model.update(&*self.db).await.map_err(Self::map_db_err)?;
        Ok(updated.into())
    }
}
