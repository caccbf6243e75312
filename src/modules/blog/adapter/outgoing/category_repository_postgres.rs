use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::user_repository_postgres::is_unique_violation;
use crate::blog::application::domain::entities::Category;
use crate::blog::application::ports::outgoing::{
    CategoryRepository, CategoryRepositoryError, CreateCategoryData,
};

use super::sea_orm_entity::categories::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as CategoryEntity,
};

#[derive(Debug, Clone)]
pub struct CategoryRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> CategoryRepositoryError {
        CategoryRepositoryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryPostgres {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let models = CategoryEntity::find()
            .order_by_asc(CategoryColumn::Name)
            .all(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(CategoryEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(Category::from))
    }

    async fn create_category(
        &self,
        data: CreateCategoryData,
    ) -> Result<Category, CategoryRepositoryError> {
        let active = CategoryActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            slug: Set(data.slug),
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return CategoryRepositoryError::AlreadyExists;
            }
            tracing::error!(error = %e, "Failed to insert category");
            Self::map_db_err(e)
        })?;

        Ok(inserted.into())
    }
}
