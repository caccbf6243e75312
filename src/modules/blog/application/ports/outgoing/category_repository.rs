use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::application::domain::entities::Category;

#[derive(Debug, Clone)]
pub struct CreateCategoryData {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CategoryRepositoryError {
    #[error("Category name or slug already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryRepositoryError>;

    async fn create_category(
        &self,
        data: CreateCategoryData,
    ) -> Result<Category, CategoryRepositoryError>;
}
