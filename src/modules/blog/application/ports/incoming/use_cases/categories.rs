use async_trait::async_trait;

use crate::blog::application::domain::entities::{Actor, Category, ContentValidationError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListCategoriesError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateCategoryError {
    #[error("Only superusers can create categories")]
    PermissionDenied,

    #[error("{0}")]
    Validation(#[from] ContentValidationError),

    #[error("Category already exists")]
    AlreadyExists,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListCategoriesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Category>, ListCategoriesError>;
}

#[async_trait]
pub trait CreateCategoryUseCase: Send + Sync {
    /// `slug` defaults to the slugified name.
    async fn execute(
        &self,
        actor: Actor,
        name: String,
        slug: Option<String>,
    ) -> Result<Category, CreateCategoryError>;
}
