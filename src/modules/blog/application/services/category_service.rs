use async_trait::async_trait;
use tracing::{info, warn};

use crate::blog::application::domain::entities::{
    validate_category_name, Actor, Category, MAX_CATEGORY_SLUG_LENGTH,
};
use crate::blog::application::domain::slug::{slugify_within, validate_slug};
use crate::blog::application::ports::{
    incoming::use_cases::{
        CreateCategoryError, CreateCategoryUseCase, ListCategoriesError, ListCategoriesUseCase,
    },
    outgoing::{CategoryRepository, CategoryRepositoryError, CreateCategoryData},
};

pub struct ListCategoriesService<R>
where
    R: CategoryRepository,
{
    repository: R,
}

impl<R> ListCategoriesService<R>
where
    R: CategoryRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ListCategoriesUseCase for ListCategoriesService<R>
where
    R: CategoryRepository + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<Category>, ListCategoriesError> {
        self.repository
            .list_categories()
            .await
            .map_err(|e| ListCategoriesError::QueryFailed(e.to_string()))
    }
}

pub struct CreateCategoryService<R>
where
    R: CategoryRepository,
{
    repository: R,
}

impl<R> CreateCategoryService<R>
where
    R: CategoryRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CreateCategoryUseCase for CreateCategoryService<R>
where
    R: CategoryRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        name: String,
        slug: Option<String>,
    ) -> Result<Category, CreateCategoryError> {
        if !actor.is_superuser {
            warn!(user_id = %actor.user_id, "Category create by non-superuser");
            return Err(CreateCategoryError::PermissionDenied);
        }

        validate_category_name(&name)?;
        let name = name.trim().to_string();

        let slug = match slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => slugify_within(&name, MAX_CATEGORY_SLUG_LENGTH),
        };
        validate_slug(&slug, MAX_CATEGORY_SLUG_LENGTH)?;

        let category = self
            .repository
            .create_category(CreateCategoryData { name, slug })
            .await
            .map_err(|e| match e {
                CategoryRepositoryError::AlreadyExists => CreateCategoryError::AlreadyExists,
                other => CreateCategoryError::RepositoryError(other.to_string()),
            })?;

        info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }
}
