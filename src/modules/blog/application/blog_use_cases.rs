use std::sync::Arc;

use crate::blog::application::ports::incoming::use_cases::{
    AddCommentUseCase, CreateCategoryUseCase, CreatePostUseCase, DeleteCommentUseCase,
    DeletePostUseCase, GetPostUseCase, ListCategoriesUseCase, ListPostsUseCase, ReactionUseCase,
    ToggleCommentActiveUseCase, UpdatePostUseCase,
};

#[derive(Clone)]
pub struct BlogUseCases {
    pub list_categories: Arc<dyn ListCategoriesUseCase + Send + Sync>,
    pub create_category: Arc<dyn CreateCategoryUseCase + Send + Sync>,
    pub list_posts: Arc<dyn ListPostsUseCase + Send + Sync>,
    pub get_post: Arc<dyn GetPostUseCase + Send + Sync>,
    pub create_post: Arc<dyn CreatePostUseCase + Send + Sync>,
    pub update_post: Arc<dyn UpdatePostUseCase + Send + Sync>,
    pub delete_post: Arc<dyn DeletePostUseCase + Send + Sync>,
    pub add_comment: Arc<dyn AddCommentUseCase + Send + Sync>,
    pub delete_comment: Arc<dyn DeleteCommentUseCase + Send + Sync>,
    pub toggle_comment: Arc<dyn ToggleCommentActiveUseCase + Send + Sync>,
    pub post_reactions: Arc<dyn ReactionUseCase + Send + Sync>,
    pub comment_reactions: Arc<dyn ReactionUseCase + Send + Sync>,
}
