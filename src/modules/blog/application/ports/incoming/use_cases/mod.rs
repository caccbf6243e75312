mod categories;
mod comments;
mod get_post;
mod list_posts;
mod manage_posts;
mod reactions;

pub use categories::{
    CreateCategoryError, CreateCategoryUseCase, ListCategoriesError, ListCategoriesUseCase,
};
pub use comments::{
    AddCommentError, AddCommentUseCase, DeleteCommentUseCase, ModerateCommentError,
    ToggleCommentActiveUseCase,
};
pub use get_post::{GetPostError, GetPostUseCase, PostDetail};
pub use list_posts::{ListPostsError, ListPostsUseCase};
pub use manage_posts::{
    CreatePostError, CreatePostUseCase, DeletePostError, DeletePostUseCase, UpdatePostError,
    UpdatePostUseCase,
};
pub use reactions::{ReactionError, ReactionUseCase};
