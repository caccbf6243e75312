pub mod category_service;
pub mod comment_service;
pub mod create_post_service;
pub mod delete_post_service;
pub mod get_post_service;
pub mod list_posts_service;
pub mod reaction_service;
pub mod update_post_service;

pub use category_service::{CreateCategoryService, ListCategoriesService};
pub use comment_service::{AddCommentService, DeleteCommentService, ToggleCommentActiveService};
pub use create_post_service::CreatePostService;
pub use delete_post_service::DeletePostService;
pub use get_post_service::GetPostService;
pub use list_posts_service::ListPostsService;
pub use reaction_service::ReactionService;
pub use update_post_service::UpdatePostService;
