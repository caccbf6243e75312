mod categories;
mod comments;
mod content_error;
mod get_post;
mod list_posts;
mod manage_posts;
mod reactions;

pub use categories::*;
pub use comments::*;
pub use get_post::*;
pub use list_posts::*;
pub use manage_posts::*;
pub use reactions::*;
