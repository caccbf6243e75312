//! In-memory implementations of the blog ports.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::blog::application::domain::entities::{
    Category, Comment, CommentView, NormalizedPost, Post, PostStatus, PostView,
};
use crate::blog::application::domain::reaction::{
    InteractionTarget, Reaction, ReactionState, ReactionSummary,
};
use crate::blog::application::domain::search::PostFilter;
use crate::blog::application::domain::slug::slugify;
use crate::blog::application::ports::outgoing::{
    CategoryRepository, CategoryRepositoryError, CommentRepository, CommentRepositoryError,
    CreateCategoryData, InteractionLedger, InteractionLedgerError, PostQuery, PostQueryError,
    PostRepository, PostRepositoryError,
};

#[derive(Default)]
struct BlogData {
    users: HashMap<Uuid, String>,
    categories: HashMap<Uuid, Category>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl BlogData {
    fn view(&self, post: &Post) -> PostView {
        let category = self.categories.get(&post.category_id);
        PostView {
            post: post.clone(),
            author_username: self.users.get(&post.author_id).cloned().unwrap_or_default(),
            category_name: category.map(|c| c.name.clone()).unwrap_or_default(),
            category_slug: category.map(|c| c.slug.clone()).unwrap_or_default(),
        }
    }

    fn matches(&self, view: &PostView, filter: &PostFilter) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        view.post.is_published()
            && filter
                .category_slug
                .as_deref()
                .is_none_or(|slug| view.category_slug == slug)
            && filter
                .author_username
                .as_deref()
                .is_none_or(|name| view.author_username == name)
            && filter
                .title
                .as_deref()
                .is_none_or(|t| contains(&view.post.title, t))
            && filter
                .text
                .as_deref()
                .is_none_or(|t| contains(&view.post.title, t) || contains(&view.post.body, t))
            && filter.date.is_none_or(|date| {
                let (start, end) = date.range();
                let day = view.post.publish_date();
                start <= day && day < end
            })
    }

    fn published(&self, filter: &PostFilter) -> Vec<PostView> {
        let mut views: Vec<PostView> = self
            .posts
            .values()
            .map(|p| self.view(p))
            .filter(|v| self.matches(v, filter))
            .collect();
        views.sort_by(|a, b| {
            b.post
                .publish
                .cmp(&a.post.publish)
                .then(b.post.created_at.cmp(&a.post.created_at))
        });
        views
    }

    fn slug_taken(&self, slug: &str, date: NaiveDate, exclude: Option<Uuid>) -> bool {
        self.posts.values().any(|p| {
            Some(p.id) != exclude && p.slug == slug && p.publish_date() == date
        })
    }
}

/// Serves every blog repository and query port; clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryBlog {
    data: Arc<Mutex<BlogData>>,
}

impl InMemoryBlog {
    pub fn add_user(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.data
            .lock()
            .unwrap()
            .users
            .insert(id, username.to_string());
        id
    }

    pub fn add_category(&self, name: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slugify(name),
        };
        self.data
            .lock()
            .unwrap()
            .categories
            .insert(category.id, category.clone());
        category
    }

    pub fn add_post(
        &self,
        author_id: Uuid,
        category_id: Uuid,
        title: &str,
        status: PostStatus,
        publish: DateTime<Utc>,
    ) -> Post {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            category_id,
            title: title.to_string(),
            slug: slugify(title),
            body: format!("Body of {title}"),
            image_url: String::new(),
            status,
            publish,
            created_at: now,
            updated_at: now,
        };
        self.data
            .lock()
            .unwrap()
            .posts
            .insert(post.id, post.clone());
        post
    }

    pub fn add_comment(&self, post_id: Uuid, author_id: Uuid, body: &str, active: bool) -> Comment {
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            body: body.to_string(),
            active,
            created_at: now,
            updated_at: now,
        };
        self.data
            .lock()
            .unwrap()
            .comments
            .insert(comment.id, comment.clone());
        comment
    }

    pub fn post(&self, post_id: Uuid) -> Option<Post> {
        self.data.lock().unwrap().posts.get(&post_id).cloned()
    }

    pub fn post_count(&self) -> usize {
        self.data.lock().unwrap().posts.len()
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<Comment> {
        self.data.lock().unwrap().comments.get(&comment_id).cloned()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlog {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut categories: Vec<Category> =
            self.data.lock().unwrap().categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(self.data.lock().unwrap().categories.get(&id).cloned())
    }

    async fn create_category(
        &self,
        data: CreateCategoryData,
    ) -> Result<Category, CategoryRepositoryError> {
        let mut blog = self.data.lock().unwrap();
        if blog
            .categories
            .values()
            .any(|c| c.name == data.name || c.slug == data.slug)
        {
            return Err(CategoryRepositoryError::AlreadyExists);
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: data.name,
            slug: data.slug,
        };
        blog.categories.insert(category.id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl PostQuery for InMemoryBlog {
    async fn count_published(&self, filter: &PostFilter) -> Result<u64, PostQueryError> {
        Ok(self.data.lock().unwrap().published(filter).len() as u64)
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostView>, PostQueryError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .published(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_published(
        &self,
        publish_date: NaiveDate,
        slug: &str,
    ) -> Result<Option<PostView>, PostQueryError> {
        let blog = self.data.lock().unwrap();
        Ok(blog
            .posts
            .values()
            .find(|p| p.is_published() && p.slug == slug && p.publish_date() == publish_date)
            .map(|p| blog.view(p)))
    }

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, PostQueryError> {
        Ok(self.post(post_id))
    }

    async fn slug_taken(
        &self,
        slug: &str,
        publish_date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, PostQueryError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .slug_taken(slug, publish_date, exclude))
    }
}

#[async_trait]
impl PostRepository for InMemoryBlog {
    async fn create_post(
        &self,
        author_id: Uuid,
        post: NormalizedPost,
    ) -> Result<Post, PostRepositoryError> {
        let mut blog = self.data.lock().unwrap();
        if !blog.categories.contains_key(&post.category_id) {
            return Err(PostRepositoryError::CategoryNotFound);
        }
        if blog.slug_taken(&post.slug, post.publish.date_naive(), None) {
            return Err(PostRepositoryError::SlugTaken);
        }

        let now = Utc::now();
        let created = Post {
            id: Uuid::new_v4(),
            author_id,
            category_id: post.category_id,
            title: post.title,
            slug: post.slug,
            body: post.body,
            image_url: post.image_url,
            status: post.status,
            publish: post.publish,
            created_at: now,
            updated_at: now,
        };
        blog.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_post(
        &self,
        post_id: Uuid,
        post: NormalizedPost,
    ) -> Result<Post, PostRepositoryError> {
        let mut blog = self.data.lock().unwrap();
        if !blog.categories.contains_key(&post.category_id) {
            return Err(PostRepositoryError::CategoryNotFound);
        }
        if blog.slug_taken(&post.slug, post.publish.date_naive(), Some(post_id)) {
            return Err(PostRepositoryError::SlugTaken);
        }

        let existing = blog
            .posts
            .get_mut(&post_id)
            .ok_or(PostRepositoryError::NotFound)?;
        existing.category_id = post.category_id;
        existing.title = post.title;
        existing.slug = post.slug;
        existing.body = post.body;
        existing.image_url = post.image_url;
        existing.status = post.status;
        existing.publish = post.publish;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<(), PostRepositoryError> {
        let mut blog = self.data.lock().unwrap();
        blog.posts
            .remove(&post_id)
            .ok_or(PostRepositoryError::NotFound)?;
        blog.comments.retain(|_, c| c.post_id != post_id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlog {
    async fn list_active(&self, post_id: Uuid) -> Result<Vec<CommentView>, CommentRepositoryError> {
        let blog = self.data.lock().unwrap();
        let mut comments: Vec<CommentView> = blog
            .comments
            .values()
            .filter(|c| c.post_id == post_id && c.active)
            .map(|c| CommentView {
                comment: c.clone(),
                author_username: blog.users.get(&c.author_id).cloned().unwrap_or_default(),
            })
            .collect();
        comments.sort_by(|a, b| b.comment.updated_at.cmp(&a.comment.updated_at));
        Ok(comments)
    }

    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self.comment(comment_id))
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: String,
    ) -> Result<Comment, CommentRepositoryError> {
        Ok(self.add_comment(post_id, author_id, &body, true))
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), CommentRepositoryError> {
        self.data
            .lock()
            .unwrap()
            .comments
            .remove(&comment_id)
            .map(|_| ())
            .ok_or(CommentRepositoryError::NotFound)
    }

    async fn set_active(
        &self,
        comment_id: Uuid,
        active: bool,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut blog = self.data.lock().unwrap();
        let comment = blog
            .comments
            .get_mut(&comment_id)
            .ok_or(CommentRepositoryError::NotFound)?;
        comment.active = active;
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }
}

/// Reaction records for one target kind. Only targets registered with
/// [`InMemoryLedger::with_visible`] accept reactions.
pub struct InMemoryLedger<T> {
    visible: Arc<Mutex<HashSet<Uuid>>>,
    states: Arc<Mutex<HashMap<(Uuid, Uuid), ReactionState>>>,
    _target: PhantomData<fn() -> T>,
}

impl<T> Default for InMemoryLedger<T> {
    fn default() -> Self {
        Self {
            visible: Arc::default(),
            states: Arc::default(),
            _target: PhantomData,
        }
    }
}

impl<T> Clone for InMemoryLedger<T> {
    fn clone(&self) -> Self {
        Self {
            visible: Arc::clone(&self.visible),
            states: Arc::clone(&self.states),
            _target: PhantomData,
        }
    }
}

impl<T> InMemoryLedger<T> {
    pub fn with_visible(self, target_id: Uuid) -> Self {
        self.visible.lock().unwrap().insert(target_id);
        self
    }

    fn ensure_visible(&self, target_id: Uuid) -> Result<(), InteractionLedgerError> {
        if self.visible.lock().unwrap().contains(&target_id) {
            Ok(())
        } else {
            Err(InteractionLedgerError::TargetNotFound)
        }
    }
}

#[async_trait]
impl<T: InteractionTarget> InteractionLedger<T> for InMemoryLedger<T> {
    async fn toggle(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        pressed: Reaction,
    ) -> Result<ReactionState, InteractionLedgerError> {
        self.ensure_visible(target_id)?;
        let mut states = self.states.lock().unwrap();
        let state = states.entry((target_id, user_id)).or_default();
        *state = state.toggle(pressed);
        Ok(*state)
    }

    async fn summary(
        &self,
        target_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<ReactionSummary, InteractionLedgerError> {
        self.ensure_visible(target_id)?;
        let states = self.states.lock().unwrap();
        let for_target = states.iter().filter(|((t, _), _)| *t == target_id);

        let mut summary = ReactionSummary {
            likes: 0,
            dislikes: 0,
            viewer: None,
        };
        for ((_, user), state) in for_target {
            summary.likes += u64::from(state.liked);
            summary.dislikes += u64::from(state.disliked);
            if Some(*user) == viewer {
                summary.viewer = state.current();
            }
        }
        Ok(summary)
    }
}
