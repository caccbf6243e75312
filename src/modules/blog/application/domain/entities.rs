use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;
pub const MAX_CATEGORY_SLUG_LENGTH: usize = 50;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_POST_SLUG_LENGTH: usize = 50;
pub const MAX_IMAGE_URL_LENGTH: usize = 255;
pub const MAX_COMMENT_LENGTH: usize = 255;

/// The authenticated caller, as far as content permissions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub image_url: String,
    pub status: PostStatus,
    pub publish: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Date part of the canonical URL `/api/posts/{y}/{m}/{d}/{slug}`.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }
}

/// A post with the author and category names listings show.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub author_username: String,
    pub category_name: String,
    pub category_slug: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_username: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("Category name must be 1-50 characters")]
    InvalidCategoryName,

    #[error("Slug must be 1-50 lowercase letters, digits, hyphens or underscores")]
    InvalidSlug,

    #[error("Title must be 1-200 characters")]
    InvalidTitle,

    #[error("Body cannot be empty")]
    EmptyBody,

    #[error("Image URL must be at most 255 characters")]
    ImageUrlTooLong,

    #[error("Comment must be 1-255 characters")]
    InvalidComment,
}

pub fn validate_category_name(name: &str) -> Result<(), ContentValidationError> {
    let len = name.trim().chars().count();
    if len == 0 || len > MAX_CATEGORY_NAME_LENGTH {
        return Err(ContentValidationError::InvalidCategoryName);
    }
    Ok(())
}

pub fn validate_comment_body(body: &str) -> Result<(), ContentValidationError> {
    let len = body.trim().chars().count();
    if len == 0 || len > MAX_COMMENT_LENGTH {
        return Err(ContentValidationError::InvalidComment);
    }
    Ok(())
}

/// Fields an author supplies when writing or editing a post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    pub image_url: String,
    pub category_id: Uuid,
    pub status: PostStatus,
    pub publish: Option<DateTime<Utc>>,
}

impl PostDraft {
    /// Validates and fills in the slug (from the title) and publish time.
    pub fn normalize(self, now: DateTime<Utc>) -> Result<NormalizedPost, ContentValidationError> {
        let title = self.title.trim().to_string();
        let len = title.chars().count();
        if len == 0 || len > MAX_TITLE_LENGTH {
            return Err(ContentValidationError::InvalidTitle);
        }

        if self.body.trim().is_empty() {
            return Err(ContentValidationError::EmptyBody);
        }

        if self.image_url.chars().count() > MAX_IMAGE_URL_LENGTH {
            return Err(ContentValidationError::ImageUrlTooLong);
        }

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => super::slug::slugify_within(&title, MAX_POST_SLUG_LENGTH),
        };
        super::slug::validate_slug(&slug, MAX_POST_SLUG_LENGTH)?;

        Ok(NormalizedPost {
            title,
            slug,
            body: self.body,
            image_url: self.image_url.trim().to_string(),
            category_id: self.category_id,
            status: self.status,
            publish: self.publish.unwrap_or(now),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPost {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub image_url: String,
    pub category_id: Uuid,
    pub status: PostStatus,
    pub publish: DateTime<Utc>,
}
