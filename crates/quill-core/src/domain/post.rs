use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slugify;
use crate::error::{DomainError, RepoError};

/// Post entity - a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub author_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post, deriving its slug from the title.
    ///
    /// A missing or empty title is a validation failure.
    pub fn create(
        title: Option<String>,
        content: Option<String>,
        author_id: Option<Uuid>,
        category_id: Option<Uuid>,
    ) -> Result<Self, DomainError> {
        let title = title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Validation("Title required".to_string()))?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            title,
            content,
            author_id,
            category_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the whitelisted fields present in `patch` and refresh `updated_at`.
    ///
    /// The slug keeps the value derived at creation time.
    pub fn apply(&mut self, patch: PostPatch) -> Result<(), DomainError> {
        if let Some(title) = patch.title {
            if title.is_empty() {
                return Err(DomainError::Validation("Title required".to_string()));
            }
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// The mutable subset of a post.
///
/// The outer `Option` means "field present in the request"; the inner one
/// on nullable fields allows clearing them.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub category_id: Option<Option<Uuid>>,
}

/// Filter for listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category_id: Option<Uuid>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.category_id
            .is_none_or(|category| post.category_id == Some(category))
    }
}

/// Offset pagination as requested by the caller.
///
/// `skip` is not bounds-checked here: a page below 1 produces a negative
/// skip and it is up to the store to reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Pagination {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Compute `skip = (page - 1) * limit`.
    pub fn from_page(page: i64, limit: i64) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }

    /// Resolve the window a store should read: `(offset, max rows)`.
    ///
    /// Negative skips are rejected, a zero limit means unbounded and a
    /// negative limit counts by its absolute value.
    pub fn window(&self) -> Result<(u64, Option<u64>), RepoError> {
        let offset = u64::try_from(self.skip)
            .map_err(|_| RepoError::Query(format!("skip must be non-negative, got {}", self.skip)))?;
        let limit = match self.limit.unsigned_abs() {
            0 => None,
            n => Some(n),
        };
        Ok((offset, limit))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_page(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}
