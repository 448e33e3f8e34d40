use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::blogs::repo::{Blog, BlogWithAuthor};
use crate::users::repo::User;

/// Request body for creating a blog. The author is always the
/// authenticated user; there is deliberately no author field here.
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
}

/// Author summary embedded in blog responses.
#[derive(Debug, Serialize)]
pub struct AuthorOut {
    pub username: String,
    pub email: String,
}

/// Blog as returned to clients, author embedded.
#[derive(Debug, Serialize)]
pub struct BlogOut {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author_id: i64,
    pub author: AuthorOut,
}

impl BlogOut {
    pub fn from_parts(blog: Blog, author: &User) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            created_at: blog.created_at,
            author_id: blog.author_id,
            author: AuthorOut {
                username: author.username.clone(),
                email: author.email.clone(),
            },
        }
    }
}

impl From<BlogWithAuthor> for BlogOut {
    fn from(row: BlogWithAuthor) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            author_id: row.author_id,
            author: AuthorOut {
                username: row.author_username,
                email: row.author_email,
            },
        }
    }
}

/// 1-indexed pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    25
}

impl Pagination {
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.max(1)
    }

    /// Saturates instead of wrapping; query values are attacker-supplied
    /// and a saturated offset just yields an empty page.
    pub fn skip(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedBlogs {
    pub items: Vec<BlogOut>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Ceiling division, saturating so an oversized `limit` cannot wrap the
/// page count negative.
pub fn total_pages(total_count: i64, limit: i64) -> i64 {
    total_count.saturating_add(limit.saturating_sub(1)) / limit.max(1)
}
