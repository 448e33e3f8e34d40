use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Blog record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author_id: i64,
}

/// Blog row with its author summary joined in. Relations are fetched
/// explicitly; nothing is lazy-loaded.
#[derive(Debug, Clone, FromRow)]
pub struct BlogWithAuthor {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub author_id: i64,
    pub author_username: String,
    pub author_email: String,
}

impl Blog {
    /// Page of blogs, newest first. `id` breaks ties so paging is stable
    /// when rows share a timestamp.
    pub async fn list(db: &PgPool, skip: i64, limit: i64) -> sqlx::Result<Vec<BlogWithAuthor>> {
        sqlx::query_as::<_, BlogWithAuthor>(
            r#"
            SELECT b.id, b.title, b.content, b.created_at, b.author_id,
                   u.username AS author_username, u.email AS author_email
            FROM blogs b
            JOIN users u ON u.id = b.author_id
            ORDER BY b.created_at DESC, b.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(db)
        .await
    }

    pub async fn count(db: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blogs")
            .fetch_one(db)
            .await
    }

    /// Plain row fetch; the caller resolves the author separately and
    /// embeds it.
    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Blog>> {
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, content, created_at, author_id
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_by_author(db: &PgPool, author_id: i64) -> sqlx::Result<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, content, created_at, author_id
            FROM blogs
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(db)
        .await
    }

    /// Single-row insert; the server assigns id and creation timestamp.
    pub async fn create(
        db: &PgPool,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> sqlx::Result<Blog> {
        sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, created_at, author_id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(db)
        .await
    }
}
