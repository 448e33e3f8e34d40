use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    blogs::dto::{total_pages, BlogOut, CreateBlogRequest, PaginatedBlogs, Pagination},
    blogs::repo::Blog,
    error::{ApiError, ApiResult},
    state::AppState,
    users::repo::User,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs/", get(list_blogs))
        .route("/blogs/:id", get(get_blog))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/blogs/", post(create_blog))
}

#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<PaginatedBlogs>> {
    let page = p.page();
    let limit = p.limit();

    let rows = Blog::list(&state.db, p.skip(), limit).await?;
    let total_count = Blog::count(&state.db).await?;

    Ok(Json(PaginatedBlogs {
        items: rows.into_iter().map(BlogOut::from).collect(),
        total_count,
        page,
        limit,
        total_pages: total_pages(total_count, limit),
    }))
}

#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<BlogOut>> {
    let blog = Blog::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog not found".into()))?;

    // The FK guarantees the author row exists; a miss here is corruption.
    let author = User::find_by_id(&state.db, blog.author_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!("author row missing for blog {}", blog.id))
        })?;

    Ok(Json(BlogOut::from_parts(blog, &author)))
}

#[instrument(skip(state, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
    Json(payload): Json<CreateBlogRequest>,
) -> ApiResult<Json<BlogOut>> {
    let author = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| {
            warn!(username = %username, "token subject not found");
            ApiError::Auth("Could not validate credentials".into())
        })?;

    let blog = Blog::create(&state.db, &payload.title, &payload.content, author.id).await?;
    info!(blog_id = blog.id, author_id = author.id, "blog created");

    Ok(Json(BlogOut::from_parts(blog, &author)))
}
