//! Blog post handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use web_labs_core::Post;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentSession;
use crate::models::PageContext;
use crate::state::AppState;

/// Number of characters shown per post on the listing page.
const EXCERPT_CHARS: usize = 160;

/// Post summary for the listing page.
pub struct PostSummary {
    pub index: usize,
    pub title: String,
    pub author: String,
    pub date: String,
    pub image_id: String,
    pub excerpt: String,
    pub comment_count: usize,
}

impl PostSummary {
    fn new(index: usize, post: &Post) -> Self {
        Self {
            index,
            title: post.title.clone(),
            author: post.author.clone(),
            date: post.display_date(),
            image_id: post.image_id.clone(),
            excerpt: post.excerpt(EXCERPT_CHARS),
            comment_count: post.comment_count(),
        }
    }
}

/// Posts listing template.
#[derive(Template, WebTemplate)]
#[template(path = "posts.html")]
pub struct PostsTemplate {
    pub page: PageContext,
    pub title: &'static str,
    pub posts: Vec<PostSummary>,
}

/// Post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub page: PageContext,
    pub index: usize,
    pub post: Post,
}

/// Display all posts.
#[instrument(skip(state, current))]
pub async fn index(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<impl IntoResponse> {
    let posts = state
        .content()
        .posts()
        .iter()
        .enumerate()
        .map(|(index, post)| PostSummary::new(index, post))
        .collect();

    Ok(PostsTemplate {
        page: current.page_context().await?,
        title: "Посты",
        posts,
    })
}

/// Display a single post with its comments.
///
/// # Errors
///
/// Returns 404 if there is no post at `index`.
#[instrument(skip(state, current))]
pub async fn show(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    current: CurrentSession,
) -> Result<impl IntoResponse> {
    let post = state
        .content()
        .get_post(index)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("post {index}")))?;

    Ok(PostTemplate {
        page: current.page_context().await?,
        index,
        post,
    })
}
