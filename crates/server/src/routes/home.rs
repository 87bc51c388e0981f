//! Home and about page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{HeaderMap, Uri, header},
    response::IntoResponse,
};
use tracing::instrument;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::filters;
use crate::middleware::CurrentSession;
use crate::models::PageContext;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    /// Full URL of the current request.
    pub request_url: String,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

/// Display the home page.
#[instrument(skip(state, current, headers))]
pub async fn home(
    State(state): State<AppState>,
    current: CurrentSession,
    headers: HeaderMap,
    uri: Uri,
) -> Result<impl IntoResponse> {
    Ok(HomeTemplate {
        page: current.page_context().await?,
        request_url: request_url(state.config(), &headers, &uri),
    })
}

/// Display the about page.
#[instrument(skip(current))]
pub async fn about(current: CurrentSession) -> Result<impl IntoResponse> {
    Ok(AboutTemplate {
        page: current.page_context().await?,
    })
}

/// Reconstruct the absolute URL the client requested.
///
/// Uses the `Host` header when present, falling back to the configured
/// bind address.
fn request_url(config: &ServerConfig, headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = if config.secure_cookies() { "https" } else { "http" };
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| config.socket_addr().to_string(), str::to_string);
    let path = uri.path_and_query().map_or("/", |pq| pq.as_str());

    format!("{scheme}://{host}{path}")
}
