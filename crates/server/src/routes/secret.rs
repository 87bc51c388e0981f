//! Protected page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::PageContext;

/// Secret page template.
#[derive(Template, WebTemplate)]
#[template(path = "secret.html")]
pub struct SecretTemplate {
    pub page: PageContext,
}

/// Display the secret page. Requires login.
#[instrument(skip(auth), fields(user_id = %auth.user_id))]
pub async fn secret(auth: RequireAuth) -> Result<impl IntoResponse> {
    Ok(SecretTemplate {
        page: auth.session.page_context().await?,
    })
}
