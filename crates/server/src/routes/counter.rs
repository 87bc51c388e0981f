//! Visit counter handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::CurrentSession;
use crate::models::PageContext;
use crate::state::AppState;

/// Counter page template.
#[derive(Template, WebTemplate)]
#[template(path = "counter.html")]
pub struct CounterTemplate {
    pub page: PageContext,
    pub count: u64,
}

/// Count a visit for the current identity and display the total.
///
/// Anonymous visitors are counted per session; logged-in users share one
/// count across all of their sessions.
#[instrument(skip(state, current))]
pub async fn counter(
    State(state): State<AppState>,
    mut current: CurrentSession,
) -> Result<impl IntoResponse> {
    let count = state.visit_counter().visit(current.state_mut())?;
    current.save().await?;

    Ok(CounterTemplate {
        page: current.page_context().await?,
        count,
    })
}
