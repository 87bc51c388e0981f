//! Authentication route handlers.
//!
//! Handles login with an optional remember-me cookie and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, HeaderName},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use web_labs_core::{DEFAULT_LANDING, resolve_next_destination};

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    CurrentSession, REMEMBER_COOKIE_NAME, RequireAuth, find_cookie, found, remember_cookie,
    remember_removal_cookie, set_cookie_header,
};
use crate::models::{FlashCategory, FlashMessage, PageContext, messages};
use crate::services::AuthError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Present (any value) when the checkbox is ticked.
    pub remember_me: Option<String>,
    pub next: Option<String>,
}

/// Query parameters carrying the post-login destination.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub error: Option<&'static str>,
    /// Destination carried through the form as a hidden field.
    pub next: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(current))]
pub async fn login_page(
    current: CurrentSession,
    Query(query): Query<NextQuery>,
) -> Result<impl IntoResponse> {
    let next = resolve_next_destination(query.next.as_deref(), None, DEFAULT_LANDING);

    Ok(LoginTemplate {
        page: current.page_context().await?,
        error: None,
        next: next.to_string(),
    })
}

/// Handle login form submission.
///
/// On success, cycles the session id, queues the success flash and
/// redirects to `next`. A remember-me cookie the client already holds is
/// replaced, or removed when remember-me is not ticked. On failure,
/// re-renders the form with an error.
#[instrument(skip(state, current, headers, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    mut current: CurrentSession,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let next = safe_destination(resolve_next_destination(
        query.next.as_deref(),
        form.next.as_deref(),
        DEFAULT_LANDING,
    ))
    .to_string();

    let remember_me = form.remember_me.is_some();
    let previous_token = find_cookie(&headers, REMEMBER_COOKIE_NAME);
    let result = state.auth_service().login(
        current.state_mut(),
        &form.username,
        &form.password,
        remember_me,
        previous_token.as_deref(),
    );

    let authenticated = match result {
        Ok(authenticated) => authenticated,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login failed: invalid credentials");
            return Ok(LoginTemplate {
                page: current.page_context().await?,
                error: AuthError::InvalidCredentials.user_message(),
                next,
            }
            .into_response());
        }
        Err(err) => return Err(err.into()),
    };

    current.session().cycle_id().await?;
    current.save().await?;
    current
        .push_flash(FlashMessage::new(
            FlashCategory::Success,
            messages::LOGIN_SUCCESS,
        ))
        .await?;

    set_sentry_user(&authenticated.user_id, Some(&authenticated.login));
    add_breadcrumb("auth", "Logged in", None);
    tracing::info!(
        user_id = %authenticated.user_id,
        remember_me,
        "User logged in"
    );

    let cookie = match (authenticated.remember_token, previous_token) {
        (Some(token), _) => Some(remember_cookie(token, state.config())),
        (None, Some(_)) => Some(remember_removal_cookie(state.config())),
        (None, None) => None,
    };
    let cookies: Vec<(HeaderName, String)> = cookie.iter().map(set_cookie_header).collect();

    Ok((AppendHeaders(cookies), found(&next)).into_response())
}

/// Handle logout. Requires login.
///
/// Revokes the remember-me token, if any, and returns to the home page. The
/// session itself is kept, so the anonymous visit count carries on.
#[instrument(skip(state, auth, headers), fields(user_id = %auth.user_id))]
pub async fn logout(
    State(state): State<AppState>,
    auth: RequireAuth,
    headers: HeaderMap,
) -> Result<Response> {
    let RequireAuth {
        user_id,
        session: mut current,
    } = auth;

    let token = find_cookie(&headers, REMEMBER_COOKIE_NAME);
    state
        .auth_service()
        .logout(current.state_mut(), token.as_deref())?;
    current.save().await?;

    clear_sentry_user();
    add_breadcrumb("auth", "Logged out", None);
    tracing::info!(user_id = %user_id, "User logged out");

    let cookies: Vec<(HeaderName, String)> = token
        .map(|_| set_cookie_header(&remember_removal_cookie(state.config())))
        .into_iter()
        .collect();

    Ok((AppendHeaders(cookies), found(DEFAULT_LANDING)).into_response())
}

/// Only allow same-site relative destinations.
///
/// Anything that is not a plain absolute path (`/...`) falls back to the
/// default landing page.
fn safe_destination(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") && !next.starts_with("/\\") {
        next
    } else {
        DEFAULT_LANDING
    }
}
