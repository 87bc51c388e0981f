//! Session and authentication extractors.
//!
//! [`CurrentSession`] loads the typed [`SessionState`] for a request and
//! restores a remembered login before the handler runs. [`RequireAuth`]
//! additionally guards protected routes, redirecting anonymous visitors to
//! the login page with the requested resource in `next`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts, uri::PathAndQuery},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use web_labs_core::{Access, LoginRedirect, SessionState, UserId, require_auth};

use crate::error::{AppError, set_sentry_user};
use crate::middleware::cookies::{REMEMBER_COOKIE_NAME, find_cookie};
use crate::models::{FlashCategory, FlashMessage, PageContext, messages, session_keys};
use crate::state::AppState;

/// Extractor for the request's session and its typed state.
///
/// Mutations go through [`state_mut`](Self::state_mut) and must be written
/// back with [`save`](Self::save).
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut current: CurrentSession) -> Result<String> {
///     let count = current.state_mut().record_anonymous_visit();
///     current.save().await?;
///     Ok(count.to_string())
/// }
/// ```
pub struct CurrentSession {
    session: Session,
    state: SessionState,
}

impl CurrentSession {
    /// The underlying tower-sessions handle.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The session state as loaded for this request.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mutable access to the session state.
    pub const fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Write the session state back to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save(&self) -> Result<(), AppError> {
        save_state(&self.session, &self.state).await?;
        Ok(())
    }

    /// Queue a flash message for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn push_flash(&self, flash: FlashMessage) -> Result<(), AppError> {
        push_flash(&self.session, flash).await?;
        Ok(())
    }

    /// Build the page context, draining queued flash messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn page_context(&self) -> Result<PageContext, AppError> {
        Ok(PageContext {
            authenticated: self.state.is_authenticated(),
            flashes: take_flashes(&self.session).await?,
        })
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let mut state: SessionState = session
            .get(session_keys::STATE)
            .await?
            .unwrap_or_default();

        if !state.is_authenticated()
            && let Some(token) = find_cookie(&parts.headers, REMEMBER_COOKIE_NAME)
            && let Some(user_id) = app.auth_service().restore(&mut state, &token)?
        {
            session.cycle_id().await?;
            save_state(&session, &state).await?;
            set_sentry_user(&user_id, None);
            tracing::info!(user_id = %user_id, "Restored login from remember-me token");
        }

        Ok(Self { session, state })
    }
}

/// Extractor that requires an authenticated session.
///
/// If the visitor is anonymous, queues the "login required" flash and
/// redirects to `/login?next=<requested resource>`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(auth: RequireAuth) -> impl IntoResponse {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```
pub struct RequireAuth {
    pub user_id: UserId,
    pub session: CurrentSession,
}

/// `302 Found` redirect to `location`.
///
/// An unrepresentable location yields a 500 response.
#[must_use]
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Rejection for [`RequireAuth`].
pub enum AuthRejection {
    /// Redirect to the login page.
    RedirectToLogin(LoginRedirect),
    /// Loading the session failed.
    Failed(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(redirect) => found(&redirect.location()),
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl From<AppError> for AuthRejection {
    fn from(err: AppError) -> Self {
        Self::Failed(err)
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = CurrentSession::from_request_parts(parts, app).await?;

        let requested = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path(), PathAndQuery::as_str);

        match require_auth(session.state().auth(), requested) {
            Access::Allow(user_id) => Ok(Self { user_id, session }),
            Access::Redirect(redirect) => {
                session
                    .push_flash(FlashMessage::new(
                        FlashCategory::Warning,
                        messages::LOGIN_REQUIRED,
                    ))
                    .await?;
                tracing::debug!(next = redirect.next(), "Login required");
                Err(AuthRejection::RedirectToLogin(redirect))
            }
        }
    }
}

/// Helper to write the session state.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_state(
    session: &Session,
    state: &SessionState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::STATE, state).await
}

/// Helper to queue a flash message in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(
    session: &Session,
    flash: FlashMessage,
) -> Result<(), tower_sessions::session::Error> {
    let mut flashes: Vec<FlashMessage> = session
        .get(session_keys::FLASHES)
        .await?
        .unwrap_or_default();
    flashes.push(flash);
    session.insert(session_keys::FLASHES, flashes).await
}

/// Helper to remove and return all queued flash messages.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_flashes(
    session: &Session,
) -> Result<Vec<FlashMessage>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<FlashMessage>>(session_keys::FLASHES)
        .await?
        .unwrap_or_default())
}
