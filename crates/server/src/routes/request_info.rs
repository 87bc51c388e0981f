//! Request inspection handlers: query arguments, headers, cookies and forms.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse},
};
use tower_sessions::cookie::Cookie;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentSession, request_cookies, set_cookie_header};
use crate::models::PageContext;

/// Name of the cookie toggled by the cookies page.
const DEMO_COOKIE_NAME: &str = "name";

/// Value set when the demo cookie is absent.
const DEMO_COOKIE_VALUE: &str = "Bob";

// =============================================================================
// Templates
// =============================================================================

/// Query arguments template.
#[derive(Template, WebTemplate)]
#[template(path = "args.html")]
pub struct ArgsTemplate {
    pub page: PageContext,
    pub args: Vec<(String, String)>,
}

/// Request headers template.
#[derive(Template, WebTemplate)]
#[template(path = "headers.html")]
pub struct HeadersTemplate {
    pub page: PageContext,
    pub headers: Vec<(String, String)>,
}

/// Cookies template.
#[derive(Template, WebTemplate)]
#[template(path = "cookies.html")]
pub struct CookiesTemplate {
    pub page: PageContext,
    /// Cookies as received with this request.
    pub cookies: Vec<(String, String)>,
    /// Whether this response sets (rather than removes) the demo cookie.
    pub setting: bool,
}

/// Generic form template.
#[derive(Template, WebTemplate)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub page: PageContext,
    /// Submitted fields; `None` for the initial GET.
    pub fields: Option<Vec<(String, String)>>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the query string arguments.
#[instrument(skip(current))]
pub async fn args(
    current: CurrentSession,
    Query(args): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    Ok(ArgsTemplate {
        page: current.page_context().await?,
        args,
    })
}

/// Display the request headers.
#[instrument(skip(current, headers))]
pub async fn headers(current: CurrentSession, headers: HeaderMap) -> Result<impl IntoResponse> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    Ok(HeadersTemplate {
        page: current.page_context().await?,
        headers,
    })
}

/// Display the request cookies and toggle the demo cookie.
///
/// Sets `name=Bob` when the cookie is absent and removes it when present,
/// so consecutive visits alternate.
#[instrument(skip(current, headers))]
pub async fn cookies(current: CurrentSession, headers: HeaderMap) -> Result<impl IntoResponse> {
    let cookies = request_cookies(&headers);
    let setting = !cookies.iter().any(|(name, _)| name == DEMO_COOKIE_NAME);

    let mut cookie = Cookie::build((DEMO_COOKIE_NAME, DEMO_COOKIE_VALUE))
        .path("/")
        .build();
    if !setting {
        cookie.make_removal();
    }

    let page = CookiesTemplate {
        page: current.page_context().await?,
        cookies,
        setting,
    };

    Ok((AppendHeaders([set_cookie_header(&cookie)]), page))
}

/// Display the empty form.
#[instrument(skip(current))]
pub async fn form_page(current: CurrentSession) -> Result<impl IntoResponse> {
    Ok(FormTemplate {
        page: current.page_context().await?,
        fields: None,
    })
}

/// Echo the submitted form fields.
#[instrument(skip(current, fields))]
pub async fn form_submit(
    current: CurrentSession,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    Ok(FormTemplate {
        page: current.page_context().await?,
        fields: Some(fields),
    })
}
