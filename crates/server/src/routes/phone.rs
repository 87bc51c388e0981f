//! Phone form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use web_labs_core::PhoneCheck;

use crate::error::Result;
use crate::filters;
use crate::middleware::CurrentSession;
use crate::models::PageContext;

/// Phone form data.
#[derive(Debug, Deserialize)]
pub struct PhoneForm {
    #[serde(default)]
    pub phone: String,
}

/// Outcome of a submitted phone number, ready for display.
pub struct PhoneView {
    pub raw: String,
    pub digits: String,
    pub status: String,
    pub formatted: Option<String>,
    pub error: Option<&'static str>,
    pub valid: bool,
}

impl From<&PhoneCheck> for PhoneView {
    fn from(check: &PhoneCheck) -> Self {
        Self {
            raw: check.raw().to_string(),
            digits: check.digits().to_string(),
            status: check.status().to_string(),
            formatted: check.formatted().map(str::to_string),
            error: check.status().error_message(),
            valid: check.is_valid(),
        }
    }
}

/// Phone form template.
#[derive(Template, WebTemplate)]
#[template(path = "phone_form.html")]
pub struct PhoneFormTemplate {
    pub page: PageContext,
    pub result: Option<PhoneView>,
}

/// Display the empty phone form.
#[instrument(skip(current))]
pub async fn phone_form_page(current: CurrentSession) -> Result<impl IntoResponse> {
    Ok(PhoneFormTemplate {
        page: current.page_context().await?,
        result: None,
    })
}

/// Check a submitted phone number.
#[instrument(skip(current, form))]
pub async fn phone_form_submit(
    current: CurrentSession,
    Form(form): Form<PhoneForm>,
) -> Result<impl IntoResponse> {
    let check = PhoneCheck::normalize(&form.phone);
    tracing::debug!(status = %check.status(), valid = check.is_valid(), "Checked phone number");

    Ok(PhoneFormTemplate {
        page: current.page_context().await?,
        result: Some(PhoneView::from(&check)),
    })
}
