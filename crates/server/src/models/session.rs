//! Session-related types.
//!
//! Types stored in the session besides the core [`SessionState`].
//!
//! [`SessionState`]: web_labs_core::SessionState

use serde::{Deserialize, Serialize};

/// Visual category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Warning,
    Danger,
}

impl FlashCategory {
    /// CSS class suffix used by the templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub message: String,
}

impl FlashMessage {
    #[must_use]
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// CSS class suffix for this message.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.category.as_str()
    }
}

/// Per-request data every page template needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Whether the visitor is logged in (drives the navigation links).
    pub authenticated: bool,
    /// Flash messages drained from the session for this render.
    pub flashes: Vec<FlashMessage>,
}

/// User-facing messages.
pub mod messages {
    /// Shown after a successful login.
    pub const LOGIN_SUCCESS: &str = "Вы успешно аутентифицированы";

    /// Shown when login credentials do not match.
    pub const LOGIN_FAILED: &str = "Пользователь не найден, проверьте данные!";

    /// Shown when an anonymous visitor hits a protected page.
    pub const LOGIN_REQUIRED: &str = "Необходима регистрация! :<";
}

/// Session keys.
pub mod keys {
    /// Key for the typed session state (auth state and anonymous visits).
    pub const STATE: &str = "state";

    /// Key for queued flash messages.
    pub const FLASHES: &str = "flashes";
}
