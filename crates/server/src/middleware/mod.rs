//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with in-memory store)
//!
//! Authentication is applied per handler through the extractors in [`auth`].

pub mod auth;
pub mod cookies;
pub mod session;

pub use auth::{
    AuthRejection, CurrentSession, RequireAuth, found, push_flash, save_state, take_flashes,
};
pub use cookies::{
    REMEMBER_COOKIE_NAME, find_cookie, remember_cookie, remember_removal_cookie, request_cookies,
    set_cookie_header,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
