//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (navigation, request URL)
//! GET  /health                 - Health check
//!
//! # Posts
//! GET  /posts                  - Post listing
//! GET  /posts/{index}          - Post detail with comments (404 if absent)
//! GET  /about                  - About page
//!
//! # Request inspection
//! GET  /args                   - Query string arguments
//! GET  /headers                - Request headers
//! GET  /cookies                - Cookie demo (toggles `name=Bob`)
//! GET  /form                   - Generic form
//! POST /form                   - Echo submitted fields
//! GET  /phone_form             - Phone form
//! POST /phone_form             - Check and normalize a phone number
//!
//! # Sessions and auth
//! GET  /counter                - Visit counter
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /logout                 - Logout (requires auth)
//! GET  /secret                 - Protected page (requires auth)
//! ```

pub mod auth;
pub mod counter;
pub mod home;
pub mod phone;
pub mod posts;
pub mod request_info;
pub mod secret;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the posts routes router.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::index))
        .route("/{index}", get(posts::show))
}

/// Create the request inspection routes router.
pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/args", get(request_info::args))
        .route("/headers", get(request_info::headers))
        .route("/cookies", get(request_info::cookies))
        .route(
            "/form",
            get(request_info::form_page).post(request_info::form_submit),
        )
        .route(
            "/phone_form",
            get(phone::phone_form_page).post(phone::phone_form_submit),
        )
}

/// Create the session and auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/counter", get(counter::counter))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/secret", get(secret::secret))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/about", get(home::about))
        // Posts
        .nest("/posts", post_routes())
        // Request inspection labs
        .merge(request_routes())
        // Counter, login, logout, secret
        .merge(auth_routes())
}
