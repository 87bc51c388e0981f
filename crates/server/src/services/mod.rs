//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Login, logout and remember-me restore
//! - `visits` - Visit counting per identity

pub mod auth;
pub mod visits;

pub use auth::{AuthError, AuthService, AuthenticatedSession};
pub use visits::VisitCounter;
