//! Core types for Web Labs.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod phone;
pub mod post;
pub mod session;

pub use credential::Credential;
pub use id::*;
pub use phone::{PhoneCheck, PhoneStatus, normalize};
pub use post::{Comment, Post};
pub use session::{AuthState, Identity, SessionState};
