//! Web Labs Core - Shared types library.
//!
//! This crate provides the logic-bearing pieces of the labs server:
//! - phone number classification and normalization
//! - session authentication state and visit-counting identities
//! - the access guard and post-login destination rules
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage, no HTTP. Stateful collaborators (credential lookup, per-user
//! counters, sessions) live in the server crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, phone checks, credentials, session state, posts
//! - [`access`] - `require_auth` guard and `next` destination resolution

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod types;

pub use access::{
    Access, DEFAULT_LANDING, LOGIN_PATH, LoginRedirect, require_auth, resolve_next_destination,
};
pub use types::*;
