//! Domain models for the server.

pub mod session;

pub use session::{FlashCategory, FlashMessage, PageContext, keys as session_keys, messages};
