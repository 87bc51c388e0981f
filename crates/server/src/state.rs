//! Application state shared across handlers.

use std::sync::Arc;

use chrono::TimeDelta;

use crate::config::ServerConfig;
use crate::content::{ContentError, ContentStore};
use crate::db::{
    CredentialRepository, InMemoryVisitCounters, RememberTokens, StaticCredentials,
    VisitCounterRepository,
};
use crate::services::{AuthService, VisitCounter};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, repositories and content.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    credentials: Arc<dyn CredentialRepository>,
    visit_counters: Arc<dyn VisitCounterRepository>,
    remember_tokens: RememberTokens,
    content: ContentStore,
}

impl AppState {
    /// Create a new application state with the built-in credential and
    /// in-memory counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded posts cannot be parsed.
    pub fn new(config: ServerConfig) -> Result<Self, ContentError> {
        let content = ContentStore::load_embedded()?;
        Ok(Self::with_repositories(
            config,
            Arc::new(StaticCredentials::default()),
            Arc::new(InMemoryVisitCounters::new()),
            content,
        ))
    }

    /// Create application state from explicit repositories.
    #[must_use]
    pub fn with_repositories(
        config: ServerConfig,
        credentials: Arc<dyn CredentialRepository>,
        visit_counters: Arc<dyn VisitCounterRepository>,
        content: ContentStore,
    ) -> Self {
        let remember_ttl = TimeDelta::try_days(config.remember_days).unwrap_or(TimeDelta::MAX);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                credentials,
                visit_counters,
                remember_tokens: RememberTokens::new(remember_ttl),
                content,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the credential repository.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialRepository {
        self.inner.credentials.as_ref()
    }

    /// Get the per-user visit counters.
    #[must_use]
    pub fn visit_counters(&self) -> &dyn VisitCounterRepository {
        self.inner.visit_counters.as_ref()
    }

    /// Get the remember-me token table.
    #[must_use]
    pub fn remember_tokens(&self) -> &RememberTokens {
        &self.inner.remember_tokens
    }

    /// Get the blog posts.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Authentication service over this state's repositories.
    #[must_use]
    pub fn auth_service(&self) -> AuthService<'_> {
        AuthService::new(self.credentials(), self.remember_tokens())
    }

    /// Visit counter over this state's repositories.
    #[must_use]
    pub fn visit_counter(&self) -> VisitCounter<'_> {
        VisitCounter::new(self.visit_counters())
    }
}
