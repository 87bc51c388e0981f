//! Integration tests for Web Labs.
//!
//! Each test spawns the full application in-process on an ephemeral port and
//! drives it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p web-labs-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Login, logout, protected pages, remember-me
//! - `counter` - Visit counting per identity
//! - `labs` - Request inspection, phone form and posts pages

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::{Client, Response, redirect::Policy};

use web_labs_server::config::ServerConfig;
use web_labs_server::state::AppState;

/// Errors raised while setting up a test server.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// A running server plus a cookie-keeping client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Spawn the application on `127.0.0.1:0` and return a context for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind or the client cannot be built.
    pub async fn spawn() -> Result<Self, SetupError> {
        let listener =
            tokio::net::TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
                .await?;
        let addr = listener.local_addr()?;

        let config = ServerConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: format!("http://{addr}"),
            ..ServerConfig::default()
        };
        let app = web_labs_server::app(AppState::new(config)?);

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                report_server_exit(&err);
            }
        });

        Ok(Self {
            client: session_client()?,
            base_url: format!("http://{addr}"),
        })
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A fresh client with its own cookie jar (a separate browser session).
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn new_session(&self) -> Result<Client, SetupError> {
        session_client()
    }

    /// GET a path with the context's client.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> Result<Response, SetupError> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// GET a path and return the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_text(&self, path: &str) -> Result<String, SetupError> {
        Ok(self.get(path).await?.text().await?)
    }

    /// POST a form with the context's client.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<Response, SetupError> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// Log in as the built-in user with the context's client.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn login(&self) -> Result<Response, SetupError> {
        self.post_form("/login", &[("username", "user"), ("password", "qwerty")])
            .await
    }
}

/// Client that keeps cookies and does not follow redirects.
fn session_client() -> Result<Client, SetupError> {
    Ok(Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()?)
}

#[allow(clippy::print_stderr)]
fn report_server_exit(err: &std::io::Error) {
    eprintln!("test server stopped: {err}");
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Value of a cookie set by a response.
#[must_use]
pub fn set_cookie_value(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            cookie
                .strip_prefix(&prefix)
                .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
        })
}

/// Extract the visit count from a rendered counter page.
#[must_use]
pub fn extract_count(body: &str) -> Option<u64> {
    let (_, rest) = body.split_once("Вы посетили эту страницу ")?;
    let (count, _) = rest.split_once(" раз!")?;
    count.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_count() {
        assert_eq!(
            extract_count("<p>Вы посетили эту страницу 12 раз!</p>"),
            Some(12)
        );
        assert_eq!(extract_count("<p>nothing</p>"), None);
    }
}
