//! HTTP client for the resort kitchen API and the client-side flows built
//! on it.
//!
//! [`ApiClient`] is the single way the client tier talks to the server: it
//! owns the base URL, attaches the bearer token and normalizes failures into
//! [`ClientError`]. Screens keep no cache; they refetch after mutations.

pub mod endpoints;
pub mod error;
pub mod flows;
pub mod hr;
pub mod orders;
pub mod session;
pub mod shopping;

pub use error::{ClientError, ClientResult};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};

use crate::api::error::ErrorBody;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// Typed client for the REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// A client for the server at `base_url`, e.g. `http://localhost:5000`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// A client that reuses the token persisted in `store`, if any.
    pub fn from_session(
        base_url: impl Into<String>,
        store: &dyn SessionStore,
    ) -> ClientResult<Self> {
        let mut client = Self::new(base_url);
        client.token = store.load()?.auth_token;
        Ok(client)
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bearer token attached to requests
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Attaches `token` to subsequent requests.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Stops attaching a token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::POST, path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Sends a request whose success response has no body.
    pub(crate) async fn send_no_content(&self, method: Method, path: &str) -> ClientResult<()> {
        let response = self.request(method, path).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_token_restored_from_session() -> ClientResult<()> {
        let store = MemorySessionStore::default();
        store.save(&StoredSession {
            auth_token: Some("abc".to_string()),
            user_info: None,
        })?;

        let mut client = ApiClient::from_session("http://localhost:5000", &store)?;
        assert_eq!(client.token(), Some("abc"));
        client.clear_token();
        assert_eq!(client.token(), None);
        Ok(())
    }
}
