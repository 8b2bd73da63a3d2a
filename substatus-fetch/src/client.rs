//! HTTP client with tracing and both debrid authorization styles.

use reqwest::{Client, Response, header};
use std::time::Duration;
use substatus_core::AuthScheme;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Substatus.
const USER_AGENT: &str = concat!("Substatus/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper for provider account lookups.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This should only occur
    /// if the system's TLS/SSL configuration is fundamentally broken,
    /// making network operations impossible. This is considered
    /// unrecoverable at runtime.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                panic!(
                    "Failed to create HTTP client: {}. \
                    This usually indicates a broken TLS/SSL configuration.",
                    e
                )
            });

        Self { inner: client }
    }

    /// Performs a GET request against an account endpoint, presenting the
    /// secret per the requested auth scheme.
    ///
    /// `query_param` names the parameter the secret is sent as when the
    /// scheme is [`AuthScheme::Query`].
    pub async fn get_account(
        &self,
        url: &str,
        scheme: AuthScheme,
        secret: &str,
        query_param: &str,
    ) -> Result<Response, FetchError> {
        match scheme {
            AuthScheme::Bearer => self.get_with_bearer(url, secret).await,
            AuthScheme::Query => self.get_with_query_key(url, query_param, secret).await,
        }
    }

    /// Performs a GET request with a bearer authorization header.
    #[instrument(skip(self, secret), fields(url = %url))]
    pub async fn get_with_bearer(&self, url: &str, secret: &str) -> Result<Response, FetchError> {
        debug!("GET request with bearer auth");

        let response = self
            .inner
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {secret}"))
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with the secret appended as a query parameter.
    #[instrument(skip(self, secret), fields(url = %url))]
    pub async fn get_with_query_key(
        &self,
        url: &str,
        param: &str,
        secret: &str,
    ) -> Result<Response, FetchError> {
        debug!("GET request with query-parameter auth");

        let mut parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        parsed.query_pairs_mut().append_pair(param, secret);

        let response = self.inner.get(parsed).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
