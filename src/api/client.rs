//! Backlog API client implementation.
//!
//! This module provides the request engine for the Backlog REST API v2. It
//! builds authenticated URLs, attaches form bodies to mutating requests, and
//! classifies responses into parsed JSON or an [`ApiError`].

use std::time::Duration;

use reqwest::{header, Client, Method, Response, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::auth::ApiKey;
use super::endpoint::Endpoint;
use super::error::{ApiError, Result};
use super::types::FormBody;
use crate::config::Config;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path prefix of every API endpoint.
const API_PREFIX: &str = "api/v2/";

/// The Backlog API client.
///
/// Holds one HTTP client, the resolved API base URL and the API key. Each
/// call performs exactly one request; nothing is retried or cached.
#[derive(Debug)]
pub struct BacklogClient {
    /// The HTTP client.
    client: Client,
    /// `https://{domain}/api/v2/`.
    base_url: Url,
    /// The domain as configured, used in network error messages.
    domain: String,
    /// Authentication credentials.
    api_key: ApiKey,
}

impl BacklogClient {
    /// Create a client from the invocation's configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_credentials(&config.domain, &config.api_key)
    }

    /// Create a client with explicit credentials.
    ///
    /// `domain` is a bare hostname such as `mycompany.backlog.com`. An explicit
    /// `http://` or `https://` origin is accepted as-is.
    pub fn with_credentials(domain: &str, api_key: &str) -> Result<Self> {
        let client = Self::build_http_client()?;
        let base_url = api_base_url(domain)?;

        Ok(Self {
            client,
            base_url,
            domain: domain.trim().trim_end_matches('/').to_string(),
            api_key: ApiKey::new(api_key),
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("backlog-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))
    }

    /// Resolve an endpoint to its full, authenticated request URL.
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&endpoint.to_string())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint.path(), e)))?;
        self.api_key.apply(&mut url);
        Ok(url)
    }

    /// Perform a GET request.
    pub async fn get(&self, endpoint: &Endpoint) -> Result<Value> {
        self.request(Method::GET, endpoint, None).await
    }

    /// Perform a POST request with a form-encoded body.
    pub async fn post_form(&self, endpoint: &Endpoint, form: &FormBody) -> Result<Value> {
        self.request(Method::POST, endpoint, Some(form)).await
    }

    /// Perform a PATCH request with a form-encoded body.
    pub async fn patch_form(&self, endpoint: &Endpoint, form: &FormBody) -> Result<Value> {
        self.request(Method::PATCH, endpoint, Some(form)).await
    }

    /// Perform a single request and classify the outcome.
    #[instrument(skip(self, endpoint, form), fields(endpoint = %endpoint))]
    async fn request(
        &self,
        method: Method,
        endpoint: &Endpoint,
        form: Option<&FormBody>,
    ) -> Result<Value> {
        let url = self.url(endpoint)?;
        debug!("Sending request");

        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(form) = form {
            // Sets Content-Type: application/x-www-form-urlencoded
            request = request.form(form);
        }

        let response = request.send().await.map_err(|e| self.network_error(e))?;
        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await.map_err(|e| self.network_error(e))?;
            debug!(status = status.as_u16(), size = bytes.len(), "Received response");
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &error_body);
            warn!(status = ?err.status(), "Request failed");
            debug!("Error response body: {}", error_body);
            Err(err)
        }
    }

    /// Wrap a transport failure, dropping the URL since it carries the API key.
    fn network_error(&self, err: reqwest::Error) -> ApiError {
        warn!(timeout = err.is_timeout(), connect = err.is_connect(), "Transport failure");
        ApiError::Network {
            domain: self.domain.clone(),
            source: err.without_url(),
        }
    }
}

/// Turn a configured domain into the API base URL.
///
/// Trailing slashes are removed and `https://` is assumed when no scheme is given.
fn api_base_url(domain: &str) -> Result<Url> {
    let domain = domain.trim().trim_end_matches('/');

    let origin = if domain.starts_with("https://") {
        domain.to_string()
    } else if domain.starts_with("http://") {
        if !is_local(domain) {
            warn!("Domain does not use HTTPS: {}. This is insecure for production use.", domain);
        }
        domain.to_string()
    } else {
        format!("https://{}", domain)
    };

    Url::parse(&format!("{}/{}", origin, API_PREFIX))
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", domain, e)))
}

fn is_local(origin: &str) -> bool {
    origin.contains("localhost") || origin.contains("127.0.0.1")
}
