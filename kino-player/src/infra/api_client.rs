use kino_config::util::normalize_base_url;
use kino_contracts::services::{ServiceError, ServiceResult};
use log::{info, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// HTTP client for the catalog/progress server.
///
/// The server authenticates with a `token` query parameter rather than a
/// header, so the token is attached per request when present.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    api_version: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let normalized = normalize_base_url(base_url);
        if normalized != base_url {
            warn!(
                "[ApiClient] Normalized base URL from '{}' to '{}'",
                base_url, normalized
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            normalized
        );

        Ok(Self {
            client,
            base_url: normalized,
            api_version: "v1".to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Build a versioned API URL
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        let path = p.trim_start_matches('/');
        if path.starts_with("api/") {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/api/{}/{}", self.base_url, self.api_version, path)
        }
    }

    /// Unversioned URL on the same host, e.g. stream endpoints.
    pub fn host_url(&self, path: impl AsRef<str>) -> String {
        format!(
            "{}/{}",
            self.base_url,
            path.as_ref().trim_start_matches('/')
        )
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.as_deref() {
            Some(token) => builder.query(&[("token", token)]),
            None => builder,
        }
    }

    /// GET request with authentication
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ServiceResult<T> {
        let url = self.build_url(path);
        let request = self.authorize(self.client.get(&url));
        self.execute_request(&url, request).await
    }

    /// GET request WITHOUT authentication (for public endpoints)
    pub async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> ServiceResult<T> {
        let url = self.build_url(path);
        let request = self.client.get(&url);
        self.execute_request(&url, request).await
    }

    /// POST request with authentication, response body ignored
    pub async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ServiceResult<()> {
        let url = self.build_url(path);
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.authorize(request);
        let response = self.send(request).await?;
        Self::check_status(&url, response).await.map(|_| ())
    }

    /// Execute a request and handle common errors
    async fn execute_request<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> ServiceResult<T> {
        let response = self.send(request).await?;
        let response = Self::check_status(url, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ServiceError::Decode(err.to_string()))
    }

    async fn send(
        &self,
        request: RequestBuilder,
    ) -> ServiceResult<reqwest::Response> {
        request
            .send()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))
    }

    async fn check_status(
        url: &str,
        response: reqwest::Response,
    ) -> ServiceResult<reqwest::Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ServiceError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ServiceError::NotFound(url.to_string())),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ServiceError::Status {
                    status: status.as_u16(),
                    body: error_text,
                })
            }
        }
    }
}
