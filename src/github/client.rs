use std::time::Duration;

use reqwest::{header, Client, ClientBuilder, StatusCode};

use crate::error::ReviewError;

/// Authenticated client for the GitHub contents API.
///
/// The token is threaded in through the constructor; there is no ambient
/// credential state.
pub struct GithubClient {
    client: Client,
    token: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Result<Self, ReviewError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("repo-review/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReviewError::internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.into(),
        })
    }

    /// Single authenticated GET. No retries: one failed call aborts the
    /// enclosing walk, a partial corpus is not useful downstream.
    pub async fn fetch(&self, api_url: &str) -> Result<String, ReviewError> {
        tracing::debug!(url = api_url, "fetching github resource");

        let response = self
            .client
            .get(api_url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| {
                ReviewError::remote_api(
                    format!("request failed: {}", e),
                    None,
                    Some(api_url.to_string()),
                )
            })?;

        let status = response.status();
        if status.is_success() {
            response.text().await.map_err(|e| {
                ReviewError::remote_api(
                    format!("failed to read response body: {}", e),
                    Some(status.as_u16()),
                    Some(api_url.to_string()),
                )
            })
        } else if status == StatusCode::NOT_FOUND {
            Err(ReviewError::not_found(api_url))
        } else {
            Err(ReviewError::remote_api(
                format!("HTTP error: {}", status),
                Some(status.as_u16()),
                Some(api_url.to_string()),
            ))
        }
    }
}
