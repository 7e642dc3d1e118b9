//! HTTP client for the GitHub gist listing API

use super::GistSource;
use crate::config::ListingConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::{GistRecord, GistResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

/// Lists gists through `GET /users/{username}/gists`
///
/// Pages are requested from 1 upwards until the API returns an empty page.
pub struct GistClient {
    /// HTTP client with timeout and user agent applied
    http_client: reqwest::Client,

    /// API root, e.g. `https://api.github.com`
    api_base_url: Url,

    /// Bearer token, sent only when present
    token: Option<String>,

    /// Gists per page
    per_page: u32,
}

impl GistClient {
    /// Create a client from listing settings
    ///
    /// # Errors
    /// Returns a config error if the API base URL is unusable, or a fetch error if
    /// the HTTP client cannot be created
    pub fn new(config: &ListingConfig) -> Result<Self> {
        let api_base_url = Url::parse(&config.api_base_url).map_err(|e| {
            Error::config(
                "api_base_url",
                format!("invalid API base URL '{}': {}", config.api_base_url, e),
            )
        })?;
        if api_base_url.cannot_be_a_base() {
            return Err(Error::config(
                "api_base_url",
                format!("API base URL cannot be a base: {}", api_base_url),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            http_client,
            api_base_url,
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
            per_page: config.per_page,
        })
    }

    /// URL of one listing page
    fn page_url(&self, username: &str, page: u32) -> Url {
        let mut url = self.api_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", username, "gists"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.per_page.to_string());
        url
    }

    /// Fetch and decode a single listing page
    ///
    /// # Errors
    /// Maps 404, 401 and 403 to their dedicated [`FetchError`] variants and any other
    /// non-success status to [`FetchError::Api`]
    pub async fn fetch_page(
        &self,
        username: &str,
        page: u32,
    ) -> std::result::Result<Vec<GistResponse>, FetchError> {
        let url = self.page_url(username, page);
        debug!(%url, page, "Requesting gist page");

        let mut request = self.http_client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::NOT_FOUND => FetchError::UserNotFound(username.to_string()),
                StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
                StatusCode::FORBIDDEN => FetchError::RateLimited,
                other => FetchError::Api {
                    status: other.as_u16(),
                },
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GistSource for GistClient {
    async fn list_gists(
        &self,
        username: &str,
    ) -> std::result::Result<Vec<GistRecord>, FetchError> {
        let mut gists = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(username, page).await?;
            if batch.is_empty() {
                break;
            }

            debug!(page, count = batch.len(), "Fetched gist page");
            gists.extend(batch.into_iter().map(GistRecord::from));
            page += 1;
        }

        info!(
            username,
            count = gists.len(),
            requests = page,
            "Gist listing complete"
        );
        Ok(gists)
    }
}
