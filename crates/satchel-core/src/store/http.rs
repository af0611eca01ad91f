//! HTTP-backed store listing client.
//!
//! Speaks the listing half of the store integration: `GET
//! {base_url}/files?path=…` with a bearer token, a JSON array of entries in
//! the response body. The authorization grant itself happens out of band in
//! the popup window; this client only reports whether the token is usable.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;

use super::{FileEntry, FileListing, ListingError, ListingErrorKind, ListingResult};

/// Standard User-Agent header for satchel API requests.
pub const USER_AGENT: &str = concat!("satchel/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout for listing calls.
const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a store's file-listing endpoint.
pub struct HttpStore {
    base_url: String,
    http: reqwest::Client,
}

impl HttpStore {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    /// Returns an error if the URL is not well-formed or the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        url::Url::parse(trimmed).with_context(|| format!("Invalid store base URL: {base_url}"))?;

        let http = reqwest::Client::builder()
            .timeout(LIST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http,
        })
    }

    async fn fetch_listing(&self, token: &str, path: &str) -> ListingResult<Vec<FileEntry>> {
        let url = format!("{}/files", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("path", path)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ListingError::timeout(format!("Listing request timed out: {e}"))
                } else {
                    ListingError::new(
                        ListingErrorKind::HttpStatus,
                        format!("Listing request failed: {e}"),
                    )
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            let err = ListingError::authorization(format!(
                "Store access not authorized (HTTP {})",
                status.as_u16()
            ));
            return Err(if body.is_empty() {
                err
            } else {
                err.with_details(body)
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ListingError::http_status(status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ListingError::parse(format!("Failed to read listing body: {e}")))?;
        serde_json::from_str(&body)
            .map_err(|e| ListingError::parse(format!("Failed to parse listing response: {e}")))
    }
}

impl FileListing for HttpStore {
    fn list_files(
        &self,
        token: &str,
        path: &str,
    ) -> LocalBoxFuture<'_, ListingResult<Vec<FileEntry>>> {
        let token = token.to_string();
        let path = path.to_string();
        async move { self.fetch_listing(&token, &path).await }.boxed_local()
    }
}
