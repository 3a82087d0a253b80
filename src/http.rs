// src/http.rs

//! Shared blocking HTTP client
//!
//! Thin wrapper around reqwest used by the catalog, registry, fallback-source
//! and installer modules. Every call is a single attempt: a non-success status
//! or an unreadable body aborts the run, there is no retry.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request; the release-listing API rejects
/// anonymous clients.
const USER_AGENT: &str = concat!("modsync/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client shared by all remote calls in a run
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch a URL and deserialize the JSON response body
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json_with_query(url, &[])
    }

    /// Fetch a URL with query parameters and deserialize the JSON body
    pub fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| Error::DownloadError(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| Error::ParseError(format!("Malformed JSON from {url}: {e}")))
    }

    /// Fetch a URL and return the raw response body
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::DownloadError(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::DownloadError(format!("Failed to read response from {url}: {e}")))?;

        Ok(bytes.to_vec())
    }
}
