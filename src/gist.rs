use std::collections::HashMap;

use reqwest::{Client, Response};
use serde::Deserialize;

use crate::error::SyncError;

const API_BASE: &str = "https://api.github.com";

// The gist API rejects requests that carry no User-Agent header
const USER_AGENT: &str = concat!("gistsync/", env!("CARGO_PKG_VERSION"));

/// Gist metadata as returned by `GET /gists/{id}`
///
/// Only the parts we read are modeled; unknown fields in the response are
/// ignored during deserialization.
#[derive(Debug, Deserialize)]
pub struct GistMetadata {
    pub files: HashMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
pub struct GistFile {
    pub raw_url: Option<String>,
}

impl GistMetadata {
    /// Returns the raw content URL for the named file, if the gist has one
    pub fn raw_url(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name)?.raw_url.as_deref()
    }
}

/// The HTTP client for the gist API and its raw content hosts
pub struct GistClient {
    client: Client,
    api_base: String,
}

impl GistClient {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_base(API_BASE)
    }

    /// Points the client at a different API host
    pub fn with_base(api_base: impl Into<String>) -> reqwest::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    /// Fetches the metadata for a gist, fresh on every call
    pub async fn fetch_metadata(&self, gist_id: &str) -> Result<GistMetadata, SyncError> {
        let url = format!("{}/gists/{}", self.api_base, gist_id);
        let response = self.get(&url).await?;

        response.json().await.map_err(|source| SyncError::Fetch {
            url,
            status: None,
            source: Some(source),
        })
    }

    /// Fetches the raw bytes of a file from its raw content URL
    pub async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let response = self.get(url).await?;

        let bytes = response.bytes().await.map_err(|source| SyncError::Fetch {
            url: url.to_string(),
            status: None,
            source: Some(source),
        })?;

        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str) -> Result<Response, SyncError> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| SyncError::Fetch {
                    url: url.to_string(),
                    status: source.status(),
                    source: Some(source),
                })?;

        if !response.status().is_success() {
            return Err(SyncError::Fetch {
                url: url.to_string(),
                status: Some(response.status()),
                source: None,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(json: &str) -> GistMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn raw_url_for_present_file() {
        let meta = metadata(r#"{"files":{"a.txt":{"raw_url":"https://example.com/raw/a.txt"}}}"#);
        assert_eq!(meta.raw_url("a.txt"), Some("https://example.com/raw/a.txt"));
    }

    #[test]
    fn raw_url_for_absent_file() {
        let meta = metadata(r#"{"files":{"a.txt":{"raw_url":"https://example.com/raw/a.txt"}}}"#);
        assert_eq!(meta.raw_url("b.txt"), None);
    }

    #[test]
    fn descriptor_without_raw_url() {
        let meta = metadata(r#"{"files":{"a.txt":{"size":5}}}"#);
        assert_eq!(meta.raw_url("a.txt"), None);
    }

    #[test]
    fn unmodeled_metadata_fields_are_ignored() {
        let meta = metadata(
            r#"{"id":"abc123","public":true,"files":{"a.txt":{"raw_url":"u","size":1}}}"#,
        );

        assert_eq!(meta.raw_url("a.txt"), Some("u"));
    }
}
