//! HTTP client for the blob staging service.
//!
//! The staging service exposes a minimal put/delete surface:
//!
//! - `PUT {base_url}/{name}` with the payload as the request body and a
//!   bearer token; responds with JSON `{"url": "..."}` — the publicly
//!   dereferenceable location of the blob
//! - `POST {base_url}/delete` with JSON `{"urls": ["..."]}` to remove
//!   previously staged blobs
//!
//! Only these two operations exist here. The service is treated as an
//! opaque key-value store; nothing in TDR ever reads a blob back.

use crate::{BlobStore, StagingError};
use chrono::{DateTime, Utc};
use tdr_types::NonEmptyText;
use tracing::info;

/// Configuration for the blob staging service, resolved at startup.
#[derive(Debug, Clone)]
pub struct StagingConfig {
    base_url: String,
    token: NonEmptyText,
}

impl StagingConfig {
    /// Creates a new `StagingConfig`.
    ///
    /// `base_url` should be like `https://blob.example.com` (a trailing
    /// slash is stripped). The token must be non-empty.
    pub fn new(
        base_url: impl AsRef<str>,
        token: impl AsRef<str>,
    ) -> Result<Self, StagingError> {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(StagingError::InvalidConfig(
                "staging base URL cannot be empty".into(),
            ));
        }
        let token = NonEmptyText::new(token)
            .map_err(|_| StagingError::InvalidConfig("staging token cannot be empty".into()))?;
        Ok(Self { base_url, token })
    }
}

/// Record of a successfully staged blob.
///
/// Returned by [`BlobStore::put`]; `url` is the handle for both the model
/// call and the subsequent delete.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StagedBlob {
    /// Publicly dereferenceable URL of the staged payload
    pub url: String,
    /// The name the payload was staged under
    pub name: String,
    /// Payload size in bytes
    pub size_bytes: u64,
    /// UTC timestamp when the payload was staged
    pub staged_at: DateTime<Utc>,
}

#[derive(serde::Deserialize)]
struct PutResponse {
    url: String,
}

/// HTTP implementation of [`BlobStore`].
pub struct HttpBlobStore {
    client: reqwest::Client,
    config: StagingConfig,
}

impl HttpBlobStore {
    /// Creates a new staging client for the configured service.
    pub fn new(config: StagingConfig) -> Result<Self, StagingError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.token)
    }
}

#[async_trait::async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StagedBlob, StagingError> {
        let url = format!("{}/{}", self.config.base_url, name);
        let size_bytes = bytes.len() as u64;

        info!(name = %name, size_bytes, "staging blob");
        let resp = self
            .client
            .put(&url)
            .header("authorization", self.bearer())
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StagingError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let put: PutResponse = resp
            .json()
            .await
            .map_err(|e| StagingError::Response(format!("invalid put response: {e}")))?;

        Ok(StagedBlob {
            url: put.url,
            name: name.to_string(),
            size_bytes,
            staged_at: Utc::now(),
        })
    }

    async fn delete(&self, url: &str) -> Result<(), StagingError> {
        let endpoint = format!("{}/delete", self.config.base_url);

        info!(blob_url = %url, "deleting staged blob");
        let resp = self
            .client
            .post(&endpoint)
            .header("authorization", self.bearer())
            .json(&serde_json::json!({ "urls": [url] }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StagingError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = StagingConfig::new("https://blob.example.com/", "tok").unwrap();
        assert_eq!(config.base_url, "https://blob.example.com");
    }

    #[test]
    fn test_config_rejects_empty_url() {
        let result = StagingConfig::new("", "tok");
        assert!(matches!(result, Err(StagingError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_blank_token() {
        let result = StagingConfig::new("https://blob.example.com", "   ");
        assert!(matches!(result, Err(StagingError::InvalidConfig(_))));
    }

    #[test]
    fn test_server_error_display() {
        let err = StagingError::Server {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(
            err.to_string(),
            "Staging service returned 403: forbidden"
        );
    }
}
