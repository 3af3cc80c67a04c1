//! TDR Blob Staging
//!
//! This crate provides transient blob staging for the Tender Document Review
//! (TDR) workflow.
//!
//! ## Design Principles
//!
//! Staging exists for exactly one purpose: the model endpoint fetches
//! document bytes by URL rather than receiving them inline, so an uploaded
//! PDF must briefly live at a dereferenceable location.
//!
//! - Staged blobs are transient — every staged blob is deleted once the
//!   model call that needed it has completed, on success and failure alike
//! - Deletion is best-effort — a stage result is never invalidated because
//!   cleanup failed; failures are logged and swallowed by the caller
//! - Staged names incorporate a millisecond timestamp alongside the original
//!   filename, so repeated uploads of the same document never collide
//! - No listing, no retrieval: the store is write-and-forget from this
//!   crate's point of view
//!
//! ## Example Usage
//!
//! ```no_run
//! use tdr_staging::{BlobStore, HttpBlobStore, StagingConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StagingConfig::new("https://blob.example.com", "token")?;
//! let store = HttpBlobStore::new(config)?;
//!
//! let staged = store
//!     .put("1756500000000-rfp.pdf", "application/pdf", b"%PDF-1.7...".to_vec())
//!     .await?;
//! // ... hand staged.url to the model call ...
//! store.delete(&staged.url).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod name;

pub use client::{HttpBlobStore, StagedBlob, StagingConfig};
pub use name::staged_name;

/// Errors that can occur during blob staging operations
#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    /// The staging service configuration was invalid (empty URL or token)
    #[error("Invalid staging configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be constructed or the request failed to send
    #[error("Staging request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The staging service rejected the request
    #[error("Staging service returned {status}: {body}")]
    Server { status: u16, body: String },

    /// The staging service's response could not be interpreted
    #[error("Unexpected staging response: {0}")]
    Response(String),
}

/// Boundary trait for the blob staging service.
///
/// The workflow stages depend on this trait rather than on
/// [`HttpBlobStore`] directly, so tests can substitute an in-memory fake
/// that records calls.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Stages a binary payload under the given name.
    ///
    /// Returns a [`StagedBlob`] whose `url` dereferences to the payload.
    async fn put(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StagedBlob, StagingError>;

    /// Deletes a previously staged blob by its URL.
    async fn delete(&self, url: &str) -> Result<(), StagingError>;
}
