//! The three workflow stages.
//!
//! Each stage is one blocking request/response transformation. The two
//! document stages share a staging discipline: validate the upload, stage
//! the payload, invoke the model with the staged URL, then delete the blob
//! on both the success and failure paths. Cleanup failure is logged and
//! swallowed — a successful extraction must never fail because of cleanup
//! trouble.

mod analyse;
mod assess;
mod extract;

pub use analyse::analyse_bids;
pub use assess::assess_bid;
pub use extract::extract_rfp;

use tdr_staging::{BlobStore, StagedBlob};
use tracing::warn;

/// An uploaded document as received at the boundary.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original filename, if the client supplied one
    pub filename: Option<String>,
    /// Declared MIME type, if the client supplied one
    pub content_type: Option<String>,
    /// The payload
    pub bytes: Vec<u8>,
}

impl Upload {
    /// The filename to stage under, falling back to a generic name.
    pub(crate) fn staging_filename(&self) -> &str {
        self.filename.as_deref().unwrap_or("upload.pdf")
    }
}

/// Best-effort deletion of a staged blob.
///
/// Called on both stage outcomes; never escalates.
pub(crate) async fn cleanup_staged(staging: &dyn BlobStore, staged: &StagedBlob) {
    if let Err(e) = staging.delete(&staged.url).await {
        warn!(blob_url = %staged.url, error = %e, "failed to delete staged blob");
    }
}
