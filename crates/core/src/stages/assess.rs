//! Assessment stage: bid PDF + RFP requirements → per-requirement verdicts.

use crate::stages::{cleanup_staged, Upload};
use crate::validation::{validate_upload, PDF_MIME};
use crate::{CoreResult, ValidationError};
use tdr_model::{decode, prompts, schemas, FileRef, ModelClient};
use tdr_staging::{staged_name, BlobStore};
use tdr_types::{Bid, Requirement};
use tracing::{info, warn};

/// Assesses an uploaded bid PDF against the given RFP requirements.
///
/// The requirement list is rendered into the instruction as an enumerated
/// block; the model is trusted — not forced — to return one verdict per
/// listed requirement. A count mismatch is logged and passed through: the
/// assessed list is whatever the model returned.
pub async fn assess_bid(
    staging: &dyn BlobStore,
    model: &dyn ModelClient,
    upload: &Upload,
    requirements: &[Requirement],
) -> CoreResult<Bid> {
    validate_upload(upload)?;
    if requirements.is_empty() {
        return Err(ValidationError::MissingRequirements.into());
    }

    let name = staged_name(upload.staging_filename());
    let staged = staging.put(&name, PDF_MIME, upload.bytes.clone()).await?;

    let file = FileRef {
        uri: staged.url.clone(),
        mime_type: PDF_MIME.to_string(),
    };
    let instruction = prompts::assessment_instruction(requirements);
    let outcome = model
        .generate_structured(&instruction, Some(&file), &schemas::bid_schema())
        .await
        .and_then(decode::decode_bid);

    cleanup_staged(staging, &staged).await;

    let bid = outcome?;
    if bid.requirements.len() != requirements.len() {
        warn!(
            expected = requirements.len(),
            returned = bid.requirements.len(),
            title = %bid.title,
            "assessment returned a different requirement count than the RFP"
        );
    }
    info!(title = %bid.title, total_cost = bid.total_cost, "assessed bid");
    Ok(bid)
}
