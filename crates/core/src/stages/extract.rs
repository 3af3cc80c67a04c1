//! Extraction stage: RFP PDF → structured requirement list.

use crate::stages::{cleanup_staged, Upload};
use crate::validation::{validate_upload, PDF_MIME};
use crate::CoreResult;
use tdr_model::{decode, prompts, schemas, FileRef, ModelClient};
use tdr_staging::{staged_name, BlobStore};
use tdr_types::Rfp;
use tracing::info;

/// Extracts an [`Rfp`] from an uploaded PDF.
///
/// Validates the upload, stages it so the model can fetch the bytes,
/// invokes the extraction call with the RFP output schema, and deletes the
/// staged blob whatever the outcome.
pub async fn extract_rfp(
    staging: &dyn BlobStore,
    model: &dyn ModelClient,
    upload: &Upload,
) -> CoreResult<Rfp> {
    validate_upload(upload)?;

    let name = staged_name(upload.staging_filename());
    let staged = staging.put(&name, PDF_MIME, upload.bytes.clone()).await?;

    let file = FileRef {
        uri: staged.url.clone(),
        mime_type: PDF_MIME.to_string(),
    };
    let outcome = model
        .generate_structured(
            prompts::EXTRACTION_INSTRUCTION,
            Some(&file),
            &schemas::rfp_schema(),
        )
        .await
        .and_then(decode::decode_rfp);

    cleanup_staged(staging, &staged).await;

    let rfp = outcome?;
    info!(
        title = %rfp.title,
        requirements = rfp.requirements.len(),
        "extracted RFP"
    );
    Ok(rfp)
}
