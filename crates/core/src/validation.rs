//! Input validation for uploads and caller-supplied requirement lists.
//!
//! Every violation is rejected before any staging call is made, with a
//! variant naming the specific constraint so wrong-type, oversize and
//! absent failures are distinguishable at the boundary.

use crate::stages::Upload;
use crate::ValidationError;
use tdr_types::Requirement;

/// MIME type accepted for uploads.
pub const PDF_MIME: &str = "application/pdf";

/// Maximum accepted upload size: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Validates an uploaded document.
///
/// Checks, in order: a file was provided at all, the declared MIME type is
/// `application/pdf`, the payload does not exceed [`MAX_UPLOAD_BYTES`], and
/// the content actually carries a PDF signature. The declared-type check
/// comes first so a caller sending the wrong kind of file gets told so even
/// when the file is also oversized.
pub fn validate_upload(upload: &Upload) -> Result<(), ValidationError> {
    if upload.bytes.is_empty() {
        return Err(ValidationError::MissingFile);
    }

    let declared = upload.content_type.as_deref().unwrap_or("");
    if declared != PDF_MIME {
        return Err(ValidationError::UnsupportedMediaType {
            declared: declared.to_string(),
        });
    }

    let size_bytes = upload.bytes.len() as u64;
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size_bytes,
            limit_bytes: MAX_UPLOAD_BYTES,
        });
    }

    // Declared type is advisory; the magic bytes are not.
    let is_pdf = infer::get(&upload.bytes)
        .map(|kind| kind.mime_type() == PDF_MIME)
        .unwrap_or(false);
    if !is_pdf {
        return Err(ValidationError::ContentMismatch);
    }

    Ok(())
}

/// Parses a caller-supplied requirement list from its serialised JSON form.
///
/// Distinguishes malformed input (un-parseable JSON, wrong shape) from an
/// empty list, per the assessment stage's contract.
pub fn parse_requirements(raw: &str) -> Result<Vec<Requirement>, ValidationError> {
    let requirements: Vec<Requirement> =
        serde_json::from_str(raw).map_err(|e| ValidationError::MalformedRequirements {
            reason: e.to_string(),
        })?;

    if requirements.is_empty() {
        return Err(ValidationError::MissingRequirements);
    }

    Ok(requirements)
}
