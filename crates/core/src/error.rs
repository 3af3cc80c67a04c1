//! Error taxonomy for the workflow.
//!
//! Three classes matter to callers and they map to distinct status-code
//! classes at the REST boundary:
//! - [`ValidationError`]: bad or missing input; reported immediately, no
//!   staging call is made, no partial processing occurs
//! - staging/model errors (carried through from `tdr-staging` and
//!   `tdr-model`): server-side processing failures, single attempt, no
//!   retry — except blob *delete* failures, which are swallowed and logged
//!   by the stages because they never affect the returned result
//! - store errors: the durable project store could not be written

use tdr_model::ModelError;
use tdr_staging::StagingError;

/// Input validation failures. Each variant names the specific violated
/// constraint so the caller's error message distinguishes wrong-type from
/// oversize from absent.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("no file provided")]
    MissingFile,

    #[error("unsupported file type '{declared}': only application/pdf is accepted")]
    UnsupportedMediaType { declared: String },

    #[error("file content is not a PDF document")]
    ContentMismatch,

    #[error("file is {size_bytes} bytes; the limit is {limit_bytes} bytes")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("requirement list is missing or empty")]
    MissingRequirements,

    #[error("requirement list could not be parsed: {reason}")]
    MalformedRequirements { reason: String },

    #[error("no RFP has been loaded")]
    MissingRfp,

    #[error("an RFP is already loaded; reset the project to start over")]
    RfpAlreadyLoaded,

    #[error("no bids to analyse")]
    NoBids,
}

/// Top-level error for core orchestration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("staging error: {0}")]
    Staging(#[from] StagingError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("failed to serialise project: {0}")]
    StoreSerialization(serde_json::Error),

    #[error("failed to write project store: {0}")]
    StoreWrite(std::io::Error),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Whether this error is the caller's fault (a 400-class failure at the
    /// REST boundary) rather than a processing failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_constraint() {
        let err = ValidationError::FileTooLarge {
            size_bytes: 11_000_000,
            limit_bytes: 10_485_760,
        };
        assert_eq!(
            err.to_string(),
            "file is 11000000 bytes; the limit is 10485760 bytes"
        );
    }

    #[test]
    fn test_core_error_classifies_validation() {
        let err = CoreError::from(ValidationError::MissingFile);
        assert!(err.is_validation());

        let err = CoreError::Model(ModelError::SchemaViolation {
            message: "missing title".into(),
        });
        assert!(!err.is_validation());
    }
}
