//! # TDR Model
//!
//! The language-model boundary for the Tender Document Review (TDR) system.
//!
//! Every piece of "intelligence" in the workflow — requirement extraction,
//! compliance assessment, cross-bid recommendation — is delegated to a
//! single model call per stage. This crate owns that boundary:
//!
//! - [`GeminiClient`]: one `generateContent` request with a
//!   `responseSchema`-constrained JSON output; the document, when there is
//!   one, is referenced by staged URL rather than sent inline
//! - [`prompts`]: the three fixed stage instructions, including the
//!   enumerated requirement block and per-bid summaries they embed
//! - [`schemas`]: the declarative output schemas the model's response must
//!   satisfy
//! - [`decode`]: the explicit schema-validation step — raw model JSON in,
//!   typed record or [`ModelError::SchemaViolation`] out
//!
//! Callers must never assume field presence beyond what decoding confirmed.

mod gemini;

pub mod decode;
pub mod prompts;
pub mod schemas;

pub use gemini::{FileRef, GeminiClient, ModelConfig};

/// Errors from model invocations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The request could not be sent or the API answered with an error status
    #[error("Model API request failed: {message}")]
    ApiRequest { message: String },

    /// Authentication against the model API failed
    #[error("Model authentication failed: {message}")]
    AuthFailed { message: String },

    /// The request did not complete within the configured timeout
    #[error("Model request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// A connection to the model API could not be established
    #[error("Model connection failed: {message}")]
    Connection { message: String },

    /// The API responded 2xx but the envelope could not be interpreted
    #[error("Model response parse error: {message}")]
    ResponseParse { message: String },

    /// The model's structured output did not satisfy the declared schema
    #[error("Model output violates the expected schema: {message}")]
    SchemaViolation { message: String },
}

/// Boundary trait for structured model calls.
///
/// A model call is a black-box function from (instruction, optional staged
/// file, output schema) to a raw JSON value claimed to satisfy the schema.
/// Typed decoding is a separate, explicit step — see [`decode`].
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Performs one structured model call.
    async fn generate_structured(
        &self,
        instruction: &str,
        file: Option<&FileRef>,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, ModelError>;
}
